//! sbt-mint Rust SDK — integration example
//!
//! Demonstrates: price queries, collection inspection, and minting.
//!
//! # Setup
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! sbt-mint-sdk = { path = "../packages/sdk-rust" }   # or from crates.io once published
//! solana-sdk   = "2.1"
//! tokio        = { version = "1", features = ["full"] }
//! ```
//!
//! # Environment
//!
//! ```bash
//! export SOLANA_RPC_URL="https://api.devnet.solana.com"
//! export MINT_KEYPAIR_PATH="$HOME/.config/solana/id.json"
//! ```

use sbt_mint_sdk::{CollectionParams, MintParams, SbtMintClient};
use solana_sdk::signature::{read_keypair_file, Keypair, Signer};

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn rpc_url() -> String {
    std::env::var("SOLANA_RPC_URL")
        .unwrap_or_else(|_| "https://api.devnet.solana.com".into())
}

fn load_keypair() -> Keypair {
    let path = std::env::var("MINT_KEYPAIR_PATH")
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/.config/solana/id.json")
        });
    read_keypair_file(&path)
        .unwrap_or_else(|e| panic!("Failed to load keypair from {path}: {e}"))
}

// ─── Example 1: Quote the next mint (read-only) ───────────────────────────────

/// Ask the config account what the next mint costs.
/// No keypair required — pure read operation.
async fn example_price_quote(client: &SbtMintClient) {
    println!("\n── Price quote ─────────────────────────────────────────────");

    let quote = client.current_price().await.expect("current_price failed");

    println!("  Tokens minted:  {}", quote.current_id);
    println!("  Active tier:    {}", quote.tier);
    println!("  Price:          {} lamports", quote.price_lamports);
    match (quote.next_tier_at, quote.next_tier_price) {
        (Some(at), Some(price)) => {
            println!("  Next tier:      at {at} minted → {price} lamports");
        }
        _ => println!("  Next tier:      top tier reached"),
    }
}

// ─── Example 2: Collection info (read-only) ───────────────────────────────────

/// Fetch the counter, authority, and the full price schedule.
async fn example_collection_info(client: &SbtMintClient) {
    println!("\n── Collection info ──────────────────────────────────────────");

    let info = client.collection_info().await.expect("collection_info failed");

    println!("  Config:          {}", info.config);
    println!("  Collection mint: {}", info.collection_mint);
    println!("  Authority:       {}", info.authority);
    println!("  Tokens minted:   {}", info.current_id);
    for (i, (level, price)) in info.levels.iter().zip(info.prices.iter()).enumerate() {
        println!("  Tier {}: from {:>7} minted — {} lamports", i + 1, level, price);
    }
}

// ─── Example 3: On-chain price view ──────────────────────────────────────────

/// Ask the program itself via a simulated get_current_price call.
/// The payer pubkey is only the simulated fee payer; nothing is signed.
async fn example_view_price(client: &SbtMintClient, payer: &Keypair) {
    println!("\n── On-chain price view ──────────────────────────────────────");

    let price = client
        .view_current_price(&payer.pubkey())
        .await
        .expect("view_current_price failed");

    println!("  Program says:   {price} lamports");
}

// ─── Example 4: Initialize the collection ────────────────────────────────────

/// One-shot collection setup. Skip if the collection already exists —
/// the PDAs are fixed, so a second call fails on-chain.
async fn example_initialize(client: &SbtMintClient, payer: &Keypair) {
    println!("\n── Initialize collection ────────────────────────────────────");

    let result = client
        .initialize_collection(
            payer,
            CollectionParams {
                name:   "Test Collection".into(),
                symbol: "TEST".into(),
                uri:    "https://arweave.net/collection-uri".into(),
            },
        )
        .await
        .expect("initialize_collection failed");

    println!("  Signature:       {}", result.signature);
    println!("  Collection mint: {}", result.collection_mint);
    println!("  Config:          {}", result.config);
}

// ─── Example 5: Mint a token ─────────────────────────────────────────────────

/// Mint one soul-bound token to the payer's wallet.
async fn example_mint(client: &SbtMintClient, payer: &Keypair) {
    println!("\n── Mint ─────────────────────────────────────────────────────");

    let result = client
        .mint(
            payer,
            MintParams {
                name:   "Test NFT".into(),
                symbol: "TEST".into(),
                uri:    "https://arweave.net/nft-uri".into(),
            },
        )
        .await
        .expect("mint failed");

    println!("  Signature:     {}", result.signature);
    println!("  Token id:      {}", result.token_id);
    println!("  Mint:          {}", result.mint);
    println!("  Token account: {}", result.token_account);
    println!("  Price paid:    {} lamports", result.price_lamports);
}

// ─── Main ─────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    let client = SbtMintClient::new(rpc_url());
    let payer  = load_keypair();

    println!("sbt-mint Rust SDK example");
    println!("Wallet pubkey: {}", payer.pubkey());
    println!("Program:       {}", client.program_id());

    // ── Read-only (no funds required) ─────────────────────────────────────
    example_collection_info(&client).await;
    example_price_quote(&client).await;
    example_view_price(&client, &payer).await;

    // ── Write operations (requires funded wallet) ─────────────────────────
    // Uncomment to execute on-chain:

    // One-time collection setup (skip if already initialized)
    // example_initialize(&client, &payer).await;

    // Mint a token to the wallet
    // example_mint(&client, &payer).await;
}
