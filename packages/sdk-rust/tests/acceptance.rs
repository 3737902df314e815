//! End-to-end acceptance checks against a live validator.
//!
//! These drive the deployed mint program through the public client and assert
//! on resulting account state, so they need a local validator with the
//! program loaded at its declared id (or at `SBT_PROGRAM_ID`):
//!
//! ```bash
//! solana-test-validator --bpf-program 8nQ4PwDCH3uWrdjZ7YPVGKhkbbmfh4QAFgfvJzmJBJSK sbt_mint.so
//! cargo test -p sbt-mint-sdk -- --ignored
//! ```
//!
//! The whole lifecycle runs as one sequential test: the operations mutate
//! shared program state (the config PDA), so ordering matters.

use std::str::FromStr;
use std::time::Duration;

use sbt_mint_sdk::{CollectionParams, MintParams, SbtMintClient, UpdatePricesParams};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};

const LOCALNET_RPC: &str = "http://127.0.0.1:8899";

fn test_client() -> SbtMintClient {
    let client = SbtMintClient::new(LOCALNET_RPC);
    match std::env::var("SBT_PROGRAM_ID") {
        Ok(id) => client.with_program_id(Pubkey::from_str(&id).expect("SBT_PROGRAM_ID")),
        Err(_) => client,
    }
}

async fn airdrop(rpc: &RpcClient, to: &Pubkey, lamports: u64) {
    let sig = rpc.request_airdrop(to, lamports).await.expect("airdrop request");
    for _ in 0..30 {
        if rpc.confirm_transaction(&sig).await.unwrap_or(false) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
    panic!("airdrop for {to} not confirmed");
}

#[tokio::test]
#[ignore = "requires a local validator with the mint program deployed"]
async fn full_collection_lifecycle() {
    let client = test_client();
    let rpc = RpcClient::new_with_commitment(
        LOCALNET_RPC.to_string(),
        CommitmentConfig::confirmed(),
    );

    let payer = Keypair::new();
    airdrop(&rpc, &payer.pubkey(), 2 * LAMPORTS_PER_SOL).await;

    // ── initialize_collection ────────────────────────────────────────────────
    let init = client
        .initialize_collection(
            &payer,
            CollectionParams {
                name:   "Test Collection".into(),
                symbol: "TEST".into(),
                uri:    "https://arweave.net/collection-uri".into(),
            },
        )
        .await
        .expect("initialize_collection");

    let info = client.collection_info().await.expect("collection_info");
    assert_eq!(info.collection_mint, init.collection_mint);
    assert_eq!(info.authority, payer.pubkey());
    assert_eq!(info.current_id, 0);
    assert_eq!(info.prices[0], 0);
    assert_eq!(info.prices[1], 200_000_000);

    // ── get_current_price (on-chain view) ────────────────────────────────────
    // Tier 1 is active at counter 0, so the view must report price_level1.
    let viewed = client
        .view_current_price(&payer.pubkey())
        .await
        .expect("view_current_price");
    assert_eq!(viewed, 0);

    let quote = client.current_price().await.expect("current_price");
    assert_eq!(quote.price_lamports, viewed);
    assert_eq!(quote.tier, 1);

    // ── mint_nft ─────────────────────────────────────────────────────────────
    let minted = client
        .mint(
            &payer,
            MintParams {
                name:   "Test NFT".into(),
                symbol: "TEST".into(),
                uri:    "https://arweave.net/nft-uri".into(),
            },
        )
        .await
        .expect("mint");
    assert_eq!(minted.token_id, 0);
    assert_eq!(minted.price_lamports, 0); // tier 1 mints are free

    let balance = client
        .token_balance(&payer.pubkey(), &minted.mint)
        .await
        .expect("token_balance");
    assert_eq!(balance, 1);

    let info = client.collection_info().await.expect("collection_info after mint");
    assert_eq!(info.current_id, 1);

    // ── update_prices ────────────────────────────────────────────────────────
    let updated = client
        .update_prices(
            &payer,
            UpdatePricesParams {
                prices: [100_000_000, 200_000_000, 300_000_000, 400_000_000, 500_000_000],
            },
        )
        .await
        .expect("update_prices");
    assert!(!updated.signature.is_empty());

    let info = client.collection_info().await.expect("collection_info after update");
    assert_eq!(info.prices[0], 100_000_000);

    // The new tier-1 price is live for the next mint.
    let viewed = client
        .view_current_price(&payer.pubkey())
        .await
        .expect("view after update");
    assert_eq!(viewed, 100_000_000);
}
