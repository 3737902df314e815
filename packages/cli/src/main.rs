use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use serde_json::json;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    native_token::lamports_to_sol,
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signer},
};
use std::str::FromStr;

use sbt_mint_sdk::{
    CollectionParams, MintParams, SbtMintClient, UpdatePricesParams,
};

// ─── Program constants ────────────────────────────────────────────────────────

const PROGRAM_ID: &str  = "8nQ4PwDCH3uWrdjZ7YPVGKhkbbmfh4QAFgfvJzmJBJSK";
const DEVNET_RPC: &str  = "https://api.devnet.solana.com";

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Expand `~/` to `$HOME/` in keypair paths.
fn expand_home(path: &str) -> String {
    if path.starts_with("~/") {
        format!("{}{}", std::env::var("HOME").unwrap_or_default(), &path[1..])
    } else {
        path.to_string()
    }
}

fn load_keypair(path: &str) -> Result<Keypair> {
    let expanded = expand_home(path);
    read_keypair_file(&expanded)
        .map_err(|e| anyhow!(
            "Cannot load keypair from '{}': {}\n  \
             Set SBT_KEYPAIR or pass --keypair to specify a different path.",
            expanded, e
        ))
}

fn parse_commitment(s: &str) -> Result<CommitmentConfig> {
    match s {
        "processed" => Ok(CommitmentConfig::processed()),
        "confirmed" => Ok(CommitmentConfig::confirmed()),
        "finalized" => Ok(CommitmentConfig::finalized()),
        other => Err(anyhow!(
            "Unknown --commitment '{}'. Valid values: processed, confirmed, finalized",
            other
        )),
    }
}

/// Render a lamport amount with its SOL equivalent, e.g. `200000000  (0.200 SOL)`.
fn format_price(lamports: u64) -> String {
    format!("{lamports}  ({:.3} SOL)", lamports_to_sol(lamports))
}

// ─── Version banner ───────────────────────────────────────────────────────────

/// Print the sbt-mint banner to stdout.
fn print_banner() {
    let ver = env!("CARGO_PKG_VERSION");
    println!();
    println!("  sbt-mint  v{ver}  ·  soul-bound collection mint on Solana");
    println!("  {}", "─".repeat(62));
    println!("  Program   {PROGRAM_ID}");
    println!("  Network   Solana devnet (default; override with --rpc-url)");
    println!("  Pricing   5 counter-driven tiers — run `collection-info` to inspect");
    println!("  Docs      https://github.com/xstar-dev/sbt-mint");
    println!();
}

// ─── CLI definition ───────────────────────────────────────────────────────────

/// sbt-mint — soul-bound NFT collection mint on Solana.
///
/// Every command supports --json for machine-readable output.
/// Global options can also be set via environment variables:
///   SBT_RPC_URL     — Solana JSON-RPC endpoint
///   SBT_KEYPAIR     — path to Ed25519 keypair JSON
///   SBT_PROGRAM_ID  — mint program id (for local deployments)
#[derive(Parser)]
#[command(
    name        = "sbt-mint",
    version     = env!("CARGO_PKG_VERSION"),
    long_version = concat!(
        env!("CARGO_PKG_VERSION"), "\n",
        "Program:    8nQ4PwDCH3uWrdjZ7YPVGKhkbbmfh4QAFgfvJzmJBJSK\n",
        "Network:    Solana devnet (default)\n",
        "Pricing:    5 tiers, driven by the collection counter\n",
        "License:    MIT",
    ),
    author  = "xstar",
    about   = "Deploy and operate a soul-bound NFT collection mint program on Solana.",
    after_help = "\
ENVIRONMENT:
  SBT_RPC_URL     Solana JSON-RPC endpoint  [default: https://api.devnet.solana.com]
  SBT_KEYPAIR     Path to Ed25519 keypair JSON  [default: ~/.config/solana/id.json]
  SBT_PROGRAM_ID  Mint program id  [default: 8nQ4PwDCH3uWrdjZ7YPVGKhkbbmfh4QAFgfvJzmJBJSK]

QUICK START:
  sbt-mint init-collection --name \"Test Collection\" --symbol TEST \\
    --uri https://arweave.net/collection-uri
  sbt-mint current-price
  sbt-mint mint --name \"Test NFT\" --symbol TEST --uri https://arweave.net/nft-uri
  sbt-mint collection-info"
)]
struct Cli {
    /// Solana JSON-RPC endpoint
    #[arg(
        long,
        global     = true,
        value_name = "URL",
        default_value = DEVNET_RPC,
        env = "SBT_RPC_URL"
    )]
    rpc_url: String,

    /// Path to the signing Ed25519 keypair JSON file
    #[arg(
        long,
        global     = true,
        value_name = "PATH",
        default_value = "~/.config/solana/id.json",
        env = "SBT_KEYPAIR"
    )]
    keypair: String,

    /// Mint program id (override for locally deployed programs)
    #[arg(
        long,
        global     = true,
        value_name = "PUBKEY",
        default_value = PROGRAM_ID,
        env = "SBT_PROGRAM_ID"
    )]
    program_id: String,

    /// Confirmation commitment for submitted transactions.
    /// Preflight simulation always runs at `processed`.
    #[arg(long, global = true, value_name = "LEVEL", default_value = "confirmed")]
    commitment: String,

    /// Output machine-readable JSON instead of human-readable text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the collection NFT and the config record (one-shot)
    ///
    /// The collection mint and config are PDAs, so this runs exactly once
    /// per program deployment. Afterwards the counter reads 0 and the
    /// default price schedule (tier 1 free, tier 2 at 0.2 SOL, …) is live.
    #[command(
        name = "init-collection",
        after_help = "\
EXAMPLES:
  sbt-mint init-collection --name \"Test Collection\" --symbol TEST \\
    --uri https://arweave.net/collection-uri

  # Wait for finalized confirmation (e.g. in deploy pipelines)
  sbt-mint init-collection --name \"Test Collection\" --symbol TEST \\
    --uri https://arweave.net/collection-uri --commitment finalized

NOTES:
  The signer becomes the config authority — only it may run `update-prices`.
  Re-running fails on-chain: the collection PDAs already exist."
    )]
    InitCollection {
        /// Collection name (≤ 32 bytes)
        #[arg(long, value_name = "NAME")]
        name: String,

        /// Collection symbol (≤ 10 bytes)
        #[arg(long, value_name = "SYMBOL")]
        symbol: String,

        /// Metadata URI (≤ 200 bytes)
        #[arg(long, value_name = "URI")]
        uri: String,
    },

    /// Mint one soul-bound token to the signing keypair
    ///
    /// A fresh mint keypair is generated and co-signed automatically.
    /// The on-chain name becomes `"{name} #{token_id}"`; the active-tier
    /// price is transferred to the program treasury.
    #[command(
        after_help = "\
EXAMPLES:
  sbt-mint mint --name \"Test NFT\" --symbol TEST --uri https://arweave.net/nft-uri
  sbt-mint mint --name \"Test NFT\" --symbol TEST --uri https://arweave.net/nft-uri --json

NOTES:
  Run `current-price` first to see what the mint will cost.
  The token is non-transferable — it stays in the minting wallet."
    )]
    Mint {
        /// Base token name (≤ 32 bytes; the id suffix is added on-chain)
        #[arg(long, value_name = "NAME")]
        name: String,

        /// Token symbol (≤ 10 bytes)
        #[arg(long, value_name = "SYMBOL")]
        symbol: String,

        /// Metadata URI (≤ 200 bytes)
        #[arg(long, value_name = "URI")]
        uri: String,
    },

    /// Show what the next mint costs
    ///
    /// Asks the program itself via a simulated get_current_price call
    /// (nothing lands on-chain) and cross-checks against the tier schedule
    /// read from the config account.
    #[command(
        name = "current-price",
        after_help = "\
EXAMPLES:
  sbt-mint current-price
  sbt-mint current-price --json

  # The on-chain view simulates at `processed` commitment; no fee is paid."
    )]
    CurrentPrice,

    /// Show the collection counter, authority, and full price schedule
    ///
    /// Read-only — no transaction sent.
    #[command(
        name = "collection-info",
        after_help = "\
EXAMPLES:
  sbt-mint collection-info
  sbt-mint collection-info --json"
    )]
    CollectionInfo,

    /// Overwrite all five tier prices (authority only)
    ///
    /// The signing keypair must match the config authority or the program
    /// rejects the transaction. New prices take effect for the very next mint.
    #[command(
        name = "update-prices",
        after_help = "\
EXAMPLES:
  # 0.1 / 0.2 / 0.3 / 0.4 / 0.5 SOL
  sbt-mint update-prices --price1 100000000 --price2 200000000 \\
    --price3 300000000 --price4 400000000 --price5 500000000

NOTES:
  Prices are lamports (1 SOL = 1_000_000_000 lamports).
  Tier thresholds are fixed by the program; only prices are updatable."
    )]
    UpdatePrices {
        /// Tier 1 price in lamports (active while counter < level2)
        #[arg(long, value_name = "LAMPORTS")]
        price1: u64,

        /// Tier 2 price in lamports
        #[arg(long, value_name = "LAMPORTS")]
        price2: u64,

        /// Tier 3 price in lamports
        #[arg(long, value_name = "LAMPORTS")]
        price3: u64,

        /// Tier 4 price in lamports
        #[arg(long, value_name = "LAMPORTS")]
        price4: u64,

        /// Tier 5 price in lamports
        #[arg(long, value_name = "LAMPORTS")]
        price5: u64,
    },

    /// Rewrite the collection metadata URI
    #[command(
        name = "update-metadata",
        after_help = "\
EXAMPLES:
  sbt-mint update-metadata --uri https://arweave.net/new-collection-uri"
    )]
    UpdateMetadata {
        /// New metadata URI (≤ 200 bytes)
        #[arg(long, value_name = "URI")]
        uri: String,
    },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    // When invoked with no arguments, show banner + full help and exit cleanly.
    if std::env::args().len() == 1 {
        print_banner();
        Cli::command().print_long_help().ok();
        println!();
        return Ok(());
    }

    let cli = Cli::parse();

    let program_id = Pubkey::from_str(&cli.program_id)
        .map_err(|_| anyhow!("--program-id '{}' is not a valid base-58 pubkey", cli.program_id))?;
    let client = SbtMintClient::new(cli.rpc_url.clone())
        .with_program_id(program_id)
        .with_commitment(parse_commitment(&cli.commitment)?);

    match &cli.command {
        Commands::InitCollection { name, symbol, uri } => {
            cmd_init_collection(&client, &cli.keypair, name, symbol, uri, cli.json).await?;
        }
        Commands::Mint { name, symbol, uri } => {
            cmd_mint(&client, &cli.keypair, name, symbol, uri, cli.json).await?;
        }
        Commands::CurrentPrice => {
            cmd_current_price(&client, &cli.keypair, cli.json).await?;
        }
        Commands::CollectionInfo => {
            cmd_collection_info(&client, cli.json).await?;
        }
        Commands::UpdatePrices { price1, price2, price3, price4, price5 } => {
            cmd_update_prices(
                &client, &cli.keypair,
                [*price1, *price2, *price3, *price4, *price5],
                cli.json,
            ).await?;
        }
        Commands::UpdateMetadata { uri } => {
            cmd_update_metadata(&client, &cli.keypair, uri, cli.json).await?;
        }
    }

    Ok(())
}

// ─── init-collection ─────────────────────────────────────────────────────────

async fn cmd_init_collection(
    client: &SbtMintClient,
    keypair_path: &str,
    name: &str,
    symbol: &str,
    uri: &str,
    json_output: bool,
) -> Result<()> {
    let payer = load_keypair(keypair_path)?;

    let result = client
        .initialize_collection(
            &payer,
            CollectionParams {
                name:   name.to_string(),
                symbol: symbol.to_string(),
                uri:    uri.to_string(),
            },
        )
        .await
        .context("initialize_collection transaction failed")?;

    // Read the config back so the operator sees the state that actually landed.
    let info = client
        .collection_info()
        .await
        .context("collection initialized but the config account could not be read back")?;

    if json_output {
        println!("{}", json!({
            "status":           "ok",
            "command":          "init-collection",
            "collection_mint":  result.collection_mint.to_string(),
            "metadata":         result.collection_metadata.to_string(),
            "master_edition":   result.collection_master_edition.to_string(),
            "config":           result.config.to_string(),
            "token_account":    result.token_account.to_string(),
            "authority":        info.authority.to_string(),
            "current_id":       info.current_id,
            "prices":           info.prices,
            "tx":               result.signature,
        }));
    } else {
        println!("─── Collection Initialized ───────────────────────────────────────");
        println!("  Name             {name}  ({symbol})");
        println!("  Collection mint  {}", result.collection_mint);
        println!("  Metadata         {}", result.collection_metadata);
        println!("  Master edition   {}", result.collection_master_edition);
        println!("  Config           {}", result.config);
        println!("  Authority        {}", info.authority);
        println!("  Counter          {:>20}", info.current_id);
        println!("  Tier 1 price     {:>20}", format_price(info.prices[0]));
        println!("  Tier 2 price     {:>20}", format_price(info.prices[1]));
        println!("  Transaction      {}", result.signature);
        println!();
        println!("  Run `sbt-mint mint --name <NAME> --symbol <SYM> --uri <URI>` to mint.");
    }
    Ok(())
}

// ─── mint ────────────────────────────────────────────────────────────────────

async fn cmd_mint(
    client: &SbtMintClient,
    keypair_path: &str,
    name: &str,
    symbol: &str,
    uri: &str,
    json_output: bool,
) -> Result<()> {
    let payer = load_keypair(keypair_path)?;

    let result = client
        .mint(
            &payer,
            MintParams {
                name:   name.to_string(),
                symbol: symbol.to_string(),
                uri:    uri.to_string(),
            },
        )
        .await
        .context("mint transaction failed")?;

    if json_output {
        println!("{}", json!({
            "status":         "ok",
            "command":        "mint",
            "token_id":       result.token_id,
            "mint":           result.mint.to_string(),
            "token_account":  result.token_account.to_string(),
            "metadata":       result.metadata.to_string(),
            "master_edition": result.master_edition.to_string(),
            "price_lamports": result.price_lamports,
            "recipient":      payer.pubkey().to_string(),
            "tx":             result.signature,
        }));
    } else {
        println!("─── Token Minted ─────────────────────────────────────────────────");
        println!("  Name             {name} #{}", result.token_id);
        println!("  Mint             {}", result.mint);
        println!("  Token account    {}", result.token_account);
        println!("  Recipient        {}", payer.pubkey());
        println!("  Price paid       {:>20}", format_price(result.price_lamports));
        println!("  Transaction      {}", result.signature);
        println!();
        println!("  The token is soul-bound — transfers out of this wallet will fail.");
    }
    Ok(())
}

// ─── current-price ───────────────────────────────────────────────────────────

async fn cmd_current_price(
    client: &SbtMintClient,
    keypair_path: &str,
    json_output: bool,
) -> Result<()> {
    let payer = load_keypair(keypair_path)?;

    // On-chain view is authoritative; the off-chain quote adds tier context.
    let viewed = client.view_current_price(&payer.pubkey()).await?;
    let quote  = client.current_price().await?;

    if viewed != quote.price_lamports {
        eprintln!(
            "Warning: on-chain view ({viewed}) and config quote ({}) disagree — \
             the counter may have moved between calls",
            quote.price_lamports
        );
    }

    if json_output {
        println!("{}", json!({
            "status":          "ok",
            "command":         "current-price",
            "price_lamports":  viewed,
            "price_sol":       lamports_to_sol(viewed),
            "tier":            quote.tier,
            "current_id":      quote.current_id,
            "next_tier_at":    quote.next_tier_at,
            "next_tier_price": quote.next_tier_price,
        }));
    } else {
        println!("─── Current Mint Price ───────────────────────────────────────────");
        println!("  Price            {:>20}", format_price(viewed));
        println!("  Active tier      {:>20}", quote.tier);
        println!("  Tokens minted    {:>20}", quote.current_id);
        match (quote.next_tier_at, quote.next_tier_price) {
            (Some(at), Some(price)) => {
                println!("  Next tier        at {} minted → {}", at, format_price(price));
            }
            _ => println!("  Next tier        — (top tier reached)"),
        }
    }
    Ok(())
}

// ─── collection-info ─────────────────────────────────────────────────────────

async fn cmd_collection_info(client: &SbtMintClient, json_output: bool) -> Result<()> {
    let info = client.collection_info().await?;

    if json_output {
        println!("{}", json!({
            "status":          "ok",
            "command":         "collection-info",
            "config":          info.config.to_string(),
            "collection_mint": info.collection_mint.to_string(),
            "authority":       info.authority.to_string(),
            "current_id":      info.current_id,
            "levels":          info.levels,
            "prices":          info.prices,
            "current_price":   info.current_price,
            "tier":            info.tier,
            "next_tier_at":    info.next_tier_at,
        }));
    } else {
        println!("─── Collection Info ──────────────────────────────────────────────");
        println!("  Config           {}", info.config);
        println!("  Collection mint  {}", info.collection_mint);
        println!("  Authority        {}", info.authority);
        println!("  Tokens minted    {:>20}", info.current_id);
        println!();
        println!("  ─── Price Schedule ───────────────────────────────");
        for (i, (level, price)) in info.levels.iter().zip(info.prices.iter()).enumerate() {
            let marker = if (i + 1) as u8 == info.tier { "▸" } else { " " };
            println!(
                "  {marker} Tier {}        from {:>9} minted    {}",
                i + 1,
                level,
                format_price(*price)
            );
        }
        println!();
        println!("  Current price    {:>20}", format_price(info.current_price));
    }
    Ok(())
}

// ─── update-prices ───────────────────────────────────────────────────────────

async fn cmd_update_prices(
    client: &SbtMintClient,
    keypair_path: &str,
    prices: [u64; 5],
    json_output: bool,
) -> Result<()> {
    let authority = load_keypair(keypair_path)?;

    let result = client
        .update_prices(&authority, UpdatePricesParams { prices })
        .await
        .context(
            "update_prices transaction failed — \
             is the signing keypair the collection authority?",
        )?;

    // Read back, mirroring what an operator would check by hand.
    let info = client.collection_info().await?;

    if json_output {
        println!("{}", json!({
            "status":  "ok",
            "command": "update-prices",
            "prices":  info.prices,
            "tx":      result.signature,
        }));
    } else {
        println!("─── Prices Updated ───────────────────────────────────────────────");
        for (i, price) in info.prices.iter().enumerate() {
            println!("  Tier {} price     {:>20}", i + 1, format_price(*price));
        }
        println!("  Transaction      {}", result.signature);
        println!();
        println!("  New prices apply from the very next mint.");
    }
    Ok(())
}

// ─── update-metadata ─────────────────────────────────────────────────────────

async fn cmd_update_metadata(
    client: &SbtMintClient,
    keypair_path: &str,
    uri: &str,
    json_output: bool,
) -> Result<()> {
    let payer = load_keypair(keypair_path)?;

    let result = client
        .update_metadata(&payer, uri)
        .await
        .context("update_metadata transaction failed")?;

    if json_output {
        println!("{}", json!({
            "status":  "ok",
            "command": "update-metadata",
            "uri":     result.uri,
            "tx":      result.signature,
        }));
    } else {
        println!("─── Metadata Updated ─────────────────────────────────────────────");
        println!("  New URI          {}", result.uri);
        println!("  Transaction      {}", result.signature);
    }
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commitment_parsing() {
        assert_eq!(parse_commitment("processed").unwrap(), CommitmentConfig::processed());
        assert_eq!(parse_commitment("confirmed").unwrap(), CommitmentConfig::confirmed());
        assert_eq!(parse_commitment("finalized").unwrap(), CommitmentConfig::finalized());
        assert!(parse_commitment("final").is_err());
    }

    #[test]
    fn price_formatting() {
        assert_eq!(format_price(200_000_000), "200000000  (0.200 SOL)");
        assert_eq!(format_price(0), "0  (0.000 SOL)");
    }

    #[test]
    fn cli_parses_update_prices() {
        let cli = Cli::try_parse_from([
            "sbt-mint", "update-prices",
            "--price1", "100000000",
            "--price2", "200000000",
            "--price3", "300000000",
            "--price4", "400000000",
            "--price5", "500000000",
        ])
        .unwrap();
        match cli.command {
            Commands::UpdatePrices { price1, price5, .. } => {
                assert_eq!(price1, 100_000_000);
                assert_eq!(price5, 500_000_000);
            }
            _ => panic!("wrong command parsed"),
        }
    }
}
