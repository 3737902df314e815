//! sbt-mint Rust SDK
//!
//! Client for the soul-bound NFT collection mint program on Solana.
//! Derives the program's well-known addresses, builds its Anchor
//! instructions, submits transactions, and reads back account state —
//! no Anchor dependency required.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sbt_mint_sdk::{CollectionParams, MintParams, SbtMintClient};
//! use solana_sdk::signature::Keypair;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SbtMintClient::devnet();
//!     let payer  = Keypair::new(); // use your funded keypair
//!
//!     // 1. One-shot collection setup (counter = 0, default price schedule)
//!     let init = client.initialize_collection(&payer, CollectionParams {
//!         name:   "Test Collection".into(),
//!         symbol: "TEST".into(),
//!         uri:    "https://arweave.net/collection-uri".into(),
//!     }).await?;
//!     println!("Collection mint: {}", init.collection_mint);
//!
//!     // 2. Check what the next mint costs
//!     let quote = client.current_price().await?;
//!     println!("Tier {}: {} lamports", quote.tier, quote.price_lamports);
//!
//!     // 3. Mint one token to the payer
//!     let minted = client.mint(&payer, MintParams {
//!         name:   "Test NFT".into(),
//!         symbol: "TEST".into(),
//!         uri:    "https://arweave.net/nft-uri".into(),
//!     }).await?;
//!     println!("Minted #{}  tx: {}", minted.token_id, minted.signature);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Feature Overview
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`SbtMintClient::initialize_collection`] | Create the collection NFT + config record |
//! | [`SbtMintClient::mint`] | Mint one soul-bound token to the payer |
//! | [`SbtMintClient::current_price`] | Off-chain quote from the config's tier schedule |
//! | [`SbtMintClient::view_current_price`] | On-chain price view via transaction simulation |
//! | [`SbtMintClient::collection_info`] | Counter, authority, tier thresholds and prices |
//! | [`SbtMintClient::update_prices`] | Overwrite all five tier prices (authority only) |
//! | [`SbtMintClient::update_metadata`] | Rewrite the collection metadata URI |

pub mod client;
pub mod error;
pub mod instructions;
pub mod pricing;
pub mod state;
pub mod types;

pub use client::SbtMintClient;
pub use error::{Error, Result};
pub use types::*;
