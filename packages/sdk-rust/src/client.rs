//! [`SbtMintClient`] — the main entry point for integrations.

use std::str::FromStr;

use base64::Engine as _;
use solana_client::{
    nonblocking::rpc_client::RpcClient,
    rpc_config::{RpcSendTransactionConfig, RpcSimulateTransactionConfig},
};
use solana_sdk::{
    commitment_config::{CommitmentConfig, CommitmentLevel},
    instruction::Instruction,
    message::Message,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};

use crate::{
    error::{Error, Result},
    instructions::{
        derive_ata, derive_collection_mint, derive_config, derive_master_edition,
        derive_metadata, get_current_price_ix, initialize_collection_ix, mint_nft_ix,
        treasury_wallet, update_metadata_ix, update_prices_ix,
    },
    pricing,
    state::{self, parse_config, parse_token_amount, ConfigState},
    types::{
        CollectionInfo, CollectionParams, InitializeResult, MintParams, MintResult, PriceQuote,
        UpdateMetadataResult, UpdatePricesParams, UpdatePricesResult,
    },
};

// ─── Constants ────────────────────────────────────────────────────────────────

const DEFAULT_PROGRAM_ID: &str = "8nQ4PwDCH3uWrdjZ7YPVGKhkbbmfh4QAFgfvJzmJBJSK";
const DEVNET_RPC:  &str = "https://api.devnet.solana.com";
const MAINNET_RPC: &str = "https://api.mainnet-beta.solana.com";

// Token Metadata program limits; the program would reject longer values anyway,
// checking here avoids burning a transaction fee on a doomed call.
const MAX_NAME_LEN:   usize = 32;
const MAX_SYMBOL_LEN: usize = 10;
const MAX_URI_LEN:    usize = 200;

// ─── Client ───────────────────────────────────────────────────────────────────

/// Async client for the soul-bound collection mint program.
///
/// ```rust,no_run
/// # use sbt_mint_sdk::{SbtMintClient, MintParams};
/// # use solana_sdk::signature::Keypair;
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = SbtMintClient::devnet();
/// let payer  = Keypair::new(); // use your funded keypair
///
/// let quote = client.current_price().await?;
/// println!("Next mint costs {} lamports (tier {})", quote.price_lamports, quote.tier);
///
/// let minted = client.mint(&payer, MintParams {
///     name:   "Test NFT".into(),
///     symbol: "TEST".into(),
///     uri:    "https://arweave.net/nft-uri".into(),
/// }).await?;
/// println!("Minted token #{}  tx: {}", minted.token_id, minted.signature);
/// # Ok(())
/// # }
/// ```
pub struct SbtMintClient {
    rpc_url:    String,
    program_id: Pubkey,
    commitment: CommitmentConfig,
}

impl SbtMintClient {
    /// Create a client pointing at any RPC endpoint.
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url:    rpc_url.into(),
            program_id: Pubkey::from_str(DEFAULT_PROGRAM_ID).unwrap(),
            commitment: CommitmentConfig::confirmed(),
        }
    }

    /// Pre-configured client for Solana devnet.
    pub fn devnet() -> Self {
        Self::new(DEVNET_RPC)
    }

    /// Pre-configured client for Solana mainnet-beta.
    pub fn mainnet() -> Self {
        Self::new(MAINNET_RPC)
    }

    /// Override the program ID (useful for locally deployed programs in tests).
    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    /// Override the confirmation commitment (default `confirmed`).
    ///
    /// Preflight simulation always runs at `processed` regardless; this only
    /// controls how final a submitted transaction must be before a write
    /// method returns.
    pub fn with_commitment(mut self, commitment: CommitmentConfig) -> Self {
        self.commitment = commitment;
        self
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    // ── Write operations ──────────────────────────────────────────────────────

    /// Create the collection NFT and the config record.
    ///
    /// One-shot per deployment: the collection mint and config are PDAs, so a
    /// second call fails on-chain with an account-already-in-use error.
    /// After this returns, the counter reads 0 and the default price schedule
    /// is in place.
    pub async fn initialize_collection(
        &self,
        payer:  &Keypair,
        params: CollectionParams,
    ) -> Result<InitializeResult> {
        validate_metadata(&params.name, &params.symbol, &params.uri)?;
        let rpc = self.rpc();

        let (collection_mint, _) = derive_collection_mint(&self.program_id);
        let (config, _)          = derive_config(&self.program_id);
        let (metadata, _)        = derive_metadata(&collection_mint);
        let (master_edition, _)  = derive_master_edition(&collection_mint);

        let ix = initialize_collection_ix(
            &self.program_id,
            &payer.pubkey(),
            &params.name,
            &params.symbol,
            &params.uri,
        );
        let sig = self.sign_and_send(&rpc, &[ix], payer, &[]).await?;

        Ok(InitializeResult {
            signature: sig.to_string(),
            collection_mint,
            collection_metadata: metadata,
            collection_master_edition: master_edition,
            config,
            token_account: derive_ata(&payer.pubkey(), &collection_mint),
        })
    }

    /// Mint one token to the payer.
    ///
    /// A fresh mint keypair is generated internally and co-signs the
    /// transaction.  The config is fetched first so the result carries the
    /// token id the program will bake into the metadata name and the
    /// active-tier price the payer is charged.
    pub async fn mint(&self, payer: &Keypair, params: MintParams) -> Result<MintResult> {
        validate_metadata(&params.name, &params.symbol, &params.uri)?;
        let rpc = self.rpc();

        let config = self.fetch_config(&rpc).await?;
        let token_id = config.current_id;
        let price_lamports = pricing::current_price(&config);

        let mint = Keypair::new();
        let ix = mint_nft_ix(
            &self.program_id,
            &payer.pubkey(),
            &mint.pubkey(),
            &params.name,
            &params.symbol,
            &params.uri,
        );
        let sig = self.sign_and_send(&rpc, &[ix], payer, &[&mint]).await?;

        let (metadata, _)       = derive_metadata(&mint.pubkey());
        let (master_edition, _) = derive_master_edition(&mint.pubkey());

        Ok(MintResult {
            signature: sig.to_string(),
            mint: mint.pubkey(),
            token_account: derive_ata(&payer.pubkey(), &mint.pubkey()),
            metadata,
            master_edition,
            token_id,
            price_lamports,
        })
    }

    /// Overwrite all five tier prices.  `authority` must match
    /// `config.authority` or the program rejects the transaction.
    pub async fn update_prices(
        &self,
        authority: &Keypair,
        params:    UpdatePricesParams,
    ) -> Result<UpdatePricesResult> {
        let rpc = self.rpc();

        let ix = update_prices_ix(&self.program_id, &authority.pubkey(), params.prices);
        let sig = self.sign_and_send(&rpc, &[ix], authority, &[]).await?;

        Ok(UpdatePricesResult {
            signature: sig.to_string(),
            prices: params.prices,
        })
    }

    /// Rewrite the collection metadata URI.
    pub async fn update_metadata(
        &self,
        payer: &Keypair,
        uri:   impl Into<String>,
    ) -> Result<UpdateMetadataResult> {
        let uri = uri.into();
        if uri.len() > MAX_URI_LEN {
            return Err(Error::InvalidArgument(format!(
                "uri is {} bytes; the metadata program caps it at {MAX_URI_LEN}",
                uri.len()
            )));
        }
        let rpc = self.rpc();

        let ix = update_metadata_ix(&self.program_id, &payer.pubkey(), &uri);
        let sig = self.sign_and_send(&rpc, &[ix], payer, &[]).await?;

        Ok(UpdateMetadataResult { signature: sig.to_string(), uri })
    }

    // ── Read operations ───────────────────────────────────────────────────────

    /// Quote the next mint's price from the fetched config.
    ///
    /// Pure read — mirrors the on-chain tier walk, no transaction involved.
    /// Use [`SbtMintClient::view_current_price`] to ask the program itself.
    pub async fn current_price(&self) -> Result<PriceQuote> {
        let rpc = self.rpc();
        let config = self.fetch_config(&rpc).await?;

        let next_tier_at = pricing::next_tier_boundary(&config, config.current_id);
        Ok(PriceQuote {
            current_id: config.current_id,
            tier: pricing::tier_for_id(&config, config.current_id),
            price_lamports: pricing::current_price(&config),
            next_tier_at,
            next_tier_price: next_tier_at.map(|at| pricing::price_for_id(&config, at)),
        })
    }

    /// Ask the program for the current price via `get_current_price`.
    ///
    /// Simulates the transaction at `processed` commitment (nothing lands
    /// on-chain) and decodes the little-endian u64 from the return data.
    /// `payer` is only the simulated fee payer; no signature is required.
    pub async fn view_current_price(&self, payer: &Pubkey) -> Result<u64> {
        let rpc = self.rpc();

        let ix = get_current_price_ix(&self.program_id);
        let tx = Transaction::new_unsigned(Message::new(&[ix], Some(payer)));

        let sim = rpc
            .simulate_transaction_with_config(
                &tx,
                RpcSimulateTransactionConfig {
                    sig_verify: false,
                    replace_recent_blockhash: true,
                    commitment: Some(CommitmentConfig::processed()),
                    ..RpcSimulateTransactionConfig::default()
                },
            )
            .await?;

        if let Some(err) = sim.value.err {
            return Err(Error::SimulationFailed(err.to_string()));
        }
        let return_data = sim.value.return_data.ok_or(Error::MissingReturnData)?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(return_data.data.0.as_bytes())
            .map_err(|e| Error::ParseError {
                offset: 0,
                reason: format!("return data is not valid base64: {e}"),
            })?;
        if bytes.len() < 8 {
            return Err(Error::ParseError {
                offset: 0,
                reason: format!("return data is {} bytes; expected 8", bytes.len()),
            });
        }
        state::read_u64(&bytes, 0)
    }

    /// Fetch the config account plus derived addresses and the active tier.
    pub async fn collection_info(&self) -> Result<CollectionInfo> {
        let rpc = self.rpc();
        let config_state = self.fetch_config(&rpc).await?;

        let (config, _)          = derive_config(&self.program_id);
        let (collection_mint, _) = derive_collection_mint(&self.program_id);

        Ok(CollectionInfo {
            config,
            collection_mint,
            authority: config_state.authority,
            current_id: config_state.current_id,
            levels: [
                config_state.level1,
                config_state.level2,
                config_state.level3,
                config_state.level4,
                config_state.level5,
            ],
            prices: [
                config_state.price_level1,
                config_state.price_level2,
                config_state.price_level3,
                config_state.price_level4,
                config_state.price_level5,
            ],
            current_price: pricing::current_price(&config_state),
            tier: pricing::tier_for_id(&config_state, config_state.current_id),
            next_tier_at: pricing::next_tier_boundary(&config_state, config_state.current_id),
        })
    }

    /// Token balance of `owner`'s associated token account for `mint`.
    pub async fn token_balance(&self, owner: &Pubkey, mint: &Pubkey) -> Result<u64> {
        let rpc = self.rpc();
        let ata = derive_ata(owner, mint);
        parse_token_amount(&rpc.get_account_data(&ata).await?)
    }

    /// Lamport balance of the program's treasury wallet.
    pub async fn treasury_balance(&self) -> Result<u64> {
        let rpc = self.rpc();
        Ok(rpc.get_balance(&treasury_wallet()).await?)
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn rpc(&self) -> RpcClient {
        RpcClient::new_with_commitment(self.rpc_url.clone(), self.commitment)
    }

    async fn sign_and_send(
        &self,
        rpc:          &RpcClient,
        instructions: &[Instruction],
        payer:        &Keypair,
        extra:        &[&Keypair],
    ) -> Result<Signature> {
        let blockhash = rpc.get_latest_blockhash().await?;
        let mut signers: Vec<&dyn Signer> = vec![payer];
        signers.extend(extra.iter().map(|k| k as &dyn Signer));
        let tx = Transaction::new_signed_with_payer(
            instructions,
            Some(&payer.pubkey()),
            &signers,
            blockhash,
        );
        Ok(rpc
            .send_and_confirm_transaction_with_spinner_and_config(
                &tx,
                self.commitment,
                RpcSendTransactionConfig {
                    preflight_commitment: Some(CommitmentLevel::Processed),
                    ..RpcSendTransactionConfig::default()
                },
            )
            .await?)
    }

    async fn fetch_config(&self, rpc: &RpcClient) -> Result<ConfigState> {
        let (config, _) = derive_config(&self.program_id);
        let data = rpc
            .get_account_data(&config)
            .await
            .map_err(|_| Error::CollectionNotInitialized(config))?;
        parse_config(&data)
    }
}

// ─── Utilities ────────────────────────────────────────────────────────────────

fn validate_metadata(name: &str, symbol: &str, uri: &str) -> Result<()> {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return Err(Error::InvalidArgument(format!(
            "name must be 1–{MAX_NAME_LEN} bytes, got {}",
            name.len()
        )));
    }
    if symbol.is_empty() || symbol.len() > MAX_SYMBOL_LEN {
        return Err(Error::InvalidArgument(format!(
            "symbol must be 1–{MAX_SYMBOL_LEN} bytes, got {}",
            symbol.len()
        )));
    }
    if uri.is_empty() || uri.len() > MAX_URI_LEN {
        return Err(Error::InvalidArgument(format!(
            "uri must be 1–{MAX_URI_LEN} bytes, got {}",
            uri.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_limits() {
        assert!(validate_metadata("Test Collection", "TEST", "https://arweave.net/x").is_ok());
        assert!(validate_metadata("", "TEST", "https://x").is_err());
        assert!(validate_metadata(&"n".repeat(33), "TEST", "https://x").is_err());
        assert!(validate_metadata("ok", &"s".repeat(11), "https://x").is_err());
        assert!(validate_metadata("ok", "TEST", &"u".repeat(201)).is_err());
    }
}
