//! Public parameter and result types.
//!
//! Every result derives [`serde::Serialize`] so agent integrations can pass
//! them straight to a JSON pipeline; pubkeys serialize as base-58 strings.

use serde::{Serialize, Serializer};
use solana_sdk::pubkey::Pubkey;

fn pubkey_base58<S: Serializer>(pk: &Pubkey, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(&pk.to_string())
}

// ─── initialize_collection ───────────────────────────────────────────────────

/// Metadata for the collection NFT (also reused for individual mints).
#[derive(Debug, Clone)]
pub struct CollectionParams {
    pub name:   String,
    pub symbol: String,
    pub uri:    String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InitializeResult {
    pub signature: String,
    #[serde(serialize_with = "pubkey_base58")]
    pub collection_mint: Pubkey,
    #[serde(serialize_with = "pubkey_base58")]
    pub collection_metadata: Pubkey,
    #[serde(serialize_with = "pubkey_base58")]
    pub collection_master_edition: Pubkey,
    #[serde(serialize_with = "pubkey_base58")]
    pub config: Pubkey,
    /// Authority's associated token account holding the collection NFT.
    #[serde(serialize_with = "pubkey_base58")]
    pub token_account: Pubkey,
}

// ─── mint ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct MintParams {
    /// Base name — the program appends ` #{token_id}` on-chain.
    pub name:   String,
    pub symbol: String,
    pub uri:    String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MintResult {
    pub signature: String,
    /// Fresh mint generated for this token (keypair is discarded after signing).
    #[serde(serialize_with = "pubkey_base58")]
    pub mint: Pubkey,
    #[serde(serialize_with = "pubkey_base58")]
    pub token_account: Pubkey,
    #[serde(serialize_with = "pubkey_base58")]
    pub metadata: Pubkey,
    #[serde(serialize_with = "pubkey_base58")]
    pub master_edition: Pubkey,
    /// Sequential id baked into the on-chain metadata name.
    pub token_id: u64,
    /// Lamports transferred to the treasury for this mint.
    pub price_lamports: u64,
}

// ─── update_prices ───────────────────────────────────────────────────────────

/// New lamport prices for all five tiers, cheapest first.
#[derive(Debug, Clone, Copy)]
pub struct UpdatePricesParams {
    pub prices: [u64; 5],
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdatePricesResult {
    pub signature: String,
    pub prices: [u64; 5],
}

// ─── update_metadata ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct UpdateMetadataResult {
    pub signature: String,
    pub uri: String,
}

// ─── Read results ────────────────────────────────────────────────────────────

/// Off-chain quote for the next mint, computed from the fetched config.
#[derive(Debug, Clone, Serialize)]
pub struct PriceQuote {
    pub current_id: u64,
    /// Active tier (1–5).
    pub tier: u8,
    pub price_lamports: u64,
    /// Counter value at which the next tier starts; `None` on the top tier.
    pub next_tier_at: Option<u64>,
    /// Price that will apply once `next_tier_at` is reached.
    pub next_tier_price: Option<u64>,
}

/// Snapshot of the collection config plus derived addresses.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionInfo {
    #[serde(serialize_with = "pubkey_base58")]
    pub config: Pubkey,
    #[serde(serialize_with = "pubkey_base58")]
    pub collection_mint: Pubkey,
    #[serde(serialize_with = "pubkey_base58")]
    pub authority: Pubkey,
    pub current_id: u64,
    /// Tier thresholds, in tokens minted.
    pub levels: [u64; 5],
    /// Tier prices, in lamports.
    pub prices: [u64; 5],
    pub current_price: u64,
    pub tier: u8,
    pub next_tier_at: Option<u64>,
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pubkeys_serialize_as_base58_strings() {
        let mint = Pubkey::new_unique();
        let result = MintResult {
            signature: "sig".into(),
            mint,
            token_account: Pubkey::new_unique(),
            metadata: Pubkey::new_unique(),
            master_edition: Pubkey::new_unique(),
            token_id: 7,
            price_lamports: 200_000_000,
        };

        let json: serde_json::Value = serde_json::to_value(&result).unwrap();
        assert_eq!(json["mint"], mint.to_string());
        assert_eq!(json["token_id"], 7);
    }
}
