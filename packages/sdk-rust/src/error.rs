//! SDK error type.

use solana_sdk::pubkey::Pubkey;

/// All errors returned by the sbt-mint SDK.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ── RPC / network ────────────────────────────────────────────────────────
    /// A Solana JSON-RPC call failed.
    #[error("RPC error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    // ── Collection discovery ─────────────────────────────────────────────────
    /// The config PDA has no account — initialize_collection has not run.
    #[error("Collection not initialized — no config account at {0}")]
    CollectionNotInitialized(Pubkey),

    // ── View / simulation ────────────────────────────────────────────────────
    /// The simulated get_current_price transaction failed on-chain.
    #[error("Price view simulation failed: {0}")]
    SimulationFailed(String),

    /// The simulation succeeded but the program produced no return data.
    #[error("Price view returned no data — is the mint program deployed at this address?")]
    MissingReturnData,

    // ── Account parsing ──────────────────────────────────────────────────────
    /// Raw account bytes could not be deserialized.
    #[error("Account parse error at offset {offset}: {reason}")]
    ParseError { offset: usize, reason: String },

    // ── Validation ───────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience alias so every module can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;
