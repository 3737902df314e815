//! Low-level Anchor instruction builders.
//!
//! Each function constructs a [`solana_sdk::instruction::Instruction`] ready
//! for signing and submission.  Account order mirrors the Anchor
//! `#[derive(Accounts)]` structs in the on-chain program exactly.
//!
//! Anchor instruction discriminators: `sha256("global:{name}")[..8]`.
//! Anchor account discriminators:    `sha256("account:{TypeName}")[..8]`.
//! String arguments are Borsh-encoded: u32-LE byte length + UTF-8 bytes.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    sysvar,
};
use std::str::FromStr;

// ─── Well-known program IDs ───────────────────────────────────────────────────

pub(crate) fn spl_token_id() -> Pubkey {
    Pubkey::from_str("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA").unwrap()
}

pub(crate) fn token_2022_id() -> Pubkey {
    Pubkey::from_str("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb").unwrap()
}

pub(crate) fn ata_program_id() -> Pubkey {
    Pubkey::from_str("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL").unwrap()
}

/// Metaplex Token Metadata program — owns all metadata / master-edition PDAs.
pub fn metadata_program_id() -> Pubkey {
    Pubkey::from_str("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s").unwrap()
}

/// Treasury wallet hardcoded in the on-chain program; mint fees land here.
pub fn treasury_wallet() -> Pubkey {
    Pubkey::from_str("9msUhPoGYz2Wp2c1uhPVvsTQBYhqctVTRmZMNwZerKzk").unwrap()
}

// ─── PDA seeds (mirrors the on-chain program's constants) ────────────────────

pub const COLLECTION_SEED: &[u8] = b"collection";
pub const CONFIG_SEED:     &[u8] = b"collection_config";
pub const METADATA_SEED:   &[u8] = b"metadata";
pub const EDITION_SEED:    &[u8] = b"edition";

// ─── PDA derivation helpers ───────────────────────────────────────────────────

/// Derive the collection mint PDA.  One per program deployment.
pub fn derive_collection_mint(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[COLLECTION_SEED], program_id)
}

/// Derive the collection config PDA (counter + price tiers).
pub fn derive_config(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CONFIG_SEED], program_id)
}

/// Derive the Token Metadata account for a mint.
pub fn derive_metadata(mint: &Pubkey) -> (Pubkey, u8) {
    let metadata_program = metadata_program_id();
    Pubkey::find_program_address(
        &[METADATA_SEED, metadata_program.as_ref(), mint.as_ref()],
        &metadata_program,
    )
}

/// Derive the master-edition account for a mint.
pub fn derive_master_edition(mint: &Pubkey) -> (Pubkey, u8) {
    let metadata_program = metadata_program_id();
    Pubkey::find_program_address(
        &[
            METADATA_SEED,
            metadata_program.as_ref(),
            mint.as_ref(),
            EDITION_SEED,
        ],
        &metadata_program,
    )
}

/// Derive the Associated Token Account for a wallet + mint.
pub fn derive_ata(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
    let token_prog = spl_token_id();
    Pubkey::find_program_address(
        &[wallet.as_ref(), token_prog.as_ref(), mint.as_ref()],
        &ata_program_id(),
    )
    .0
}

// ─── Discriminator + arg encoding ────────────────────────────────────────────

fn disc(name: &str) -> [u8; 8] {
    let preimage = format!("global:{name}");
    let h = solana_sdk::hash::hash(preimage.as_bytes());
    h.to_bytes()[..8].try_into().unwrap()
}

/// Borsh string: u32-LE byte length followed by the UTF-8 bytes.
fn append_str(data: &mut Vec<u8>, s: &str) {
    data.extend_from_slice(&(s.len() as u32).to_le_bytes());
    data.extend_from_slice(s.as_bytes());
}

// ─── initialize_collection ───────────────────────────────────────────────────

/// Build the `initialize_collection` instruction.
///
/// Creates the collection mint (a PDA — no extra signer needed), its metadata
/// and master-edition accounts, and the config record with the counter at 0
/// and the default price schedule.
pub fn initialize_collection_ix(
    program_id: &Pubkey,
    authority:  &Pubkey,
    name:       &str,
    symbol:     &str,
    uri:        &str,
) -> Instruction {
    let (collection_mint, _) = derive_collection_mint(program_id);
    let (config, _)          = derive_config(program_id);
    let (metadata, _)        = derive_metadata(&collection_mint);
    let (master_edition, _)  = derive_master_edition(&collection_mint);
    let token_account        = derive_ata(authority, &collection_mint);

    let mut data = disc("initialize_collection").to_vec();
    append_str(&mut data, name);
    append_str(&mut data, symbol);
    append_str(&mut data, uri);

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*authority,              true),   // mut + signer
            AccountMeta::new(collection_mint,         false),  // mut PDA (init)
            AccountMeta::new(token_account,           false),  // mut ATA (init_if_needed)
            AccountMeta::new(metadata,                false),  // mut
            AccountMeta::new(master_edition,          false),  // mut
            AccountMeta::new(config,                  false),  // mut PDA (init)
            AccountMeta::new_readonly(metadata_program_id(), false),
            AccountMeta::new_readonly(spl_token_id(), false),
            AccountMeta::new_readonly(ata_program_id(), false),
            AccountMeta::new_readonly(Pubkey::default(), false), // system program
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ],
        data,
    }
}

// ─── mint_nft ────────────────────────────────────────────────────────────────

/// Build the `mint_nft` instruction.
///
/// `mint` must be a fresh keypair's pubkey — the program initialises it as a
/// 0-decimal mint, so the keypair must be included as an additional signer
/// when the transaction is submitted.  The token lands in the payer's ATA and
/// the active-tier price is transferred to the treasury.
pub fn mint_nft_ix(
    program_id: &Pubkey,
    payer:      &Pubkey,
    mint:       &Pubkey,
    name:       &str,
    symbol:     &str,
    uri:        &str,
) -> Instruction {
    let (collection_mint, _)           = derive_collection_mint(program_id);
    let (config, _)                    = derive_config(program_id);
    let (collection_metadata, _)       = derive_metadata(&collection_mint);
    let (collection_master_edition, _) = derive_master_edition(&collection_mint);
    let (metadata, _)                  = derive_metadata(mint);
    let (master_edition, _)            = derive_master_edition(mint);
    let token_account                  = derive_ata(payer, mint);

    let mut data = disc("mint_nft").to_vec();
    append_str(&mut data, name);
    append_str(&mut data, symbol);
    append_str(&mut data, uri);

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*payer,                    true),   // mut + signer
            AccountMeta::new(collection_mint,           false),  // mut PDA
            AccountMeta::new(collection_metadata,       false),  // mut
            AccountMeta::new(collection_master_edition, false),  // mut
            AccountMeta::new(*mint,                     true),   // mut + signer (init)
            AccountMeta::new(token_account,             false),  // mut ATA (init_if_needed)
            AccountMeta::new(metadata,                  false),  // mut
            AccountMeta::new(master_edition,            false),  // mut
            AccountMeta::new(config,                    false),  // mut (counter bump)
            AccountMeta::new(treasury_wallet(),         false),  // mut (fee transfer)
            AccountMeta::new_readonly(spl_token_id(),   false),
            AccountMeta::new_readonly(token_2022_id(),  false),
            AccountMeta::new_readonly(ata_program_id(), false),
            AccountMeta::new_readonly(metadata_program_id(), false),
            AccountMeta::new_readonly(Pubkey::default(), false), // system program
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ],
        data,
    }
}

// ─── get_current_price ───────────────────────────────────────────────────────

/// Build the `get_current_price` instruction.
///
/// A view — meant for transaction simulation; the price comes back in the
/// simulated transaction's return data as a little-endian u64.
pub fn get_current_price_ix(program_id: &Pubkey) -> Instruction {
    let (config, _) = derive_config(program_id);

    Instruction {
        program_id: *program_id,
        accounts: vec![AccountMeta::new_readonly(config, false)],
        data: disc("get_current_price").to_vec(),
    }
}

// ─── update_prices ───────────────────────────────────────────────────────────

/// Build the `update_prices` instruction.
///
/// `authority` must match `config.authority` or the program rejects the call.
pub fn update_prices_ix(
    program_id: &Pubkey,
    authority:  &Pubkey,
    prices:     [u64; 5],
) -> Instruction {
    let (config, _) = derive_config(program_id);

    let mut data = disc("update_prices").to_vec();
    for price in prices {
        data.extend_from_slice(&price.to_le_bytes());
    }

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*authority, true),   // mut + signer
            AccountMeta::new(config,     false),  // mut
        ],
        data,
    }
}

// ─── update_metadata ─────────────────────────────────────────────────────────

/// Build the `update_metadata` instruction (rewrites the collection URI).
pub fn update_metadata_ix(program_id: &Pubkey, payer: &Pubkey, uri: &str) -> Instruction {
    let (collection_mint, _) = derive_collection_mint(program_id);

    let mut data = disc("update_metadata").to_vec();
    append_str(&mut data, uri);

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*payer,          true),   // mut + signer
            AccountMeta::new(collection_mint, false),  // mut PDA
            AccountMeta::new_readonly(spl_token_id(), false),
            AccountMeta::new_readonly(metadata_program_id(), false),
            AccountMeta::new_readonly(Pubkey::default(), false), // system program
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ],
        data,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const PROGRAM_ID: &str = "8nQ4PwDCH3uWrdjZ7YPVGKhkbbmfh4QAFgfvJzmJBJSK";

    fn program_id() -> Pubkey {
        Pubkey::from_str(PROGRAM_ID).unwrap()
    }

    #[test]
    fn discriminators_match_anchor_preimages() {
        // sha256("global:{name}")[..8], precomputed
        assert_eq!(disc("initialize_collection"), [0x70, 0x3e, 0x35, 0x8b, 0xad, 0x98, 0x62, 0x5d]);
        assert_eq!(disc("mint_nft"),              [0xd3, 0x39, 0x06, 0xa7, 0x0f, 0xdb, 0x23, 0xfb]);
        assert_eq!(disc("get_current_price"),     [0x52, 0x65, 0x5a, 0x7c, 0xc0, 0x44, 0x59, 0x9f]);
        assert_eq!(disc("update_prices"),         [0x3e, 0xa1, 0xea, 0x88, 0x6a, 0x1a, 0x12, 0xa0]);
        assert_eq!(disc("update_metadata"),       [0xaa, 0xb6, 0x2b, 0xef, 0x61, 0x4e, 0xe1, 0xba]);
    }

    #[test]
    fn borsh_string_encoding() {
        let mut data = Vec::new();
        append_str(&mut data, "NAME");
        assert_eq!(&data[..4], &4u32.to_le_bytes());
        assert_eq!(&data[4..], b"NAME");
    }

    #[test]
    fn pda_derivation_is_deterministic() {
        let pid = program_id();
        let (mint_a, bump_a) = derive_collection_mint(&pid);
        let (mint_b, bump_b) = derive_collection_mint(&pid);
        assert_eq!(mint_a, mint_b);
        assert_eq!(bump_a, bump_b);

        // Config and collection mint use different seeds, so different PDAs.
        let (config, _) = derive_config(&pid);
        assert_ne!(mint_a, config);

        // Metadata PDAs are owned by the Token Metadata program, not ours.
        let (metadata, _) = derive_metadata(&mint_a);
        let (edition, _)  = derive_master_edition(&mint_a);
        assert_ne!(metadata, edition);
    }

    #[test]
    fn initialize_collection_layout() {
        let pid = program_id();
        let authority = Pubkey::new_unique();
        let ix = initialize_collection_ix(&pid, &authority, "Test Collection", "TEST", "https://arweave.net/collection-uri");

        assert_eq!(ix.program_id, pid);
        assert_eq!(ix.accounts.len(), 11);
        // Only the authority signs — the collection mint is a PDA.
        assert!(ix.accounts[0].is_signer);
        assert!(ix.accounts[0].is_writable);
        assert_eq!(ix.accounts[0].pubkey, authority);
        assert_eq!(ix.accounts.iter().filter(|m| m.is_signer).count(), 1);
        assert_eq!(ix.accounts[1].pubkey, derive_collection_mint(&pid).0);
        assert_eq!(ix.accounts[5].pubkey, derive_config(&pid).0);

        // disc + three length-prefixed strings
        assert_eq!(&ix.data[..8], &disc("initialize_collection"));
        let expected_len: usize = 8 + (4 + 15) + (4 + 4) + (4 + 34);
        assert_eq!(ix.data.len(), expected_len);
    }

    #[test]
    fn mint_nft_layout() {
        let pid = program_id();
        let payer = Pubkey::new_unique();
        let mint  = Pubkey::new_unique();
        let ix = mint_nft_ix(&pid, &payer, &mint, "Test NFT", "TEST", "https://arweave.net/nft-uri");

        assert_eq!(ix.accounts.len(), 16);
        // Payer and the fresh mint keypair both sign.
        assert!(ix.accounts[0].is_signer);
        assert!(ix.accounts[4].is_signer);
        assert_eq!(ix.accounts[4].pubkey, mint);
        assert_eq!(ix.accounts.iter().filter(|m| m.is_signer).count(), 2);
        // Token lands in the payer's ATA for the new mint.
        assert_eq!(ix.accounts[5].pubkey, derive_ata(&payer, &mint));
        // Counter account and treasury are both writable.
        assert_eq!(ix.accounts[8].pubkey, derive_config(&pid).0);
        assert!(ix.accounts[8].is_writable);
        assert_eq!(ix.accounts[9].pubkey, treasury_wallet());
        assert!(ix.accounts[9].is_writable);

        assert_eq!(&ix.data[..8], &disc("mint_nft"));
    }

    #[test]
    fn get_current_price_layout() {
        let pid = program_id();
        let ix = get_current_price_ix(&pid);
        assert_eq!(ix.accounts.len(), 1);
        assert_eq!(ix.accounts[0].pubkey, derive_config(&pid).0);
        assert!(!ix.accounts[0].is_writable);
        assert_eq!(ix.data, disc("get_current_price").to_vec());
    }

    #[test]
    fn update_prices_layout() {
        let pid = program_id();
        let authority = Pubkey::new_unique();
        let prices = [100_000_000, 200_000_000, 300_000_000, 400_000_000, 500_000_000];
        let ix = update_prices_ix(&pid, &authority, prices);

        assert_eq!(ix.accounts.len(), 2);
        assert!(ix.accounts[0].is_signer);
        assert_eq!(ix.data.len(), 8 + 5 * 8);
        assert_eq!(&ix.data[8..16], &100_000_000u64.to_le_bytes());
        assert_eq!(&ix.data[40..48], &500_000_000u64.to_le_bytes());
    }
}
