//! On-chain account deserialization.
//!
//! Parses raw account bytes for `CollectionConfig` (128 bytes).
//! Byte offsets mirror the Anchor `#[account]` layout exactly.

use crate::error::{Error, Result};
use solana_sdk::pubkey::Pubkey;

// ─── CollectionConfig ─────────────────────────────────────────────────────────

/// Deserialized `CollectionConfig` account state.
///
/// Layout (after 8-byte Anchor discriminator):
/// ```text
/// current_id(8)  authority(32)
/// level1(8)  level2(8)  level3(8)  level4(8)  level5(8)
/// price_level1(8) … price_level5(8)  = 128 bytes
/// ```
#[derive(Debug, Clone)]
pub struct ConfigState {
    /// Next token id to be minted; also the number of tokens minted so far.
    pub current_id: u64,
    /// Only this key may call `update_prices`.
    pub authority: Pubkey,
    pub level1: u64,
    pub level2: u64,
    pub level3: u64,
    pub level4: u64,
    pub level5: u64,
    /// Tier prices in lamports.
    pub price_level1: u64,
    pub price_level2: u64,
    pub price_level3: u64,
    pub price_level4: u64,
    pub price_level5: u64,
}

/// Deserialize a `CollectionConfig` account from raw bytes.
pub fn parse_config(data: &[u8]) -> Result<ConfigState> {
    const EXPECTED: usize = 128;
    if data.len() < EXPECTED {
        return Err(Error::ParseError {
            offset: 0,
            reason: format!("CollectionConfig account is {} bytes; expected {}", data.len(), EXPECTED),
        });
    }
    Ok(ConfigState {
        current_id:   read_u64(data, 8)?,
        authority:    read_pubkey(data, 16)?,
        level1:       read_u64(data, 48)?,
        level2:       read_u64(data, 56)?,
        level3:       read_u64(data, 64)?,
        level4:       read_u64(data, 72)?,
        level5:       read_u64(data, 80)?,
        price_level1: read_u64(data, 88)?,
        price_level2: read_u64(data, 96)?,
        price_level3: read_u64(data, 104)?,
        price_level4: read_u64(data, 112)?,
        price_level5: read_u64(data, 120)?,
    })
}

// ─── SPL token account ────────────────────────────────────────────────────────

/// Read the `amount` field from a packed SPL token account.
///
/// Token account layout: `mint(32) owner(32) amount(8) …`
pub fn parse_token_amount(data: &[u8]) -> Result<u64> {
    if data.len() < 72 {
        return Err(Error::ParseError {
            offset: 64,
            reason: format!("Token account is {} bytes; need at least 72", data.len()),
        });
    }
    read_u64(data, 64)
}

// ─── Byte-slice primitives ────────────────────────────────────────────────────

pub(crate) fn read_pubkey(data: &[u8], offset: usize) -> Result<Pubkey> {
    let b: [u8; 32] = data[offset..offset + 32]
        .try_into()
        .map_err(|_| Error::ParseError {
            offset,
            reason: "slice too short for Pubkey (32 bytes)".into(),
        })?;
    Ok(Pubkey::from(b))
}

pub(crate) fn read_u64(data: &[u8], offset: usize) -> Result<u64> {
    let b: [u8; 8] = data[offset..offset + 8]
        .try_into()
        .map_err(|_| Error::ParseError { offset, reason: "slice too short for u64".into() })?;
    Ok(u64::from_le_bytes(b))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn put_u64(buf: &mut [u8], offset: usize, v: u64) {
        buf[offset..offset + 8].copy_from_slice(&v.to_le_bytes());
    }

    fn sample_config(current_id: u64) -> ([u8; 128], Pubkey) {
        let authority = Pubkey::new_unique();
        let mut buf = [0u8; 128];
        // Discriminator bytes are opaque to the parser; leave them zeroed.
        put_u64(&mut buf, 8, current_id);
        buf[16..48].copy_from_slice(authority.as_ref());
        for (i, level) in [0u64, 5_000, 20_000, 50_000, 100_000].iter().enumerate() {
            put_u64(&mut buf, 48 + i * 8, *level);
        }
        for (i, price) in [0u64, 200_000_000, 300_000_000, 400_000_000, 500_000_000]
            .iter()
            .enumerate()
        {
            put_u64(&mut buf, 88 + i * 8, *price);
        }
        (buf, authority)
    }

    #[test]
    fn parses_config_fields() {
        let (buf, authority) = sample_config(42);
        let config = parse_config(&buf).unwrap();

        assert_eq!(config.current_id, 42);
        assert_eq!(config.authority, authority);
        assert_eq!(config.level2, 5_000);
        assert_eq!(config.level5, 100_000);
        assert_eq!(config.price_level1, 0);
        assert_eq!(config.price_level2, 200_000_000);
        assert_eq!(config.price_level5, 500_000_000);
    }

    #[test]
    fn rejects_short_config() {
        let err = parse_config(&[0u8; 64]).unwrap_err();
        match err {
            Error::ParseError { offset, .. } => assert_eq!(offset, 0),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn reads_token_amount_at_offset_64() {
        let mut buf = [0u8; 165]; // packed SPL token account size
        put_u64(&mut buf, 64, 1);
        assert_eq!(parse_token_amount(&buf).unwrap(), 1);

        assert!(parse_token_amount(&buf[..70]).is_err());
    }
}
