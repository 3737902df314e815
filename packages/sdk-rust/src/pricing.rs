//! Tier pricing math.
//!
//! Mirrors the on-chain price walk exactly so off-chain quotes match what a
//! mint transaction will actually pay.  The schedule lives in the config
//! account: five thresholds (`level1..level5`, in tokens minted) and five
//! prices (`price_level1..price_level5`, in lamports).  The active tier is
//! the highest one whose threshold is ≤ the current counter.

use crate::state::ConfigState;

/// Price in lamports the next mint will pay.
pub fn current_price(config: &ConfigState) -> u64 {
    price_for_id(config, config.current_id)
}

/// Price in lamports a mint would pay when the counter reads `id`.
pub fn price_for_id(config: &ConfigState, id: u64) -> u64 {
    if id >= config.level5 {
        config.price_level5
    } else if id >= config.level4 {
        config.price_level4
    } else if id >= config.level3 {
        config.price_level3
    } else if id >= config.level2 {
        config.price_level2
    } else {
        config.price_level1
    }
}

/// Active tier number (1–5) when the counter reads `id`.
pub fn tier_for_id(config: &ConfigState, id: u64) -> u8 {
    if id >= config.level5 {
        5
    } else if id >= config.level4 {
        4
    } else if id >= config.level3 {
        3
    } else if id >= config.level2 {
        2
    } else {
        1
    }
}

/// Counter value at which the next (more expensive) tier starts, if any.
pub fn next_tier_boundary(config: &ConfigState, id: u64) -> Option<u64> {
    [config.level2, config.level3, config.level4, config.level5]
        .into_iter()
        .find(|threshold| id < *threshold)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::pubkey::Pubkey;

    fn config(current_id: u64) -> ConfigState {
        ConfigState {
            current_id,
            authority: Pubkey::new_unique(),
            level1: 0,
            level2: 5_000,
            level3: 20_000,
            level4: 50_000,
            level5: 100_000,
            price_level1: 0,
            price_level2: 200_000_000,
            price_level3: 300_000_000,
            price_level4: 400_000_000,
            price_level5: 500_000_000,
        }
    }

    #[test]
    fn first_tier_is_free() {
        let c = config(0);
        assert_eq!(current_price(&c), 0);
        assert_eq!(tier_for_id(&c, 0), 1);
    }

    #[test]
    fn walks_up_on_each_boundary() {
        let c = config(0);
        // One below, on, and one above every threshold.
        assert_eq!(price_for_id(&c, 4_999), 0);
        assert_eq!(price_for_id(&c, 5_000), 200_000_000);
        assert_eq!(price_for_id(&c, 5_001), 200_000_000);
        assert_eq!(price_for_id(&c, 19_999), 200_000_000);
        assert_eq!(price_for_id(&c, 20_000), 300_000_000);
        assert_eq!(price_for_id(&c, 50_000), 400_000_000);
        assert_eq!(price_for_id(&c, 99_999), 400_000_000);
        assert_eq!(price_for_id(&c, 100_000), 500_000_000);
        // The top tier has no upper bound.
        assert_eq!(price_for_id(&c, u64::MAX), 500_000_000);
    }

    #[test]
    fn boundary_lookup() {
        let c = config(0);
        assert_eq!(next_tier_boundary(&c, 0), Some(5_000));
        assert_eq!(next_tier_boundary(&c, 5_000), Some(20_000));
        assert_eq!(next_tier_boundary(&c, 99_999), Some(100_000));
        assert_eq!(next_tier_boundary(&c, 100_000), None);
    }

    #[test]
    fn updated_prices_take_effect_immediately() {
        let mut c = config(0);
        c.price_level1 = 100_000_000;
        assert_eq!(current_price(&c), 100_000_000);
        assert_eq!(price_for_id(&c, 4_999), 100_000_000);
    }
}
