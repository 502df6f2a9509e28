//! Property-based tests using `proptest` for pair invariants.
//!
//! 1. **Initial mint** — first deposit mints `⌊√(a·b)⌋` shares.
//! 2. **Invariant preservation** — `k` never decreases across swaps and
//!    strictly increases with a non-zero fee.
//! 3. **Swap reversibility** — round-trip A→B→A returns ≤ original.
//! 4. **Liquidity conservation** — add then remove returns ≤ deposit, and
//!    remove then re-add of the payout restores the burned shares (exactly
//!    when the payout is exact, never more otherwise).
//! 5. **Full drain** — the sole holder burning everything empties the pool.
//! 6. **Share accounting** — holder balances always sum to the supply.

use proptest::prelude::*;

use crate::config::PairConfig;
use crate::domain::{Address, Amount, FeeTier, Shares};
use crate::ledger::MemoryLedger;
use crate::math::{isqrt, U256};
use crate::pools::Pair;
use crate::traits::TokenLedger;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const SUPPLY: u128 = 1_000_000_000_000;

fn alice() -> Address {
    Address::from_low_u64(0xa11ce)
}

fn bob() -> Address {
    Address::from_low_u64(0xb0b)
}

fn pair_address() -> Address {
    Address::from_low_u64(0x9a1)
}

/// Ledger with two zero-decimal tokens funded for `alice()` and `bob()`,
/// plus an initialised pair with the given fee.
fn make_pool(fee: FeeTier) -> (MemoryLedger, Pair) {
    let mut ledger = MemoryLedger::new();
    let (Ok(a), Ok(b)) = (
        ledger.deploy_token("Alpha", "A", 0, SUPPLY, alice()),
        ledger.deploy_token("Beta", "B", 0, SUPPLY, alice()),
    ) else {
        panic!("deploy failed");
    };
    let (Ok(()), Ok(())) = (
        ledger.mint(a, bob(), Amount::new(SUPPLY)),
        ledger.mint(b, bob(), Amount::new(SUPPLY)),
    ) else {
        panic!("mint failed");
    };
    let Ok(config) = PairConfig::new(fee) else {
        panic!("valid config");
    };
    let Ok(mut pair) = Pair::new(pair_address(), &config) else {
        panic!("valid pair");
    };
    let Ok(()) = pair.initialize(a, b) else {
        panic!("fresh pair");
    };
    (ledger, pair)
}

fn grant(ledger: &mut MemoryLedger, owner: Address, token: Address, amount: u128) {
    let Ok(()) = ledger.approve(token, owner, pair_address(), Amount::new(amount)) else {
        panic!("approve failed");
    };
}

fn seed(ledger: &mut MemoryLedger, pair: &mut Pair, who: Address, a0: u128, a1: u128) -> Shares {
    grant(ledger, who, pair.token0(), a0);
    grant(ledger, who, pair.token1(), a1);
    let Ok(shares) = pair.add_liquidity(ledger, who, Amount::new(a0), Amount::new(a1)) else {
        panic!("add_liquidity failed");
    };
    shares
}

fn swap(ledger: &mut MemoryLedger, pair: &mut Pair, who: Address, token: Address, amount: u128) -> Amount {
    grant(ledger, who, token, amount);
    let Ok(result) = pair.swap(ledger, who, token, Amount::new(amount)) else {
        panic!("swap failed");
    };
    result.amount_out()
}

fn as_u128(amount: Amount) -> u128 {
    let Ok(value) = u128::try_from(amount.get()) else {
        panic!("amount exceeds u128");
    };
    value
}

fn k_of(pair: &Pair) -> U256 {
    let Ok(k) = pair.k() else {
        panic!("k overflow");
    };
    k
}

/// Reserve values in range [10_000, 10_000_000] to avoid extremes.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000u128
}

/// Fee tiers up to 1%.
fn fee_strategy() -> impl Strategy<Value = FeeTier> {
    prop_oneof![
        Just(FeeTier::ZERO),
        Just(FeeTier::TIER_0_05_PERCENT),
        Just(FeeTier::TIER_0_30_PERCENT),
        Just(FeeTier::TIER_1_00_PERCENT),
    ]
}

// ---------------------------------------------------------------------------
// 1. Initial mint
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_initial_mint_is_floor_sqrt(a0 in 1u128..=SUPPLY, a1 in 1u128..=SUPPLY) {
        let (mut ledger, mut pair) = make_pool(FeeTier::default());
        let shares = seed(&mut ledger, &mut pair, alice(), a0, a1);
        let product = U256::from(a0) * U256::from(a1);
        prop_assert_eq!(Some(shares.get()), isqrt(product));
        let s = shares.get();
        prop_assert!(s * s <= product);
        prop_assert!((s + U256::one()) * (s + U256::one()) > product);
    }
}

// ---------------------------------------------------------------------------
// 2. Invariant preservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_k_never_decreases(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        fee in fee_strategy(),
        swaps in prop::collection::vec((any::<bool>(), 1u128..=50_000u128), 1..8),
    ) {
        let (mut ledger, mut pair) = make_pool(fee);
        seed(&mut ledger, &mut pair, alice(), r0, r1);
        for (zero_for_one, amount) in swaps {
            let token = if zero_for_one { pair.token0() } else { pair.token1() };
            let k_before = k_of(&pair);
            grant(&mut ledger, bob(), token, amount);
            if pair.swap(&mut ledger, bob(), token, Amount::new(amount)).is_ok() {
                let k_after = k_of(&pair);
                if fee == FeeTier::ZERO {
                    prop_assert!(k_after >= k_before);
                } else {
                    prop_assert!(k_after > k_before);
                }
            } else {
                prop_assert_eq!(k_of(&pair), k_before);
            }
            prop_assert_eq!(ledger.balance_of(pair.token0(), pair_address()), pair.reserve0());
            prop_assert_eq!(ledger.balance_of(pair.token1(), pair_address()), pair.reserve1());
        }
    }
}

// ---------------------------------------------------------------------------
// 3. Swap reversibility
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_trip_never_profits(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        fee in fee_strategy(),
    ) {
        let (mut ledger, mut pair) = make_pool(fee);
        seed(&mut ledger, &mut pair, alice(), r0, r1);
        let amount_in = (r0 / 1_000).max(1_000);
        let (t0, t1) = (pair.token0(), pair.token1());

        let mid = swap(&mut ledger, &mut pair, bob(), t0, amount_in);
        grant(&mut ledger, bob(), t1, as_u128(mid));
        if let Ok(back) = pair.swap(&mut ledger, bob(), t1, mid) {
            prop_assert!(
                as_u128(back.amount_out()) <= amount_in,
                "round trip returned {} for {}",
                back.amount_out(),
                amount_in
            );
        }
    }
}

// ---------------------------------------------------------------------------
// 4. Liquidity conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_add_then_remove_returns_at_most_deposit(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        d0 in 1_000u128..=1_000_000u128,
        d1 in 1_000u128..=1_000_000u128,
    ) {
        let (mut ledger, mut pair) = make_pool(FeeTier::default());
        seed(&mut ledger, &mut pair, alice(), r0, r1);
        grant(&mut ledger, bob(), pair.token0(), d0);
        grant(&mut ledger, bob(), pair.token1(), d1);
        let Ok(shares) = pair.add_liquidity(&mut ledger, bob(), Amount::new(d0), Amount::new(d1)) else {
            // deposit too small relative to pool
            return Ok(());
        };
        let Ok(out) = pair.remove_liquidity(&mut ledger, bob(), shares) else {
            return Ok(());
        };
        prop_assert!(as_u128(out.amount0()) <= d0);
        prop_assert!(as_u128(out.amount1()) <= d1);
        prop_assert!(pair.balance_of(bob()).is_zero());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_remove_then_add_restores_balanced_shares(
        seeded in reserve_strategy(),
        fraction in 1u128..=999u128,
    ) {
        // a balanced first deposit keeps reserves equal to the supply, so
        // every payout is exact
        let (mut ledger, mut pair) = make_pool(FeeTier::default());
        let shares = seed(&mut ledger, &mut pair, alice(), seeded, seeded);
        let Ok(total) = u128::try_from(shares.get()) else {
            panic!("shares exceed u128");
        };
        let burned = (total * fraction / 1_000).max(1);

        let Ok(out) = pair.remove_liquidity(&mut ledger, alice(), Shares::new(burned)) else {
            panic!("remove failed");
        };
        let readded = seed(&mut ledger, &mut pair, alice(), as_u128(out.amount0()), as_u128(out.amount1()));
        prop_assert_eq!(readded, Shares::new(burned));
        prop_assert_eq!(pair.balance_of(alice()), shares);
    }

    #[test]
    fn prop_remove_then_add_never_gains_shares(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        swap_in in 1_000u128..=100_000u128,
        fraction in 1u128..=999u128,
    ) {
        let (mut ledger, mut pair) = make_pool(FeeTier::default());
        let shares = seed(&mut ledger, &mut pair, alice(), r0, r1);
        let t0 = pair.token0();
        grant(&mut ledger, bob(), t0, swap_in);
        let _ = pair.swap(&mut ledger, bob(), t0, Amount::new(swap_in));

        let Ok(total) = u128::try_from(shares.get()) else {
            panic!("shares exceed u128");
        };
        let burned = (total * fraction / 1_000).max(1);
        let Ok(out) = pair.remove_liquidity(&mut ledger, alice(), Shares::new(burned)) else {
            return Ok(());
        };
        grant(&mut ledger, alice(), pair.token0(), as_u128(out.amount0()));
        grant(&mut ledger, alice(), pair.token1(), as_u128(out.amount1()));
        if let Ok(readded) = pair.add_liquidity(&mut ledger, alice(), out.amount0(), out.amount1()) {
            prop_assert!(readded <= Shares::new(burned));
        }
    }
}

// ---------------------------------------------------------------------------
// 5. Full drain
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_sole_holder_drains_pool(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        amount in 1u128..=100_000u128,
    ) {
        let (mut ledger, mut pair) = make_pool(FeeTier::default());
        let shares = seed(&mut ledger, &mut pair, alice(), r0, r1);
        let t0 = pair.token0();
        grant(&mut ledger, bob(), t0, amount);
        let _ = pair.swap(&mut ledger, bob(), t0, Amount::new(amount));

        let reserves = pair.reserves();
        let Ok(out) = pair.remove_liquidity(&mut ledger, alice(), shares) else {
            panic!("drain failed");
        };
        prop_assert_eq!(<(Amount, Amount)>::from(out), reserves);
        prop_assert!(pair.total_supply().is_zero());
        prop_assert_eq!(pair.reserves(), (Amount::ZERO, Amount::ZERO));
        prop_assert_eq!(ledger.balance_of(t0, pair_address()), Amount::ZERO);
        prop_assert_eq!(ledger.balance_of(pair.token1(), pair_address()), Amount::ZERO);
    }
}

// ---------------------------------------------------------------------------
// 6. Share accounting
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_balances_sum_to_supply(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        moved in 0u128..=10_000u128,
        burned in 0u128..=5_000u128,
    ) {
        let (mut ledger, mut pair) = make_pool(FeeTier::default());
        seed(&mut ledger, &mut pair, alice(), r0, r1);
        seed(&mut ledger, &mut pair, bob(), r0 / 2, r1 / 2);
        let _ = pair.transfer_shares(alice(), bob(), Shares::new(moved));
        let _ = pair.remove_liquidity(&mut ledger, bob(), Shares::new(burned));

        let Some(sum) = pair.balance_of(alice()).checked_add(&pair.balance_of(bob())) else {
            panic!("share overflow");
        };
        prop_assert_eq!(sum, pair.total_supply());
    }
}
