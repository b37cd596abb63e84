//! Property-based tests using `proptest` for the engine and the solver.
//!
//! 1. **Invariant monotonicity**: `D` never decreases across a swap.
//! 2. **Diminishing returns**: doubling the input at most doubles the
//!    output.
//! 3. **No free lunch at balance**: a balanced pool with a fee returns
//!    less than it receives.
//! 4. **Round-trip bound**: `i → j → i` returns at most the original.
//! 5. **First deposit**: shares equal `D`, which is bounded by `n · min`
//!    and `Σ`.
//! 6. **Optimality**: solved plans sit within the ratio tolerance and
//!    searched ones strand under 100 units of dust.
//! 7. **Determinism**: identical inputs give identical plans.

use proptest::prelude::*;

use crate::config::{SolverConfig, StablePoolConfig};
use crate::domain::{AllocationRequest, Amount, Balances, BasisPoints, FeeSchedule, Liquidity};
use crate::pools::{ConstantProductPair, StableSwapPool};
use crate::solver::{AllocationSolver, StableRoute};
use crate::traits::FromConfig;

const UNIT: u128 = 1_000_000_000_000_000_000;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn fees(bps: u32) -> FeeSchedule {
    let Ok(f) = FeeSchedule::from_bps(BasisPoints::new(bps)) else {
        panic!("valid fee");
    };
    f
}

fn make_pool(balances: &[u128], amp: u32, fee_bps: u32) -> StableSwapPool {
    let Ok(b) = Balances::from_raw(balances) else {
        panic!("valid balances");
    };
    let supply = Liquidity::new(balances.iter().sum());
    let Ok(cfg) = StablePoolConfig::uniform(amp, fees(fee_bps), b, supply) else {
        panic!("valid config");
    };
    let Ok(pool) = StableSwapPool::from_config(&cfg) else {
        panic!("valid pool");
    };
    pool
}

fn make_pair(ra: u128, rb: u128) -> ConstantProductPair {
    let Ok(p) = ConstantProductPair::new(Amount::new(ra), Amount::new(rb)) else {
        panic!("valid pair");
    };
    p
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Stable balances between one million and one billion whole coins.
fn balance_strategy() -> impl Strategy<Value = u128> {
    (1_000_000u128..=1_000_000_000u128).prop_map(|v| v * UNIT)
}

/// Amplification in `[1, 5000]`.
fn amplification_strategy() -> impl Strategy<Value = u32> {
    1u32..=5_000u32
}

/// Swap size up to a hundred thousand whole coins.
fn trade_strategy() -> impl Strategy<Value = u128> {
    (1u128..=100_000u128).prop_map(|v| v * UNIT)
}

/// Swap fee in `[1, 100]` bps.
fn fee_strategy() -> impl Strategy<Value = u32> {
    1u32..=100u32
}

// ---------------------------------------------------------------------------
// Properties 1-4: swaps
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_invariant_non_decreasing_after_swap(
        b0 in balance_strategy(),
        b1 in balance_strategy(),
        b2 in balance_strategy(),
        amp in amplification_strategy(),
        fee in fee_strategy(),
        dx in trade_strategy(),
    ) {
        let mut pool = make_pool(&[b0, b1, b2], amp, fee);
        let Ok(before) = pool.invariant() else {
            return Ok(());
        };
        let Ok(outcome) = pool.exchange(0, 2, Amount::new(dx), Amount::ZERO) else {
            return Ok(());
        };
        let supply = pool.total_supply();
        prop_assert!(pool.commit(outcome.new_balances().clone(), supply).is_ok());
        let Ok(after) = pool.invariant() else {
            return Ok(());
        };
        prop_assert!(after >= before, "D fell: {} -> {}", before, after);
    }

    #[test]
    fn prop_diminishing_returns(
        b0 in balance_strategy(),
        b1 in balance_strategy(),
        amp in amplification_strategy(),
        fee in fee_strategy(),
        dx in trade_strategy(),
    ) {
        let pool = make_pool(&[b0, b1], amp, fee);
        let Ok(single) = pool.get_dy(0, 1, Amount::new(dx)) else {
            return Ok(());
        };
        let Ok(double) = pool.get_dy(0, 1, Amount::new(dx * 2)) else {
            return Ok(());
        };
        prop_assert!(double.get() >= single.get());
        // Truncation and the one-unit Newton tolerance allow a few units.
        prop_assert!(
            double.get() <= single.get() * 2 + 4,
            "out(2dx)={} > 2·out(dx)={}",
            double.get(), single.get() * 2
        );
    }

    #[test]
    fn prop_output_below_input_at_balance(
        b in balance_strategy(),
        amp in amplification_strategy(),
        fee in fee_strategy(),
        dx in trade_strategy(),
    ) {
        let pool = make_pool(&[b, b, b], amp, fee);
        let Ok(out) = pool.get_dy(1, 0, Amount::new(dx)) else {
            return Ok(());
        };
        prop_assert!(out.get() < dx, "out={} >= in={}", out.get(), dx);
    }

    #[test]
    fn prop_round_trip_loses_value(
        b0 in balance_strategy(),
        b1 in balance_strategy(),
        amp in amplification_strategy(),
        fee in 0u32..=100u32,
        dx in trade_strategy(),
    ) {
        let mut pool = make_pool(&[b0, b1], amp, fee);
        let Ok(there) = pool.exchange(0, 1, Amount::new(dx), Amount::ZERO) else {
            return Ok(());
        };
        let received = there.amount_out();
        if received.is_zero() {
            return Ok(());
        }
        let supply = pool.total_supply();
        prop_assert!(pool.commit(there.new_balances().clone(), supply).is_ok());
        let Ok(back) = pool.get_dy(1, 0, received) else {
            return Ok(());
        };
        prop_assert!(back.get() <= dx, "round trip gained: {} > {}", back.get(), dx);
    }
}

// ---------------------------------------------------------------------------
// Property 5: first deposit
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_first_deposit_mints_invariant(
        a0 in balance_strategy(),
        a1 in balance_strategy(),
        a2 in balance_strategy(),
        amp in amplification_strategy(),
    ) {
        let Ok(empty) = Balances::zeroed(3) else {
            panic!("valid balances");
        };
        let Ok(cfg) = StablePoolConfig::uniform(amp, fees(4), empty, Liquidity::ZERO) else {
            panic!("valid config");
        };
        let Ok(pool) = StableSwapPool::from_config(&cfg) else {
            panic!("valid pool");
        };
        let amounts = [Amount::new(a0), Amount::new(a1), Amount::new(a2)];
        let Ok(outcome) = pool.add_liquidity(&amounts) else {
            return Ok(());
        };
        let minted = outcome.minted().get();
        prop_assert_eq!(minted, outcome.invariant_after());
        prop_assert!(outcome.fees().iter().all(Amount::is_zero));

        let sum = a0 + a1 + a2;
        let floor = 3 * a0.min(a1).min(a2);
        prop_assert!(minted <= sum + 1, "D={} above Σ={}", minted, sum);
        prop_assert!(minted + 3 >= floor, "D={} below n·min={}", minted, floor);
    }
}

// ---------------------------------------------------------------------------
// Properties 6-7: solver
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_solved_plans_hit_ratio_without_dust(
        ra in (100_000_000u128..=200_000_000u128).prop_map(|v| v * UNIT),
        rb in (100_000_000u128..=200_000_000u128).prop_map(|v| v * UNIT),
        x in (1u128..=1_000_000u128).prop_map(|v| v * UNIT),
        y in (1u128..=1_000_000u128).prop_map(|v| v * UNIT),
        amp in 100u32..=2_000u32,
    ) {
        let stable = make_pool(&[200_000_000 * UNIT, 200_000_000 * UNIT], amp, 4);
        let Ok(route) = StableRoute::new(&stable, 0, 1) else {
            panic!("valid route");
        };
        let pair = make_pair(ra, rb);
        let solver = AllocationSolver::default();
        let request = AllocationRequest::new(Amount::new(x), Amount::new(y));

        let result = solver.solve(&request, &pair, &route);
        prop_assert!(result.is_ok(), "x={} y={} ra={} rb={}: {:?}", x, y, ra, rb, result);
        let Ok(plan) = result else {
            return Ok(());
        };
        let deviation = pair.ratio_deviation_bps(plan.final_x(), plan.final_y());
        prop_assert!(deviation <= u128::from(SolverConfig::default().tolerance().get()));
        if plan.swap_direction().swaps() {
            prop_assert!(plan.dust_x().get() < 100, "dust_x={}", plan.dust_x().get());
            prop_assert!(plan.dust_y().get() < 100, "dust_y={}", plan.dust_y().get());
        }

        let Ok(again) = solver.solve(&request, &pair, &route) else {
            panic!("second solve failed");
        };
        prop_assert_eq!(plan, again);
    }
}
