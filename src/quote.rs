//! Call-style entry points over raw integers.
//!
//! Each function builds a throwaway [`StableSwapPool`] snapshot with an
//! 18-decimal basket and no admin fee, runs one operation and returns
//! plain values.  Callers that keep pools around, mix decimals or charge
//! an admin fee should use the structured API instead.
//!
//! # Examples
//!
//! ```
//! use stable_allocator::quote;
//!
//! let balances = [1_000_000_000u128, 1_000_000_000, 1_000_000_000];
//! let out = quote::quote_swap(&balances, 0, 1, 1_000_000, 1_500, 4).expect("quote");
//! assert!(out < 1_000_000 && out > 999_000);
//! ```

use crate::config::{SolverConfig, StablePoolConfig};
use crate::domain::{
    AllocationPlan, AllocationRequest, Amount, Balances, BasisPoints, FeeSchedule, Liquidity,
};
use crate::error::{EngineError, SolverError};
use crate::pools::{ConstantProductPair, StableSwapPool};
use crate::solver::{AllocationSolver, StableRoute};
use crate::traits::FromConfig;

fn snapshot(
    balances: &[u128],
    total_supply: u128,
    amplification: u32,
    fee_bps: u32,
) -> Result<StableSwapPool, EngineError> {
    let fees = FeeSchedule::from_bps(BasisPoints::new(fee_bps))?;
    let config = StablePoolConfig::uniform(
        amplification,
        fees,
        Balances::from_raw(balances)?,
        Liquidity::new(total_supply),
    )?;
    StableSwapPool::from_config(&config)
}

/// Output of selling `amount_in` of coin `i` for coin `j`.
///
/// # Errors
///
/// Any error [`StableSwapPool::get_dy`] or the pool configuration raises,
/// e.g. [`EngineError::ZeroBalance`] or [`EngineError::InvalidIndex`].
pub fn quote_swap(
    balances: &[u128],
    i: usize,
    j: usize,
    amount_in: u128,
    amplification: u32,
    fee_bps: u32,
) -> Result<u128, EngineError> {
    let pool = snapshot(balances, 0, amplification, fee_bps)?;
    pool.get_dy(i, j, Amount::new(amount_in)).map(|out| out.get())
}

/// Shares minted by depositing `amounts`, and the balances afterwards.
///
/// # Errors
///
/// Any error [`StableSwapPool::add_liquidity`] or the pool configuration
/// raises.
pub fn quote_deposit(
    balances: &[u128],
    amounts: &[u128],
    total_supply: u128,
    amplification: u32,
    fee_bps: u32,
) -> Result<(u128, Vec<u128>), EngineError> {
    let pool = snapshot(balances, total_supply, amplification, fee_bps)?;
    let amounts: Vec<Amount> = amounts.iter().copied().map(Amount::new).collect();
    let outcome = pool.add_liquidity(&amounts)?;
    Ok((outcome.minted().get(), outcome.new_balances().to_raw()))
}

/// Plans how much of `amount_x` / `amount_y` to swap through the stable
/// basket before depositing into a constant-product pair with reserves
/// `(reserve_a, reserve_b)`.
///
/// `index_x` and `index_y` locate the two assets inside
/// `stable_balances`.  The solver runs with the default iteration cap and
/// dust ceiling.
///
/// # Errors
///
/// - [`SolverError::Engine`] for an invalid basket, pair or route.
/// - Any error [`AllocationSolver::solve`] raises.
#[allow(clippy::too_many_arguments)]
pub fn optimal_split(
    amount_x: u128,
    amount_y: u128,
    reserve_a: u128,
    reserve_b: u128,
    stable_balances: &[u128],
    (index_x, index_y): (usize, usize),
    amplification: u32,
    fee_bps: u32,
    tolerance_bps: u32,
) -> Result<AllocationPlan, SolverError> {
    let pool = snapshot(stable_balances, 0, amplification, fee_bps)?;
    let route = StableRoute::new(&pool, index_x, index_y)?;
    let pair = ConstantProductPair::new(Amount::new(reserve_a), Amount::new(reserve_b))?;
    let config = SolverConfig::default().with_tolerance(BasisPoints::new(tolerance_bps));
    let solver = AllocationSolver::new(config)?;
    let request = AllocationRequest::new(Amount::new(amount_x), Amount::new(amount_y));
    solver.solve(&request, &pair, &route)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::SwapDirection;

    const UNIT: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn swap_quote_matches_pool() {
        let balances = [2_000 * UNIT, 2_000 * UNIT];
        let Ok(out) = quote_swap(&balances, 0, 1, UNIT, 200, 4) else {
            panic!("expected Ok");
        };
        let Ok(pool) = snapshot(&balances, 0, 200, 4) else {
            panic!("valid pool");
        };
        let Ok(expected) = pool.get_dy(0, 1, Amount::new(UNIT)) else {
            panic!("expected Ok");
        };
        assert_eq!(out, expected.get());
        assert!(out < UNIT);
    }

    #[test]
    fn swap_quote_propagates_engine_errors() {
        let Err(EngineError::InvalidIndex { index: 2, n_coins: 2 }) =
            quote_swap(&[10, 10], 0, 2, 1, 100, 4)
        else {
            panic!("expected InvalidIndex");
        };
        let Err(EngineError::ZeroBalance { index: 1 }) = quote_swap(&[10, 0], 0, 1, 1, 100, 4) else {
            panic!("expected ZeroBalance");
        };
        assert!(quote_swap(&[10, 10], 0, 1, 1, 0, 4).is_err());
    }

    #[test]
    fn first_deposit_mints_sum_when_balanced() {
        let Ok((shares, balances)) = quote_deposit(&[0, 0, 0], &[UNIT, UNIT, UNIT], 0, 100, 4)
        else {
            panic!("expected Ok");
        };
        assert_eq!(shares, 3 * UNIT);
        assert_eq!(balances, vec![UNIT, UNIT, UNIT]);
    }

    #[test]
    fn imbalanced_deposit_pays_fee() {
        let start = [1_000 * UNIT, 1_000 * UNIT];
        let supply = 2_000 * UNIT;
        let Ok((balanced, _)) = quote_deposit(&start, &[10 * UNIT, 10 * UNIT], supply, 100, 4)
        else {
            panic!("expected Ok");
        };
        let Ok((lopsided, after)) = quote_deposit(&start, &[20 * UNIT, 0], supply, 100, 4) else {
            panic!("expected Ok");
        };
        assert!(lopsided < balanced);
        assert_eq!(after[0], 1_020 * UNIT);
        assert_eq!(after[1], 1_000 * UNIT);
    }

    #[test]
    fn optimal_split_sells_the_surplus_side() {
        let stable = [200_000_000 * UNIT, 200_000_000 * UNIT];
        let Ok(plan) = optimal_split(
            30_000 * UNIT,
            20_000 * UNIT,
            1_000_000 * UNIT,
            1_000_000 * UNIT,
            &stable,
            (0, 1),
            1_500,
            4,
            10,
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(plan.swap_direction(), SwapDirection::XToY);
        let swap = plan.swap_amount().get();
        assert!(swap > 4_990 * UNIT && swap < 5_010 * UNIT);
        assert!(plan.dust_x().get() < 100 && plan.dust_y().get() < 100);
    }

    #[test]
    fn optimal_split_rejects_bad_route() {
        let Err(SolverError::Engine(EngineError::SameCoin { index: 1 })) =
            optimal_split(10, 20, 100, 100, &[100, 100], (1, 1), 100, 4, 10)
        else {
            panic!("expected SameCoin");
        };
    }
}
