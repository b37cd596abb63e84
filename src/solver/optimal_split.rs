//! Optimal split of two assets between a swap venue and a
//! constant-product deposit.
//!
//! Given `(x, y)` and a destination pair with reserves `(rA, rB)`, the
//! solver sells `s` of whichever side is in surplus through a
//! [`SwapQuoter`] so that the post-swap holdings match `rA : rB`, which
//! maximizes the shares a proportional deposit mints.
//!
//! # Search
//!
//! With the surplus side first,
//!
//! ```text
//! g(s) = (surplus − s) · r_deficit − (deficit + q(s)) · r_surplus
//! ```
//!
//! is positive at `s = 0` and decreases in `s` because the quote `q` is
//! monotone.  Bisection over `[0, surplus]` stops when the bracket is one
//! unit wide or `|g| <= rA + rB` (the post-swap ratio is off by less than
//! one base unit of either reserve), then keeps whichever bracket end has
//! the smaller `|g|`.

use core::cmp::Ordering;

use primitive_types::U256;
use tracing::{debug, trace, warn};

use crate::config::SolverConfig;
use crate::domain::{AllocationPlan, AllocationRequest, Amount, SwapDirection};
use crate::error::{EngineError, SolverError};
use crate::pools::ConstantProductPair;
use crate::traits::{FromConfig, SwapQuoter};

/// Signed value of `g(s)` as a sign and a magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Gap {
    sign: Ordering,
    size: U256,
}

impl Gap {
    fn of(left: U256, right: U256) -> Self {
        let sign = left.cmp(&right);
        let size = if sign == Ordering::Less {
            right - left
        } else {
            left - right
        };
        Self { sign, size }
    }
}

/// Request and reserves arranged surplus-side first.
#[derive(Debug, Clone, Copy)]
struct Orientation {
    direction: SwapDirection,
    surplus: u128,
    deficit: u128,
    reserve_surplus: U256,
    reserve_deficit: U256,
}

impl Orientation {
    fn new(request: &AllocationRequest, pair: &ConstantProductPair, direction: SwapDirection) -> Self {
        let (x, y) = (request.amount_x().get(), request.amount_y().get());
        let (ra, rb) = (pair.reserve_a().to_u256(), pair.reserve_b().to_u256());
        match direction {
            SwapDirection::YToX => Self {
                direction,
                surplus: y,
                deficit: x,
                reserve_surplus: rb,
                reserve_deficit: ra,
            },
            SwapDirection::XToY | SwapDirection::NoSwap => Self {
                direction,
                surplus: x,
                deficit: y,
                reserve_surplus: ra,
                reserve_deficit: rb,
            },
        }
    }

    fn gap(&self, s: u128, q: Amount) -> Result<Gap, EngineError> {
        let overflow = EngineError::Overflow("allocation cross product");
        let left = U256::from(self.surplus - s)
            .checked_mul(self.reserve_deficit)
            .ok_or(overflow.clone())?;
        let right = U256::from(self.deficit)
            .checked_add(q.to_u256())
            .and_then(|v| v.checked_mul(self.reserve_surplus))
            .ok_or(overflow)?;
        Ok(Gap::of(left, right))
    }

    /// Holdings `(x, y)` after selling `s` for `q`.
    fn settle(&self, s: u128, q: Amount) -> Result<(Amount, Amount), EngineError> {
        let kept = Amount::new(self.surplus - s);
        let received = Amount::new(self.deficit)
            .checked_add(&q)
            .ok_or(EngineError::Overflow("post-swap holdings"))?;
        Ok(match self.direction {
            SwapDirection::YToX => (received, kept),
            SwapDirection::XToY | SwapDirection::NoSwap => (kept, received),
        })
    }
}

/// Per-side dust ceilings `(x, y)`.
///
/// `max_dust` counts base units of the coarser coin, so the finer side's
/// ceiling grows by how many of its units one coarser unit buys at the
/// pair's price.  Pairs quoted near 1:1 keep `max_dust` on both sides.
fn dust_limits(pair: &ConstantProductPair, max_dust: Amount) -> (Amount, Amount) {
    let (ra, rb) = (pair.reserve_a().get(), pair.reserve_b().get());
    let scale = |num: u128, den: u128| num.checked_div(den).unwrap_or(1).max(1);
    (
        Amount::new(max_dust.get().saturating_mul(scale(ra, rb))),
        Amount::new(max_dust.get().saturating_mul(scale(rb, ra))),
    )
}

/// One evaluated point of the search.
#[derive(Debug, Clone, Copy)]
struct Sample {
    s: u128,
    q: Amount,
    gap: Gap,
}

/// Searches the swap amount that lines a two-asset deposit up with a
/// constant-product pair's reserve ratio.
///
/// Stateless across calls; one solver can serve any number of requests.
///
/// # Examples
///
/// ```
/// use stable_allocator::config::SolverConfig;
/// use stable_allocator::domain::{AllocationRequest, Amount, SwapDirection};
/// use stable_allocator::error::EngineError;
/// use stable_allocator::pools::ConstantProductPair;
/// use stable_allocator::solver::AllocationSolver;
/// use stable_allocator::traits::SwapQuoter;
///
/// // A lossless 1:1 venue.
/// struct Parity;
/// impl SwapQuoter for Parity {
///     fn quote(&self, _: SwapDirection, amount_in: Amount) -> Result<Amount, EngineError> {
///         Ok(amount_in)
///     }
/// }
///
/// let pair = ConstantProductPair::new(Amount::new(1_000_000), Amount::new(1_000_000)).expect("pair");
/// let solver = AllocationSolver::new(SolverConfig::default()).expect("valid config");
/// let request = AllocationRequest::new(Amount::new(30_000), Amount::new(20_000));
///
/// let plan = solver.solve(&request, &pair, &Parity).expect("plan");
/// assert_eq!(plan.swap_direction(), SwapDirection::XToY);
/// assert_eq!(plan.swap_amount(), Amount::new(5_000));
/// assert_eq!((plan.final_x(), plan.final_y()), (Amount::new(25_000), Amount::new(25_000)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocationSolver {
    config: SolverConfig,
}

impl FromConfig<SolverConfig> for AllocationSolver {
    type Error = SolverError;

    fn from_config(config: &SolverConfig) -> Result<Self, SolverError> {
        Self::new(*config)
    }
}

impl AllocationSolver {
    /// Creates a solver.
    ///
    /// # Errors
    ///
    /// Whatever [`SolverConfig::validate`] rejects.
    pub fn new(config: SolverConfig) -> Result<Self, SolverError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The solver's tunables.
    #[must_use]
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Plans the swap and deposit for `request` into `pair`, pricing the
    /// swap leg through `quoter`.
    ///
    /// # Errors
    ///
    /// - [`SolverError::EmptyRequest`] if both amounts are zero.
    /// - [`SolverError::EmptyDestination`] if the pair has no reserves.
    /// - [`SolverError::OptimizationDidNotConverge`] if the search hits its
    ///   iteration cap or cannot bracket a root.
    /// - [`SolverError::ToleranceUnreachable`] if the result misses the
    ///   ratio tolerance or the dust ceiling.
    /// - [`SolverError::Engine`] for quote failures, including
    ///   [`EngineError::SlippageExceeded`] when the swap output is below
    ///   the request's minimum.
    pub fn solve<Q: SwapQuoter>(
        &self,
        request: &AllocationRequest,
        pair: &ConstantProductPair,
        quoter: &Q,
    ) -> Result<AllocationPlan, SolverError> {
        let (x, y) = (request.amount_x(), request.amount_y());
        if x.is_zero() && y.is_zero() {
            return Err(SolverError::EmptyRequest);
        }
        if pair.is_empty() {
            return Err(SolverError::EmptyDestination);
        }

        let tolerance = self.config.tolerance();
        let deviation = pair.ratio_deviation_bps(x, y);
        if tolerance.admits(deviation) {
            debug!(deviation, %tolerance, "inputs already at the destination ratio");
            return self.plan(pair, (x, y), (Amount::ZERO, Amount::ZERO), SwapDirection::NoSwap, 0);
        }

        let direction = match (x.to_u256() * pair.reserve_b().to_u256())
            .cmp(&(y.to_u256() * pair.reserve_a().to_u256()))
        {
            Ordering::Less => SwapDirection::YToX,
            _ => SwapDirection::XToY,
        };
        let side = Orientation::new(request, pair, direction);
        debug!(%direction, surplus = side.surplus, deficit = side.deficit, deviation, "searching split");

        let (best, iterations) = self.search(&side, quoter)?;
        let (final_x, final_y) = side.settle(best.s, best.q)?;

        let achieved = pair.ratio_deviation_bps(final_x, final_y);
        if !tolerance.admits(achieved) {
            return Err(SolverError::ToleranceUnreachable {
                measure: "ratio deviation bps",
                achieved,
                limit: u128::from(tolerance.get()),
            });
        }
        let minimum = request.min_swap_output();
        if best.q < minimum {
            return Err(EngineError::SlippageExceeded {
                minimum: minimum.get(),
                actual: best.q.get(),
            }
            .into());
        }

        let plan = self.plan(pair, (final_x, final_y), (Amount::new(best.s), best.q), direction, iterations)?;
        if let Some(max_dust) = self.config.max_dust() {
            let (limit_x, limit_y) = dust_limits(pair, max_dust);
            for (dust, limit) in [(plan.dust_x(), limit_x), (plan.dust_y(), limit_y)] {
                if dust > limit {
                    return Err(SolverError::ToleranceUnreachable {
                        measure: "dust",
                        achieved: dust.get(),
                        limit: limit.get(),
                    });
                }
            }
        }
        debug!(
            swap = %plan.swap_amount(),
            output = %plan.swap_output(),
            dust_x = %plan.dust_x(),
            dust_y = %plan.dust_y(),
            iterations,
            "split converged"
        );
        Ok(plan)
    }

    /// Bisection over `[0, surplus]`; returns the chosen point and the
    /// number of midpoints evaluated.
    fn search<Q: SwapQuoter>(&self, side: &Orientation, quoter: &Q) -> Result<(Sample, u32), SolverError> {
        let tolerance = side.reserve_surplus + side.reserve_deficit;
        let quote = |s: u128| -> Result<Amount, EngineError> {
            if s == 0 {
                Ok(Amount::ZERO)
            } else {
                quoter.quote(side.direction, Amount::new(s))
            }
        };

        let mut lo = Sample {
            s: 0,
            q: Amount::ZERO,
            gap: side.gap(0, Amount::ZERO)?,
        };
        let q_hi = quote(side.surplus)?;
        let mut hi = Sample {
            s: side.surplus,
            q: q_hi,
            gap: side.gap(side.surplus, q_hi)?,
        };
        if hi.gap.sign != Ordering::Less {
            warn!(surplus = side.surplus, "selling the whole surplus does not cross the target ratio");
            return Err(SolverError::OptimizationDidNotConverge { iterations: 0 });
        }

        let mut iterations = 0u32;
        while hi.s - lo.s > 1 {
            if iterations >= self.config.max_iterations() {
                warn!(iterations, lo = lo.s, hi = hi.s, "split search hit the iteration cap");
                return Err(SolverError::OptimizationDidNotConverge { iterations });
            }
            iterations += 1;
            let s = lo.s + (hi.s - lo.s) / 2;
            let q = quote(s)?;
            let sample = Sample {
                s,
                q,
                gap: side.gap(s, q)?,
            };
            trace!(iteration = iterations, s, q = %q, above = sample.gap.sign == Ordering::Greater, "bisection step");
            if sample.gap.size <= tolerance {
                return Ok((sample, iterations));
            }
            if sample.gap.sign == Ordering::Greater {
                lo = sample;
            } else {
                hi = sample;
            }
        }

        let best = if lo.gap.size <= hi.gap.size { lo } else { hi };
        Ok((best, iterations))
    }

    /// Builds the plan for holdings `(final_x, final_y)` reached by
    /// selling `swap_amount` for `swap_output`.
    fn plan(
        &self,
        pair: &ConstantProductPair,
        (final_x, final_y): (Amount, Amount),
        (swap_amount, swap_output): (Amount, Amount),
        direction: SwapDirection,
        iterations: u32,
    ) -> Result<AllocationPlan, SolverError> {
        let (deposit_x, deposit_y) = pair.optimal_deposit(final_x, final_y)?;
        let shares = pair.mint_estimate(deposit_x, deposit_y)?;
        let dust = (
            final_x.saturating_sub(&deposit_x),
            final_y.saturating_sub(&deposit_y),
        );
        let direction = if swap_amount.is_zero() {
            SwapDirection::NoSwap
        } else {
            direction
        };
        Ok(AllocationPlan::new(
            (final_x, final_y),
            shares,
            dust,
            swap_amount,
            swap_output,
            direction,
            iterations,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::BasisPoints;

    /// `q(s) = s · num / den`.
    struct Linear {
        num: u128,
        den: u128,
    }

    impl SwapQuoter for Linear {
        fn quote(&self, _: SwapDirection, amount_in: Amount) -> Result<Amount, EngineError> {
            Ok(Amount::new(amount_in.get() * self.num / self.den))
        }
    }

    const PARITY: Linear = Linear { num: 1, den: 1 };

    struct Broken;

    impl SwapQuoter for Broken {
        fn quote(&self, _: SwapDirection, _: Amount) -> Result<Amount, EngineError> {
            Err(EngineError::InvariantNotConverged("compute_y"))
        }
    }

    fn pair(a: u128, b: u128) -> ConstantProductPair {
        let Ok(p) = ConstantProductPair::new(Amount::new(a), Amount::new(b)) else {
            panic!("valid pair");
        };
        p
    }

    fn solver(config: SolverConfig) -> AllocationSolver {
        let Ok(s) = AllocationSolver::new(config) else {
            panic!("valid config");
        };
        s
    }

    fn request(x: u128, y: u128) -> AllocationRequest {
        AllocationRequest::new(Amount::new(x), Amount::new(y))
    }

    #[test]
    fn balanced_inputs_take_the_fast_path() {
        let Ok(plan) = AllocationSolver::default().solve(&request(1_000, 1_000), &pair(5_000, 5_000), &Broken)
        else {
            panic!("expected Ok");
        };
        assert_eq!(plan.swap_direction(), SwapDirection::NoSwap);
        assert!(plan.swap_amount().is_zero());
        assert_eq!(plan.iterations(), 0);
        assert_eq!(plan.shares_estimate().get(), 1_000);
    }

    #[test]
    fn x_surplus_sells_x() {
        let Ok(plan) = AllocationSolver::default().solve(&request(30_000, 20_000), &pair(1_000_000, 1_000_000), &PARITY)
        else {
            panic!("expected Ok");
        };
        assert_eq!(plan.swap_direction(), SwapDirection::XToY);
        assert_eq!(plan.swap_amount(), Amount::new(5_000));
        assert_eq!(plan.swap_output(), Amount::new(5_000));
        assert!(plan.dust_x().is_zero() && plan.dust_y().is_zero());
        assert!(plan.iterations() > 0);
    }

    #[test]
    fn y_surplus_sells_y() {
        let Ok(plan) = AllocationSolver::default().solve(&request(20_000, 30_000), &pair(1_000_000, 1_000_000), &PARITY)
        else {
            panic!("expected Ok");
        };
        assert_eq!(plan.swap_direction(), SwapDirection::YToX);
        assert_eq!(plan.swap_amount(), Amount::new(5_000));
        assert_eq!((plan.final_x(), plan.final_y()), (Amount::new(25_000), Amount::new(25_000)));
    }

    #[test]
    fn skewed_reserves_and_lossy_venue() {
        // Pair prices one X at two Y; the venue returns 99 % of input.
        let p = pair(1_000_000_000, 2_000_000_000);
        let venue = Linear { num: 99, den: 100 };
        let Ok(plan) = AllocationSolver::default().solve(&request(0, 3_000_000), &p, &venue) else {
            panic!("expected Ok");
        };
        assert_eq!(plan.swap_direction(), SwapDirection::YToX);
        assert!(p.ratio_deviation_bps(plan.final_x(), plan.final_y()) <= 10);
        assert!(plan.dust_x().get() < 100 && plan.dust_y().get() < 100);
    }

    #[test]
    fn tiny_amounts_miss_the_ratio_tolerance() {
        let doubling = Linear { num: 2, den: 1 };
        let result = AllocationSolver::default().solve(&request(10, 0), &pair(1, 1), &doubling);
        assert_eq!(
            result,
            Err(SolverError::ToleranceUnreachable {
                measure: "ratio deviation bps",
                achieved: 1_667,
                limit: 10,
            })
        );
    }

    #[test]
    fn dust_ceiling_is_enforced() {
        let doubling = Linear { num: 2, den: 1 };
        let loose = SolverConfig::default().with_tolerance(BasisPoints::MAX_PERCENT);

        let Ok(plan) = solver(loose).solve(&request(10, 0), &pair(1, 1), &doubling) else {
            panic!("expected Ok");
        };
        assert_eq!((plan.final_x(), plan.final_y()), (Amount::new(7), Amount::new(6)));
        assert_eq!(plan.dust_x(), Amount::new(1));

        let strict = loose.with_max_dust(Some(Amount::ZERO));
        let result = solver(strict).solve(&request(10, 0), &pair(1, 1), &doubling);
        assert_eq!(
            result,
            Err(SolverError::ToleranceUnreachable {
                measure: "dust",
                achieved: 1,
                limit: 0,
            })
        );
    }

    #[test]
    fn dust_ceiling_scales_with_pair_price() {
        let max = Amount::new(100);
        assert_eq!(dust_limits(&pair(1_000, 1_000), max), (max, max));
        assert_eq!(dust_limits(&pair(1_000, 1_999), max), (max, max));
        assert_eq!(dust_limits(&pair(3_000, 1_000), max), (Amount::new(300), max));

        // 6-decimal X against 18-decimal Y at parity.
        let scale = 1_000_000_000_000u128;
        let mixed = pair(150_000_000 * 1_000_000, 150_000_000 * 1_000_000 * scale);
        assert_eq!(dust_limits(&mixed, max), (max, Amount::new(100 * scale)));
        assert_eq!(dust_limits(&mixed, Amount::ZERO), (Amount::ZERO, Amount::ZERO));
    }

    #[test]
    fn iteration_cap_is_enforced() {
        let halving = Linear { num: 1, den: 2 };
        let capped = SolverConfig::default().with_max_iterations(3);
        let result = solver(capped).solve(&request(1_000_007, 0), &pair(1, 1), &halving);
        assert_eq!(result, Err(SolverError::OptimizationDidNotConverge { iterations: 3 }));
    }

    #[test]
    fn no_bracket_without_output() {
        let nothing = Linear { num: 0, den: 1 };
        let result = AllocationSolver::default().solve(&request(1_000, 0), &pair(1, 1), &nothing);
        assert_eq!(result, Err(SolverError::OptimizationDidNotConverge { iterations: 0 }));
    }

    #[test]
    fn min_swap_output_guard() {
        let req = request(30_000, 20_000).with_min_swap_output(Amount::new(5_001));
        let Err(err) = AllocationSolver::default().solve(&req, &pair(1_000_000, 1_000_000), &PARITY) else {
            panic!("expected Err");
        };
        assert_eq!(
            err,
            SolverError::Engine(EngineError::SlippageExceeded {
                minimum: 5_001,
                actual: 5_000,
            })
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn engine_failures_propagate() {
        let result = AllocationSolver::default().solve(&request(30_000, 0), &pair(10, 10), &Broken);
        assert_eq!(
            result,
            Err(SolverError::Engine(EngineError::InvariantNotConverged("compute_y")))
        );
    }

    #[test]
    fn empty_inputs_rejected() {
        let solver = AllocationSolver::default();
        assert_eq!(
            solver.solve(&request(0, 0), &pair(1, 1), &PARITY),
            Err(SolverError::EmptyRequest)
        );
        let Ok(empty) = ConstantProductPair::new(Amount::ZERO, Amount::ZERO) else {
            panic!("valid pair");
        };
        assert_eq!(
            solver.solve(&request(1, 1), &empty, &PARITY),
            Err(SolverError::EmptyDestination)
        );
    }

    #[test]
    fn repeated_solves_agree() {
        let venue = Linear { num: 997, den: 1_000 };
        let p = pair(154_750_056, 154_656_157);
        let solver = AllocationSolver::default();
        let first = solver.solve(&request(30_000_000, 20_000_000), &p, &venue);
        let second = solver.solve(&request(30_000_000, 20_000_000), &p, &venue);
        assert!(first.is_ok());
        assert_eq!(first, second);
    }

    #[test]
    fn from_config_validates() {
        let Err(_) = AllocationSolver::from_config(&SolverConfig::default().with_max_iterations(0)) else {
            panic!("expected Err");
        };
    }
}
