//! StableSwap invariant solvers.
//!
//! For `n` balances `x_i` at 18-decimal precision and amplification `A`,
//! with `Ann = A·n`, the invariant `D` satisfies
//!
//! ```text
//! Ann·Σx + D = Ann·D + D^(n+1) / (n^n · Πx)
//! ```
//!
//! [`compute_d`] solves it for `D`; [`compute_y`] and [`compute_y_d`]
//! solve it for one balance with `D` held fixed.  All three iterate
//! Newton's method from a deterministic starting point and stop once two
//! successive iterates are within one unit, or fail after
//! [`MAX_ITERATIONS`] rounds.  Every division truncates.

use primitive_types::U256;

use super::wide::{narrow, wide};
use crate::error::EngineError;

/// Newton round cap shared by all solvers.
pub const MAX_ITERATIONS: u32 = 255;

/// Largest accepted amplification coefficient.
pub const MAX_A: u128 = 1_000_000;

fn check_amp(amp: u128) -> Result<(), EngineError> {
    if amp == 0 || amp > MAX_A {
        return Err(EngineError::InvalidConfiguration(
            "amplification must be in 1..=1_000_000",
        ));
    }
    Ok(())
}

fn check_index(index: usize, n_coins: usize) -> Result<(), EngineError> {
    if index >= n_coins {
        return Err(EngineError::InvalidIndex { index, n_coins });
    }
    Ok(())
}

#[inline]
fn converged(a: U256, b: U256) -> bool {
    let diff = if a > b { a - b } else { b - a };
    diff <= U256::one()
}

fn mul(a: U256, b: U256) -> Result<U256, EngineError> {
    a.checked_mul(b)
        .ok_or(EngineError::Overflow("invariant intermediate overflow"))
}

fn add(a: U256, b: U256) -> Result<U256, EngineError> {
    a.checked_add(b)
        .ok_or(EngineError::Overflow("invariant intermediate overflow"))
}

fn div(a: U256, b: U256) -> Result<U256, EngineError> {
    a.checked_div(b).ok_or(EngineError::DivisionByZero)
}

/// An iterate that leaves 256 bits has run away from the root.
fn diverged(label: &'static str) -> impl Fn(EngineError) -> EngineError {
    move |e| match e {
        EngineError::Overflow(_) => {
            tracing::warn!(solver = label, "Newton iterate overflowed");
            EngineError::InvariantNotConverged(label)
        }
        other => other,
    }
}

/// Computes the invariant `D` of `xp` under amplification `amp`.
///
/// An all-zero basket has `D = 0`.
///
/// # Errors
///
/// - [`EngineError::InvalidConfiguration`] if `amp` is out of range or
///   `xp` has fewer than two entries.
/// - [`EngineError::ZeroBalance`] if some but not all balances are zero.
/// - [`EngineError::InvariantNotConverged`] after [`MAX_ITERATIONS`], or
///   when a near-empty coin drives the iterate past 256 bits.
///
/// # Examples
///
/// ```
/// use stable_allocator::math::compute_d;
///
/// // A balanced pool's invariant is the plain sum.
/// let d = compute_d(&[1_000, 1_000, 1_000], 100);
/// assert_eq!(d, Ok(3_000));
/// ```
pub fn compute_d(xp: &[u128], amp: u128) -> Result<u128, EngineError> {
    compute_d_within(xp, amp, MAX_ITERATIONS)
}

fn compute_d_within(xp: &[u128], amp: u128, max_iterations: u32) -> Result<u128, EngineError> {
    check_amp(amp)?;
    if xp.len() < 2 {
        return Err(EngineError::InvalidConfiguration("at least two coins required"));
    }

    let sum = xp
        .iter()
        .try_fold(U256::zero(), |acc, &x| acc.checked_add(wide(x)))
        .ok_or(EngineError::Overflow("balance sum overflow"))?;
    if sum.is_zero() {
        return Ok(0);
    }
    if let Some(index) = xp.iter().position(|&x| x == 0) {
        return Err(EngineError::ZeroBalance { index });
    }

    let n = U256::from(xp.len());
    let ann = mul(wide(amp), n)?;
    let step = |d: U256| -> Result<U256, EngineError> {
        let mut d_p = d;
        for &x in xp {
            d_p = div(mul(d_p, d)?, mul(wide(x), n)?)?;
        }
        // (Ann·S + D_P·n)·D / ((Ann − 1)·D + (n + 1)·D_P)
        let numerator = mul(add(mul(ann, sum)?, mul(d_p, n)?)?, d)?;
        let denominator = add(mul(ann - U256::one(), d)?, mul(n + U256::one(), d_p)?)?;
        div(numerator, denominator)
    };
    let mut d = sum;
    for _ in 0..max_iterations {
        let prev = d;
        d = step(d).map_err(diverged("compute_d"))?;
        if converged(d, prev) {
            return narrow(d, "invariant exceeds u128");
        }
    }

    tracing::warn!(n_coins = xp.len(), amp, "compute_d hit the iteration cap");
    Err(EngineError::InvariantNotConverged("compute_d"))
}

/// Solves for the balance of the one coin left out of `others`, given the
/// target invariant `d`.
///
/// `others` yields the `n − 1` known balances.
fn solve_y(
    amp: u128,
    n_coins: usize,
    others: impl Iterator<Item = (usize, u128)>,
    d: U256,
    label: &'static str,
    max_iterations: u32,
) -> Result<u128, EngineError> {
    let n = U256::from(n_coins);
    let ann = mul(wide(amp), n)?;

    let mut c = d;
    let mut s = U256::zero();
    for (index, x) in others {
        if x == 0 {
            return Err(EngineError::ZeroBalance { index });
        }
        s += wide(x);
        c = div(mul(c, d)?, mul(wide(x), n)?)?;
    }
    c = div(mul(c, d)?, mul(ann, n)?)?;
    let b = add(s, div(d, ann)?)?;

    let step = |y: U256| -> Result<U256, EngineError> {
        // y² + c over 2y + b − D
        let numerator = add(mul(y, y)?, c)?;
        let denominator = add(mul(y, U256::from(2u8))?, b)?
            .checked_sub(d)
            .ok_or(EngineError::Underflow("Newton denominator below zero"))?;
        div(numerator, denominator)
    };
    let mut y = d;
    for _ in 0..max_iterations {
        let prev = y;
        y = step(y).map_err(diverged(label))?;
        if converged(y, prev) {
            return narrow(y, "balance exceeds u128");
        }
    }

    tracing::warn!(n_coins, amp, solver = label, "Newton solve hit the iteration cap");
    Err(EngineError::InvariantNotConverged(label))
}

/// Balance coin `j` must hold so that `D` is preserved when coin `i`'s
/// balance becomes `x`.
///
/// `D` is computed from the pre-swap `xp`.
///
/// # Errors
///
/// - [`EngineError::SameCoin`] if `i == j`.
/// - [`EngineError::InvalidIndex`] if either index is out of range.
/// - Any error from [`compute_d`], plus [`EngineError::ZeroBalance`] for a
///   zero balance among the fixed coins.
pub fn compute_y(i: usize, j: usize, x: u128, xp: &[u128], amp: u128) -> Result<u128, EngineError> {
    if i == j {
        return Err(EngineError::SameCoin { index: i });
    }
    check_index(i, xp.len())?;
    check_index(j, xp.len())?;

    let d = wide(compute_d(xp, amp)?);
    let others = xp.iter().enumerate().filter_map(|(k, &balance)| {
        if k == i {
            Some((k, x))
        } else if k == j {
            None
        } else {
            Some((k, balance))
        }
    });
    solve_y(amp, xp.len(), others, d, "compute_y", MAX_ITERATIONS)
}

/// Balance coin `i` must hold for the basket to reach invariant `d`, with
/// every other balance taken from `xp`.
///
/// # Errors
///
/// - [`EngineError::InvalidConfiguration`] for an out-of-range `amp`.
/// - [`EngineError::InvalidIndex`] if `i` is out of range.
/// - [`EngineError::ZeroBalance`] if another coin's balance is zero.
/// - [`EngineError::InvariantNotConverged`] after [`MAX_ITERATIONS`].
pub fn compute_y_d(amp: u128, i: usize, xp: &[u128], d: u128) -> Result<u128, EngineError> {
    check_amp(amp)?;
    check_index(i, xp.len())?;
    if d == 0 {
        return Err(EngineError::InvalidQuantity("target invariant is zero"));
    }

    let others = xp
        .iter()
        .enumerate()
        .filter(|&(k, _)| k != i)
        .map(|(k, &balance)| (k, balance));
    solve_y(amp, xp.len(), others, wide(d), "compute_y_d", MAX_ITERATIONS)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const E18: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn balanced_invariant_is_sum() {
        let Ok(d) = compute_d(&[200_000_000 * E18; 3], 1_500) else {
            panic!("expected Ok");
        };
        assert_eq!(d, 600_000_000 * E18);
    }

    #[test]
    fn empty_basket_is_zero() {
        assert_eq!(compute_d(&[0, 0, 0], 1_500), Ok(0));
    }

    #[test]
    fn partial_zero_is_rejected() {
        assert_eq!(
            compute_d(&[100, 0, 100], 1_500),
            Err(EngineError::ZeroBalance { index: 1 })
        );
    }

    #[test]
    fn amplification_bounds() {
        let Err(EngineError::InvalidConfiguration(_)) = compute_d(&[1, 1], 0) else {
            panic!("expected InvalidConfiguration");
        };
        let Err(EngineError::InvalidConfiguration(_)) = compute_d(&[1, 1], MAX_A + 1) else {
            panic!("expected InvalidConfiguration");
        };
    }

    #[test]
    fn imbalanced_invariant_below_sum() {
        let xp = [208_410_034 * E18, 267_533_680 * E18, 167_034_881 * E18];
        let Ok(d) = compute_d(&xp, 1_500) else {
            panic!("expected Ok");
        };
        let sum: u128 = xp.iter().sum();
        assert!(d < sum);
        // High amplification keeps D very close to the sum.
        assert!(sum - d < sum / 1_000);
    }

    #[test]
    fn near_empty_coin_does_not_converge() {
        assert_eq!(
            compute_d(&[1, 200_000_000 * E18, 200_000_000 * E18], 1_500),
            Err(EngineError::InvariantNotConverged("compute_d"))
        );
    }

    #[test]
    fn iteration_cap_stops_compute_d() {
        let xp = [208_410_034 * E18, 267_533_680 * E18, 167_034_881 * E18];
        assert_eq!(
            compute_d_within(&xp, 1_500, 1),
            Err(EngineError::InvariantNotConverged("compute_d"))
        );
        assert!(compute_d_within(&xp, 1_500, MAX_ITERATIONS).is_ok());
        // A balanced basket starts on its root.
        assert_eq!(compute_d_within(&[5 * E18; 3], 1_500, 1), Ok(15 * E18));
    }

    #[test]
    fn iteration_cap_stops_the_balance_solve() {
        let xp = [1_000_000 * E18, 1_000_000 * E18];
        let Ok(d) = compute_d(&xp, 100) else {
            panic!("expected Ok");
        };
        let others = [(0, 1_500_000 * E18)].into_iter();
        assert_eq!(
            solve_y(100, 2, others, wide(d), "compute_y", 1),
            Err(EngineError::InvariantNotConverged("compute_y"))
        );
        let others = [(0, 1_500_000 * E18)].into_iter();
        assert!(solve_y(100, 2, others, wide(d), "compute_y", MAX_ITERATIONS).is_ok());
    }

    #[test]
    fn compute_d_is_deterministic() {
        let xp = [123_456 * E18, 98_765 * E18];
        assert_eq!(compute_d(&xp, 85), compute_d(&xp, 85));
    }

    #[test]
    fn compute_y_preserves_invariant() {
        let xp = [1_000_000 * E18, 1_000_000 * E18, 1_000_000 * E18];
        let x = xp[0] + 1_000 * E18;
        let Ok(y) = compute_y(0, 1, x, &xp, 1_500) else {
            panic!("expected Ok");
        };
        assert!(y < xp[1]);
        // Near 1:1 at high amplification.
        assert!(xp[1] - y > 999 * E18);
        assert!(xp[1] - y < 1_000 * E18);

        let Ok(d_before) = compute_d(&xp, 1_500) else {
            panic!("expected Ok");
        };
        let Ok(d_after) = compute_d(&[x, y, xp[2]], 1_500) else {
            panic!("expected Ok");
        };
        let diff = d_before.abs_diff(d_after);
        assert!(diff <= 1_000, "invariant drift {diff}");
    }

    #[test]
    fn compute_y_rejects_bad_indices() {
        let xp = [10, 10];
        assert_eq!(compute_y(1, 1, 5, &xp, 10), Err(EngineError::SameCoin { index: 1 }));
        assert_eq!(
            compute_y(0, 2, 5, &xp, 10),
            Err(EngineError::InvalidIndex { index: 2, n_coins: 2 })
        );
    }

    #[test]
    fn compute_y_d_at_current_invariant_recovers_balance() {
        let xp = [500_000 * E18, 700_000 * E18, 600_000 * E18];
        let Ok(d) = compute_d(&xp, 200) else {
            panic!("expected Ok");
        };
        let Ok(y) = compute_y_d(200, 1, &xp, d) else {
            panic!("expected Ok");
        };
        assert!(y.abs_diff(xp[1]) <= 1_000, "recovered {y}, expected {}", xp[1]);
    }

    #[test]
    fn compute_y_d_smaller_target_shrinks_balance() {
        let xp = [500_000 * E18, 500_000 * E18];
        let Ok(d) = compute_d(&xp, 200) else {
            panic!("expected Ok");
        };
        let Ok(y) = compute_y_d(200, 0, &xp, d - 10_000 * E18) else {
            panic!("expected Ok");
        };
        assert!(y < xp[0]);
    }
}
