//! Rounding helpers for integer division.
//!
//! [`div_round`] is the `u128` building block behind
//! [`Decimals::from_internal`](crate::domain::Decimals::from_internal);
//! [`div_round_wide`] is its 256-bit twin, and [`mul_div`] divides a
//! product that may exceed 128 bits.
//!
//! # Convention
//!
//! Engine outputs always truncate ([`Rounding::Down`]): the user receives
//! less and the pool never pays out a unit it cannot back.  `Up` is for
//! conservative reporting only.
//!
//! # Examples
//!
//! ```
//! use stable_allocator::domain::Rounding;
//! use stable_allocator::math::div_round;
//!
//! assert_eq!(div_round(10, 3, Rounding::Down), Some(3));
//! assert_eq!(div_round(10, 3, Rounding::Up), Some(4));
//! assert_eq!(div_round(10, 0, Rounding::Down), None);
//! ```

use primitive_types::U256;

use super::wide::narrow;
use crate::domain::Rounding;
use crate::error::EngineError;

/// Integer division of `u128` values with explicit rounding direction.
///
/// Returns [`None`] if `denominator` is zero.
#[must_use]
pub const fn div_round(numerator: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let q = numerator / denominator;
    // A remainder means q < numerator, so q + 1 fits.
    if rounding.bumps(numerator % denominator) {
        Some(q + 1)
    } else {
        Some(q)
    }
}

/// [`div_round`] over 256-bit operands.
///
/// Returns [`None`] if `denominator` is zero.
#[must_use]
pub fn div_round_wide(numerator: U256, denominator: U256, rounding: Rounding) -> Option<U256> {
    if denominator.is_zero() {
        return None;
    }
    let (q, r) = numerator.div_mod(denominator);
    // Only zero-ness matters; a remainder wider than 128 bits is nonzero.
    let remainder = if r.bits() > 128 { u128::MAX } else { r.low_u128() };
    // A remainder means q < numerator, so q + 1 fits.
    if rounding.bumps(remainder) {
        Some(q + U256::one())
    } else {
        Some(q)
    }
}

/// `a · b / denominator` with a 256-bit intermediate product.
///
/// # Errors
///
/// - [`EngineError::DivisionByZero`] if `denominator` is zero.
/// - [`EngineError::Overflow`] if the quotient does not fit in `u128`.
///
/// # Examples
///
/// ```
/// use stable_allocator::domain::Rounding;
/// use stable_allocator::math::mul_div;
///
/// let big = u128::MAX / 2;
/// assert_eq!(mul_div(big, 4, 8, Rounding::Down), Ok(big / 2));
/// ```
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> crate::error::Result<u128> {
    if denominator == 0 {
        return Err(EngineError::DivisionByZero);
    }
    // u128 · u128 always fits in 256 bits.
    let product = U256::from(a) * U256::from(b);
    let q = div_round_wide(product, U256::from(denominator), rounding)
        .ok_or(EngineError::DivisionByZero)?;
    narrow(q, "mul_div quotient exceeds u128")
}
