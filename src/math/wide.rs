//! 256-bit helpers.
//!
//! StableSwap intermediates such as `D^(N+1)` or `x·rB` for 1e26-scale
//! balances exceed `u128`; the engine lifts operands into [`U256`], does
//! the arithmetic there, and narrows the result back with [`narrow`].

use primitive_types::U256;

use crate::error::EngineError;

/// Lifts a `u128` into 256 bits.
#[inline]
#[must_use]
pub fn wide(value: u128) -> U256 {
    U256::from(value)
}

/// Narrows back to `u128`, failing with [`EngineError::Overflow`] and the
/// given context when the value does not fit.
///
/// # Errors
///
/// Returns [`EngineError::Overflow`] if `value > u128::MAX`.
#[inline]
pub fn narrow(value: U256, context: &'static str) -> Result<u128, EngineError> {
    if value > U256::from(u128::MAX) {
        return Err(EngineError::Overflow(context));
    }
    Ok(value.low_u128())
}

/// Floor square root via Newton's method.
///
/// # Examples
///
/// ```
/// use primitive_types::U256;
/// use stable_allocator::math::isqrt;
///
/// assert_eq!(isqrt(U256::from(99u8)), U256::from(9u8));
/// assert_eq!(isqrt(U256::from(100u8)), U256::from(10u8));
/// ```
#[must_use]
pub fn isqrt(n: U256) -> U256 {
    if n.is_zero() {
        return n;
    }
    let mut x = n;
    // ceil(n / 2) without overflowing at U256::MAX.
    let mut y = (n >> 1) + (n & U256::one());
    while y < x {
        x = y;
        y = (x + n / x) >> 1;
    }
    x
}
