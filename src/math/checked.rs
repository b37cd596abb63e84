//! Checked arithmetic for the amount and share newtypes.
//!
//! [`CheckedArithmetic`] turns the `Option`-returning inherent methods into
//! `Result`s carrying an [`EngineError`] that names the failing operation,
//! so engine code can chain them with `?`.
//!
//! # Examples
//!
//! ```
//! use stable_allocator::domain::Amount;
//! use stable_allocator::math::CheckedArithmetic;
//!
//! let balance = Amount::new(100);
//! assert_eq!(balance.safe_add(&Amount::new(5)), Ok(Amount::new(105)));
//! assert!(balance.safe_sub(&Amount::new(101)).is_err());
//! ```

use crate::domain::{Amount, Liquidity};
use crate::error::EngineError;

/// Fallible arithmetic for domain wrapper types.
///
/// Errors propagate rather than saturate.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`] past `u128::MAX`.
    fn safe_add(&self, other: &Self) -> Result<Self, EngineError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, EngineError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, EngineError> {
        self.checked_add(other)
            .ok_or(EngineError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, EngineError> {
        self.checked_sub(other)
            .ok_or(EngineError::Underflow("amount subtraction underflow"))
    }
}

impl CheckedArithmetic for Liquidity {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, EngineError> {
        self.checked_add(other)
            .ok_or(EngineError::Overflow("share supply overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, EngineError> {
        self.checked_sub(other)
            .ok_or(EngineError::InsufficientShares {
                requested: other.get(),
                available: self.get(),
            })
    }
}
