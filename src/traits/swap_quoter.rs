//! The quote seam between the allocation solver and a swap venue.
//!
//! The solver never touches pool state.  It only asks "how much of the
//! other asset does selling `amount_in` return?" through [`SwapQuoter`],
//! which keeps the search loop pure and lets tests substitute a closed-
//! form curve for the StableSwap engine.
//!
//! # Contract
//!
//! - Pure: the same inputs always produce the same output.
//! - Monotone: a larger `amount_in` never yields a smaller output.
//! - `quote(direction, 0)` returns zero.
//! - Output is net of any fee the venue charges.

use crate::domain::{Amount, SwapDirection};
use crate::error::EngineError;

/// Read-only quote of a two-asset swap.
///
/// # Implementors
///
/// - [`StableRoute`](crate::solver::StableRoute), a StableSwap pool plus the
///   basket indices of the X and Y assets.
pub trait SwapQuoter {
    /// Output of selling `amount_in` in `direction`.
    ///
    /// [`SwapDirection::XToY`] sells X for Y and [`SwapDirection::YToX`]
    /// sells Y for X.  [`SwapDirection::NoSwap`] quotes zero.
    ///
    /// # Errors
    ///
    /// Any [`EngineError`] the venue raises while pricing.
    fn quote(&self, direction: SwapDirection, amount_in: Amount) -> Result<Amount, EngineError>;
}
