//! Integer arithmetic for the engine and the solver.
//!
//! - [`CheckedArithmetic`] for overflow-safe newtype arithmetic.
//! - [`div_round`], [`div_round_wide`] and [`mul_div`] for explicit
//!   division rounding.
//! - [`wide`], [`narrow`] and [`isqrt`] for 256-bit intermediates.
//! - [`compute_d`], [`compute_y`] and [`compute_y_d`], the StableSwap
//!   Newton solvers.
//!
//! No floating point anywhere.

mod checked;
mod invariant;
mod rounding;
mod wide;

pub use checked::CheckedArithmetic;
pub use invariant::{compute_d, compute_y, compute_y_d, MAX_A, MAX_ITERATIONS};
pub use rounding::{div_round, div_round_wide, mul_div};
pub use wide::{isqrt, narrow, wide};
