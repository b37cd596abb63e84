//! Optimal liquidity allocation.
//!
//! [`AllocationSolver`] decides how much of a two-asset holding to swap
//! before depositing into a constant-product pair.  It prices the swap
//! through any [`SwapQuoter`](crate::traits::SwapQuoter); [`StableRoute`]
//! is the StableSwap implementation.

mod optimal_split;
mod route;

pub use optimal_split::AllocationSolver;
pub use route::StableRoute;
