//! Pool implementations.
//!
//! | Pool | Role | Style |
//! |------|------|-------|
//! | [`StableSwapPool`] | swap venue and invariant engine | Curve StableSwap |
//! | [`ConstantProductPair`] | deposit destination | Uniswap V2 / PancakeSwap |
//!
//! Neither pool mutates itself while pricing: operations return outcomes
//! and the caller decides whether to [`commit`](StableSwapPool::commit).

pub mod constant_product;
pub mod stable_swap;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use constant_product::{ConstantProductPair, DEFAULT_PAIR_FEE, MINIMUM_LIQUIDITY};
pub use stable_swap::{StableSwapPool, VIRTUAL_PRICE_PRECISION};
