//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use stable_allocator::prelude::*;
//! ```

pub use crate::domain::{
    AllocationPlan, AllocationRequest, Amount, Balances, BasisPoints, Decimals, FeeRate,
    FeeSchedule, Liquidity, Rounding, SwapDirection,
};

pub use crate::traits::{FromConfig, SwapQuoter};

pub use crate::math::CheckedArithmetic;

pub use crate::config::{SolverConfig, StablePoolConfig};

pub use crate::error::{EngineError, Result, SolverError};

pub use crate::pools::{ConstantProductPair, StableSwapPool};

pub use crate::solver::{AllocationSolver, StableRoute};
