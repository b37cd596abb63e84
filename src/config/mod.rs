//! Validated configuration structs.
//!
//! [`StablePoolConfig`] describes a StableSwap snapshot the engine prices
//! against; [`SolverConfig`] carries the allocation solver's tolerances.
//! Both follow the same pattern: a constructor that calls `validate()`
//! and returns the first violated invariant as an error.

mod solver;
mod stable_pool;

pub use solver::{SolverConfig, DEFAULT_MAX_DUST, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
pub use stable_pool::StablePoolConfig;
