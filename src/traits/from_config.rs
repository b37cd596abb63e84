//! Construction of engine types from validated configuration.
//!
//! [`FromConfig`] gives every configurable type the same entry point.
//! Implementations re-validate the config they receive, so a constructed
//! value is always in a consistent initial state even when the config was
//! deserialized rather than built through its constructor.
//!
//! # Implementors
//!
//! - `impl FromConfig<StablePoolConfig> for StableSwapPool`
//! - `impl FromConfig<SolverConfig> for AllocationSolver`

/// Builds `Self` from a configuration value of type `C`.
///
/// The configuration is taken by reference so it can be reused, e.g. to
/// rebuild a pool from a fresh snapshot.
pub trait FromConfig<C> {
    /// Error returned when `config` is rejected.
    type Error;

    /// Creates a new instance from `config`.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` if any configuration invariant fails.
    fn from_config(config: &C) -> Result<Self, Self::Error>
    where
        Self: Sized;
}
