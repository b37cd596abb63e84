//! Configuration for the allocation solver.

use crate::domain::{Amount, BasisPoints};
use crate::error::SolverError;

/// Bisection step cap used by [`SolverConfig::default`].
pub const DEFAULT_MAX_ITERATIONS: u32 = 256;

/// Dust ceiling, in base units, used by [`SolverConfig::default`].
pub const DEFAULT_MAX_DUST: Amount = Amount::new(100);

/// Ratio tolerance used by [`SolverConfig::default`] (0.1 %).
pub const DEFAULT_TOLERANCE: BasisPoints = BasisPoints::new(10);

/// Tunables for [`AllocationSolver`](crate::solver::AllocationSolver).
///
/// - `tolerance`: accepted deviation of the post-swap ratio from the
///   destination reserve ratio.  Inputs already within it skip the swap.
/// - `max_iterations`: bisection steps before giving up.
/// - `max_dust`: largest leftover the deposit may strand on either side,
///   in base units of the coarser coin at the pair's price (a 6-decimal
///   coin against an 18-decimal one allows `max_dust · 10¹²` on the
///   18-decimal side); `None` disables the check.
///
/// # Examples
///
/// ```
/// use stable_allocator::config::SolverConfig;
/// use stable_allocator::domain::BasisPoints;
///
/// let cfg = SolverConfig::default().with_tolerance(BasisPoints::new(5));
/// assert_eq!(cfg.max_iterations(), 256);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    tolerance: BasisPoints,
    max_iterations: u32,
    max_dust: Option<Amount>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_dust: Some(DEFAULT_MAX_DUST),
        }
    }
}

impl SolverConfig {
    /// Creates a new `SolverConfig`.
    ///
    /// # Errors
    ///
    /// Returns whatever [`validate`](Self::validate) rejects.
    pub fn new(
        tolerance: BasisPoints,
        max_iterations: u32,
        max_dust: Option<Amount>,
    ) -> Result<Self, SolverError> {
        let config = Self {
            tolerance,
            max_iterations,
            max_dust,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Engine`] wrapping
    /// [`EngineError::InvalidConfiguration`](crate::error::EngineError::InvalidConfiguration)
    /// if the tolerance exceeds 100 % or the iteration cap is zero.
    pub fn validate(&self) -> Result<(), SolverError> {
        use crate::error::EngineError;

        if !self.tolerance.is_valid_percent() {
            return Err(EngineError::InvalidConfiguration("tolerance exceeds 10000 bps").into());
        }
        if self.max_iterations == 0 {
            return Err(EngineError::InvalidConfiguration("max_iterations must be positive").into());
        }
        Ok(())
    }

    /// Replaces the ratio tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: BasisPoints) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Replaces the bisection step cap.
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Replaces the dust ceiling.
    #[must_use]
    pub const fn with_max_dust(mut self, max_dust: Option<Amount>) -> Self {
        self.max_dust = max_dust;
        self
    }

    /// Accepted ratio deviation.
    #[must_use]
    pub const fn tolerance(&self) -> BasisPoints {
        self.tolerance
    }

    /// Bisection step cap.
    #[must_use]
    pub const fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Dust ceiling, if any.
    #[must_use]
    pub const fn max_dust(&self) -> Option<Amount> {
        self.max_dust
    }
}
