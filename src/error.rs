//! Error types for the invariant engine and the allocation solver.
//!
//! Every fallible operation returns one of two enums:
//!
//! - [`EngineError`] for StableSwap pricing and liquidity operations.
//! - [`SolverError`] for the optimal-split search, which wraps any
//!   [`EngineError`] raised by a quote inside the search loop.
//!
//! Both expose a stable [`code`](EngineError::code) for telemetry and an
//! [`is_retryable`](EngineError::is_retryable) hint.  Nothing in this crate
//! retries on its own.

/// Convenience alias used throughout the engine.
pub type Result<T> = core::result::Result<T, EngineError>;

/// Failures raised by the StableSwap invariant engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Newton iteration hit its cap without two iterates landing within
    /// one unit of each other.
    #[error("invariant did not converge: {0}")]
    InvariantNotConverged(&'static str),

    /// The computed output is below the caller's minimum.
    #[error("slippage exceeded: minimum {minimum}, computed {actual}")]
    SlippageExceeded {
        /// Caller-supplied bound.
        minimum: u128,
        /// Value the engine produced.
        actual: u128,
    },

    /// A balance the computation depends on is zero.
    #[error("zero balance at coin index {index}")]
    ZeroBalance {
        /// Offending coin index.
        index: usize,
    },

    /// An imbalanced withdrawal would burn more shares than allowed.
    #[error("share burn exceeded: maximum {maximum}, computed {actual}")]
    MaxBurnExceeded {
        /// Caller-supplied ceiling.
        maximum: u128,
        /// Shares the withdrawal needs.
        actual: u128,
    },

    /// A coin index is outside the basket.
    #[error("coin index {index} out of range for a {n_coins}-coin pool")]
    InvalidIndex {
        /// Offending coin index.
        index: usize,
        /// Size of the basket.
        n_coins: usize,
    },

    /// Input and output refer to the same coin.
    #[error("input and output coin are both index {index}")]
    SameCoin {
        /// The repeated index.
        index: usize,
    },

    /// Burning more LP shares than exist.
    #[error("insufficient shares: requested {requested}, supply {available}")]
    InsufficientShares {
        /// Shares the caller asked to burn.
        requested: u128,
        /// Current total supply.
        available: u128,
    },

    /// Parameters rejected at construction or validation time.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// An amount argument is unusable (zero, wrong length, too small).
    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    /// Intermediate value exceeded the representable range.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// A subtraction would go below zero.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,
}

impl EngineError {
    /// Stable machine-readable code for logs and telemetry.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvariantNotConverged(_) => "INVARIANT_NOT_CONVERGED",
            Self::SlippageExceeded { .. } => "SLIPPAGE_EXCEEDED",
            Self::MaxBurnExceeded { .. } => "MAX_BURN_EXCEEDED",
            Self::ZeroBalance { .. } => "ZERO_BALANCE",
            Self::InvalidIndex { .. } => "INVALID_INDEX",
            Self::SameCoin { .. } => "SAME_COIN",
            Self::InsufficientShares { .. } => "INSUFFICIENT_SHARES",
            Self::InvalidConfiguration(_) => "INVALID_CONFIGURATION",
            Self::InvalidQuantity(_) => "INVALID_QUANTITY",
            Self::Overflow(_) => "OVERFLOW",
            Self::Underflow(_) => "UNDERFLOW",
            Self::DivisionByZero => "DIVISION_BY_ZERO",
        }
    }

    /// Only slippage bounds are worth retrying, and only with looser ones.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::SlippageExceeded { .. } | Self::MaxBurnExceeded { .. }
        )
    }
}

/// Failures raised by the allocation solver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolverError {
    /// A quote or mint estimate inside the search failed.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The bisection hit its iteration cap before the bracket closed.
    #[error("optimal split did not converge after {iterations} iterations")]
    OptimizationDidNotConverge {
        /// Iterations spent.
        iterations: u32,
    },

    /// The search converged but the result misses the caller's precision.
    #[error("tolerance unreachable: {measure} is {achieved}, limit {limit}")]
    ToleranceUnreachable {
        /// Which bound failed (`"ratio deviation bps"` or `"dust"`).
        measure: &'static str,
        /// Best value the solver reached.
        achieved: u128,
        /// Caller-supplied bound.
        limit: u128,
    },

    /// Both input amounts are zero.
    #[error("allocation request has nothing to allocate")]
    EmptyRequest,

    /// The destination pair has no reserves, so no target ratio exists.
    #[error("destination pool has an empty reserve")]
    EmptyDestination,
}

impl SolverError {
    /// Stable machine-readable code for logs and telemetry.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Engine(inner) => inner.code(),
            Self::OptimizationDidNotConverge { .. } => "OPTIMIZATION_DID_NOT_CONVERGE",
            Self::ToleranceUnreachable { .. } => "TOLERANCE_UNREACHABLE",
            Self::EmptyRequest => "EMPTY_REQUEST",
            Self::EmptyDestination => "EMPTY_DESTINATION",
        }
    }

    /// Slippage inside the swap leg is the only retryable failure.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Engine(inner) => inner.is_retryable(),
            _ => false,
        }
    }
}
