//! StableSwap fee rates on the `10^10` fee denominator.

use core::fmt;

use super::{BasisPoints, Rounding};
use crate::error::EngineError;

/// Denominator for [`FeeRate`]: `10^10` is 100%.
pub const FEE_DENOMINATOR: u64 = 10_000_000_000;

/// Largest accepted swap fee (50%).
pub const MAX_FEE: u64 = 5_000_000_000;

/// Largest accepted admin fee (100% of the swap fee).
pub const MAX_ADMIN_FEE: u64 = FEE_DENOMINATOR;

/// One basis point on the fee denominator.
const FEE_PER_BPS: u64 = FEE_DENOMINATOR / 10_000;

/// A fraction with denominator [`FEE_DENOMINATOR`].
///
/// `FeeRate::new(4_000_000)` is 0.04%, the swap fee of a typical
/// stablecoin basket.
///
/// # Examples
///
/// ```
/// use stable_allocator::domain::{BasisPoints, FeeRate};
///
/// let fee = FeeRate::from_bps(BasisPoints::new(4)).expect("valid");
/// assert_eq!(fee.get(), 4_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u64", into = "u64"))]
pub struct FeeRate(u64);

impl FeeRate {
    /// No fee.
    pub const ZERO: Self = Self(0);

    /// Creates a rate from a raw numerator.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if `raw > 10^10`.
    pub const fn new(raw: u64) -> Result<Self, EngineError> {
        if raw > FEE_DENOMINATOR {
            return Err(EngineError::InvalidConfiguration(
                "fee rate exceeds the fee denominator",
            ));
        }
        Ok(Self(raw))
    }

    /// Converts basis points to the fee denominator.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] above 10 000 bp.
    pub const fn from_bps(bps: BasisPoints) -> Result<Self, EngineError> {
        if !bps.is_valid_percent() {
            return Err(EngineError::InvalidConfiguration(
                "basis points exceed 100%",
            ));
        }
        Ok(Self(bps.get() as u64 * FEE_PER_BPS))
    }

    /// Returns the raw numerator.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns `true` for a zero rate.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// `value * self / 10^10`, truncated.
    ///
    /// # Errors
    ///
    /// Never fails for a valid rate, which cannot lift the quotient past
    /// `value`; the `Result` carries [`mul_div`](crate::math::mul_div)'s.
    pub fn apply(&self, value: u128) -> Result<u128, EngineError> {
        crate::math::mul_div(value, u128::from(self.0), u128::from(FEE_DENOMINATOR), Rounding::Down)
    }
}

impl TryFrom<u64> for FeeRate {
    type Error = EngineError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FeeRate> for u64 {
    fn from(value: FeeRate) -> Self {
        value.0
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, FEE_DENOMINATOR)
    }
}

/// The swap fee and the admin share of it.
///
/// The swap fee is charged on the gross output of an exchange.  The admin
/// fee is the fraction of every collected fee that leaves the pool's
/// balances; the remainder stays in and grows `D`.
///
/// # Examples
///
/// ```
/// use stable_allocator::domain::{FeeRate, FeeSchedule};
///
/// let fees = FeeSchedule::new(
///     FeeRate::new(4_000_000).expect("0.04%"),
///     FeeRate::new(5_000_000_000).expect("50%"),
/// ).expect("valid schedule");
/// assert_eq!(fees.imbalance_fee(3).get(), 1_500_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeSchedule {
    swap: FeeRate,
    admin: FeeRate,
}

impl FeeSchedule {
    /// A schedule that charges nothing.
    pub const ZERO: Self = Self {
        swap: FeeRate::ZERO,
        admin: FeeRate::ZERO,
    };

    /// Creates a validated schedule.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidConfiguration`] if the swap fee exceeds
    ///   [`MAX_FEE`].
    pub const fn new(swap: FeeRate, admin: FeeRate) -> Result<Self, EngineError> {
        if swap.get() > MAX_FEE {
            return Err(EngineError::InvalidConfiguration("swap fee exceeds 50%"));
        }
        Ok(Self { swap, admin })
    }

    /// Swap fee given in basis points with no admin share.
    ///
    /// # Errors
    ///
    /// Same as [`FeeSchedule::new`] and [`FeeRate::from_bps`].
    pub const fn from_bps(fee: BasisPoints) -> Result<Self, EngineError> {
        match FeeRate::from_bps(fee) {
            Ok(swap) => Self::new(swap, FeeRate::ZERO),
            Err(e) => Err(e),
        }
    }

    /// The swap fee.
    #[must_use]
    pub const fn swap_fee(&self) -> FeeRate {
        self.swap
    }

    /// The admin share of collected fees.
    #[must_use]
    pub const fn admin_fee(&self) -> FeeRate {
        self.admin
    }

    /// Per-coin fee charged on imbalance during liquidity changes:
    /// `fee · n / (4 · (n − 1))`.
    ///
    /// At `n = 2` this halves the swap fee, matching a swap of half the
    /// imbalance.
    #[must_use]
    pub const fn imbalance_fee(&self, n_coins: usize) -> FeeRate {
        if n_coins < 2 {
            return FeeRate::ZERO;
        }
        let n = n_coins as u64;
        FeeRate(self.swap.get() * n / (4 * (n - 1)))
    }
}

impl fmt::Display for FeeSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeSchedule(swap={}, admin={})", self.swap, self.admin)
    }
}
