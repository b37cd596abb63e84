//! Coin decimal places and normalization to the internal precision.

use crate::error::EngineError;

use super::{Amount, Rounding};

/// Maximum supported decimal places; also the internal precision.
const MAX_DECIMALS: u8 = 18;

/// Number of decimal places of a basket coin.
///
/// Valid range is `0..=18`.  The engine prices everything at 18 decimals,
/// so a coin with `d` decimals is scaled by `10^(18 - d)` on the way in.
/// That scaling is exact for every supported `d`; only the way back out
/// truncates.
///
/// # Examples
///
/// ```
/// use stable_allocator::domain::{Amount, Decimals, Rounding};
///
/// let usdc = Decimals::new(6).expect("6 is valid");
/// assert_eq!(usdc.precision_multiplier(), 1_000_000_000_000);
/// let xp = usdc.to_internal(Amount::new(1_500_000)).expect("fits");
/// assert_eq!(xp, 1_500_000_000_000_000_000);
/// assert_eq!(usdc.from_internal(xp + 7, Rounding::Down), Some(Amount::new(1_500_000)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Decimals(u8);

impl Default for Decimals {
    fn default() -> Self {
        Self::MAX
    }
}

impl Decimals {
    /// Zero decimal places.
    pub const ZERO: Self = Self(0);

    /// The internal precision (18).
    pub const MAX: Self = Self(MAX_DECIMALS);

    /// Creates a new `Decimals` value after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if `value` exceeds 18.
    pub const fn new(value: u8) -> Result<Self, EngineError> {
        if value > MAX_DECIMALS {
            return Err(EngineError::InvalidConfiguration("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Factor that lifts a native amount to 18 decimals.
    #[must_use]
    pub const fn precision_multiplier(&self) -> u128 {
        10u128.pow((MAX_DECIMALS - self.0) as u32)
    }

    /// Scales a native amount to the internal precision.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`] if the scaled value exceeds `u128`.
    pub const fn to_internal(&self, amount: Amount) -> Result<u128, EngineError> {
        match amount.get().checked_mul(self.precision_multiplier()) {
            Some(v) => Ok(v),
            None => Err(EngineError::Overflow("normalized balance exceeds u128")),
        }
    }

    /// Scales an internal-precision value back to native units.
    #[must_use]
    pub const fn from_internal(&self, value: u128, rounding: Rounding) -> Option<Amount> {
        match crate::math::div_round(value, self.precision_multiplier(), rounding) {
            Some(v) => Some(Amount::new(v)),
            None => None,
        }
    }
}

impl TryFrom<u8> for Decimals {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Decimals> for u8 {
    fn from(value: Decimals) -> Self {
        value.0
    }
}
