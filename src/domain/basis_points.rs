//! Percentages in basis points.

use core::fmt;

/// Value that represents 100%.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// A percentage in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// Carries solver tolerances, pair fees and fee inputs given in bps.
/// Values above 10 000 are representable but rejected wherever a
/// percentage is required; see [`is_valid_percent`](Self::is_valid_percent).
///
/// # Examples
///
/// ```
/// use stable_allocator::domain::BasisPoints;
///
/// let tolerance = BasisPoints::new(10);
/// assert!(tolerance.admits(10));
/// assert!(!tolerance.admits(11));
/// assert_eq!(BasisPoints::new(25).complement(), BasisPoints::new(9_975));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// 0%.
    pub const ZERO: Self = Self(0);

    /// 100%.
    pub const MAX_PERCENT: Self = Self(BPS_DENOMINATOR);

    /// Wraps a raw basis-point count.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The raw basis-point count.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` within `0..=10_000`.
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= BPS_DENOMINATOR
    }

    /// `10_000 − self`, saturating at zero.
    #[must_use]
    pub const fn complement(&self) -> Self {
        Self(BPS_DENOMINATOR.saturating_sub(self.0))
    }

    /// Whether a measured deviation of `deviation_bps` is within this
    /// tolerance.
    #[must_use]
    pub const fn admits(&self, deviation_bps: u128) -> bool {
        deviation_bps <= self.0 as u128
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_range() {
        assert!(BasisPoints::MAX_PERCENT.is_valid_percent());
        assert!(BasisPoints::ZERO.is_valid_percent());
        assert!(!BasisPoints::new(10_001).is_valid_percent());
    }

    #[test]
    fn complement_saturates() {
        assert_eq!(BasisPoints::new(25).complement(), BasisPoints::new(9_975));
        assert_eq!(BasisPoints::new(20_000).complement(), BasisPoints::ZERO);
    }

    #[test]
    fn tolerance_is_inclusive() {
        assert!(BasisPoints::ZERO.admits(0));
        assert!(!BasisPoints::ZERO.admits(1));
        assert!(!BasisPoints::MAX_PERCENT.admits(u128::MAX));
    }

    #[test]
    fn display() {
        assert_eq!(BasisPoints::new(30).to_string(), "30bp");
    }
}
