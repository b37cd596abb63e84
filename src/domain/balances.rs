//! Fixed-length balance vector of a StableSwap basket.

use core::fmt;

use super::Amount;
use crate::error::EngineError;

/// Smallest basket the invariant is defined for.
pub const MIN_COINS: usize = 2;

/// Largest basket the engine accepts.
pub const MAX_COINS: usize = 8;

/// One balance per basket coin, in the coin's native units.
///
/// The length is fixed when the vector is built and is the pool's
/// `N`.  Zero entries are allowed (an empty pool has all-zero balances);
/// operations that need a non-zero entry reject it with
/// [`EngineError::ZeroBalance`].
///
/// # Examples
///
/// ```
/// use stable_allocator::domain::Balances;
///
/// let b = Balances::from_raw(&[100, 200, 300]).expect("three coins");
/// assert_eq!(b.len(), 3);
/// assert_eq!(b.get(1).map(|a| a.get()), Some(200));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Amount>", into = "Vec<Amount>"))]
pub struct Balances(Vec<Amount>);

impl Balances {
    /// Builds a balance vector, validating the coin count.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] unless
    /// `2 <= len <= 8`.
    pub fn new(values: Vec<Amount>) -> Result<Self, EngineError> {
        if values.len() < MIN_COINS || values.len() > MAX_COINS {
            return Err(EngineError::InvalidConfiguration(
                "basket must hold between 2 and 8 coins",
            ));
        }
        Ok(Self(values))
    }

    /// Builds a balance vector from raw integers.
    ///
    /// # Errors
    ///
    /// Same as [`Balances::new`].
    pub fn from_raw(values: &[u128]) -> Result<Self, EngineError> {
        Self::new(values.iter().copied().map(Amount::new).collect())
    }

    /// All-zero balances for an `n_coins` basket.
    ///
    /// # Errors
    ///
    /// Same as [`Balances::new`].
    pub fn zeroed(n_coins: usize) -> Result<Self, EngineError> {
        Self::new(vec![Amount::ZERO; n_coins])
    }

    /// Number of coins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; a basket has at least two coins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Balance of coin `index`, if it exists.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Amount> {
        self.0.get(index).copied()
    }

    /// Balance of coin `index`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidIndex`] when out of range.
    pub fn try_get(&self, index: usize) -> Result<Amount, EngineError> {
        self.get(index).ok_or(EngineError::InvalidIndex {
            index,
            n_coins: self.len(),
        })
    }

    /// Borrow the entries.
    #[must_use]
    pub fn as_slice(&self) -> &[Amount] {
        &self.0
    }

    /// Copies the entries out as raw integers.
    #[must_use]
    pub fn to_raw(&self) -> Vec<u128> {
        self.0.iter().map(Amount::get).collect()
    }

    /// Returns `true` when every entry is zero.
    #[must_use]
    pub fn is_all_zero(&self) -> bool {
        self.0.iter().all(Amount::is_zero)
    }

    /// Index of the first zero entry.
    #[must_use]
    pub fn first_zero(&self) -> Option<usize> {
        self.0.iter().position(Amount::is_zero)
    }
}

impl TryFrom<Vec<Amount>> for Balances {
    type Error = EngineError;

    fn try_from(values: Vec<Amount>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<Balances> for Vec<Amount> {
    fn from(value: Balances) -> Self {
        value.0
    }
}

impl fmt::Display for Balances {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{b}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn coin_count_bounds() {
        assert!(Balances::from_raw(&[1]).is_err());
        assert!(Balances::from_raw(&[1; 9]).is_err());
        assert!(Balances::from_raw(&[1, 2]).is_ok());
        assert!(Balances::from_raw(&[1; 8]).is_ok());
    }

    #[test]
    fn try_get_out_of_range() {
        let Ok(b) = Balances::from_raw(&[1, 2, 3]) else {
            panic!("valid balances");
        };
        assert_eq!(
            b.try_get(3),
            Err(EngineError::InvalidIndex { index: 3, n_coins: 3 })
        );
    }

    #[test]
    fn zero_detection() {
        let Ok(b) = Balances::from_raw(&[5, 0, 3]) else {
            panic!("valid balances");
        };
        assert_eq!(b.first_zero(), Some(1));
        assert!(!b.is_all_zero());
        let Ok(z) = Balances::zeroed(3) else {
            panic!("valid balances");
        };
        assert!(z.is_all_zero());
    }

    #[test]
    fn display() {
        let Ok(b) = Balances::from_raw(&[1, 20, 300]) else {
            panic!("valid balances");
        };
        assert_eq!(format!("{b}"), "[1, 20, 300]");
        assert_eq!(b.to_raw(), vec![1, 20, 300]);
    }
}
