//! Division rounding direction.

use core::fmt;

/// Which way a division with a remainder goes.
///
/// Pool outputs use [`Rounding::Down`] so the pool never pays out a unit
/// it cannot back.  [`Rounding::Up`] is for conservative reporting, such
/// as how far a ratio sits from its target.
///
/// # Examples
///
/// ```
/// use stable_allocator::domain::Rounding;
///
/// assert!(Rounding::Up.bumps(7));
/// assert!(!Rounding::Up.bumps(0));
/// assert!(!Rounding::Down.bumps(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Ceiling.
    Up,
    /// Floor.
    #[default]
    Down,
}

impl Rounding {
    /// Whether a truncated quotient leaving `remainder` must be raised by
    /// one.
    #[must_use]
    pub const fn bumps(&self, remainder: u128) -> bool {
        matches!(self, Self::Up) && remainder != 0
    }
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "ceil",
            Self::Down => "floor",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_favouring_default() {
        assert_eq!(Rounding::default(), Rounding::Down);
    }

    #[test]
    fn exact_quotients_never_bump() {
        assert!(!Rounding::Up.bumps(0));
        assert!(!Rounding::Down.bumps(0));
        assert!(!Rounding::Down.bumps(u128::MAX));
        assert!(Rounding::Up.bumps(1));
    }

    #[test]
    fn display() {
        assert_eq!(Rounding::Up.to_string(), "ceil");
        assert_eq!(Rounding::Down.to_string(), "floor");
    }
}
