//! Raw coin amounts.

use super::quantity::quantity;

quantity! {
    /// A raw amount in the smallest unit of one coin.
    ///
    /// `Amount` never interprets decimals; [`Decimals`](super::Decimals)
    /// lifts it to the internal 18-decimal precision.  Arithmetic is
    /// checked and returns `None` instead of wrapping.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_allocator::domain::Amount;
    ///
    /// let a = Amount::new(100);
    /// let b = Amount::new(200);
    /// assert_eq!(a.checked_add(&b), Some(Amount::new(300)));
    /// assert_eq!(a.saturating_sub(&b), Amount::ZERO);
    /// ```
    #[must_use]
    Amount,
    "Nothing."
}

impl Amount {
    /// Largest representable amount.
    pub const MAX: Self = Self(u128::MAX);
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitive_types::U256;

    #[test]
    fn construction() {
        assert_eq!(Amount::new(42).get(), 42);
        assert_eq!(Amount::default(), Amount::ZERO);
        assert_eq!(Amount::from(7u128), Amount::new(7));
    }

    #[test]
    fn overflow_and_underflow_are_none() {
        assert_eq!(Amount::MAX.checked_add(&Amount::new(1)), None);
        assert_eq!(Amount::new(1).checked_sub(&Amount::new(2)), None);
        assert_eq!(Amount::new(1).saturating_sub(&Amount::new(2)), Amount::ZERO);
    }

    #[test]
    fn widening_is_lossless() {
        assert_eq!(Amount::MAX.to_u256(), U256::from(u128::MAX));
        assert_eq!(Amount::new(1_000_000).to_string(), "1000000");
    }
}
