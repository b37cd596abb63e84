//! LP share quantities.

use super::quantity::quantity;

quantity! {
    /// Liquidity-provider shares of a pool.
    ///
    /// Distinct from [`Amount`](super::Amount) because it counts claims on
    /// a basket rather than units of one coin.  A StableSwap share starts
    /// out worth one unit of the invariant `D`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_allocator::domain::Liquidity;
    ///
    /// let minted = Liquidity::new(1_000);
    /// let supply = Liquidity::new(2_000);
    /// assert_eq!(supply.checked_add(&minted), Some(Liquidity::new(3_000)));
    /// assert_eq!(minted.checked_sub(&supply), None);
    /// ```
    Liquidity,
    "No shares."
}
