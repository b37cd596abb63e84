//! Outcome of a StableSwap exchange.

use core::fmt;

use super::{Amount, Balances};

/// Everything an exchange produced, including the balances the caller
/// should persist.
///
/// # Invariants
///
/// - `new_balances[coin_in] = old + amount_in`.
/// - `new_balances[coin_out] = old − amount_out − admin_fee`.
/// - `admin_fee <= fee`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapOutcome {
    coin_in: usize,
    coin_out: usize,
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
    admin_fee: Amount,
    new_balances: Balances,
}

impl SwapOutcome {
    pub(crate) fn new(
        (coin_in, coin_out): (usize, usize),
        amount_in: Amount,
        amount_out: Amount,
        (fee, admin_fee): (Amount, Amount),
        new_balances: Balances,
    ) -> Self {
        Self {
            coin_in,
            coin_out,
            amount_in,
            amount_out,
            fee,
            admin_fee,
            new_balances,
        }
    }

    /// Index of the coin sold.
    #[must_use]
    pub const fn coin_in(&self) -> usize {
        self.coin_in
    }

    /// Index of the coin bought.
    #[must_use]
    pub const fn coin_out(&self) -> usize {
        self.coin_out
    }

    /// Amount sold.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Amount received, net of the swap fee.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Swap fee charged on the output coin.
    pub const fn fee(&self) -> Amount {
        self.fee
    }

    /// Part of [`fee`](Self::fee) that leaves the pool for the admin.
    pub const fn admin_fee(&self) -> Amount {
        self.admin_fee
    }

    /// Balances after the swap.
    #[must_use]
    pub const fn new_balances(&self) -> &Balances {
        &self.new_balances
    }
}

impl fmt::Display for SwapOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Swap({}: {} -> {}: {}, fee={}, admin={})",
            self.coin_in, self.amount_in, self.coin_out, self.amount_out, self.fee, self.admin_fee
        )
    }
}
