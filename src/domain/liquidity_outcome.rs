//! Outcomes of deposits and withdrawals.

use super::{Amount, Balances, Liquidity};

/// Result of adding liquidity to a StableSwap pool.
///
/// `invariant_before` and `invariant_after` are `D` before the deposit and
/// after imbalance fees were taken; shares are minted in proportion to
/// their difference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositOutcome {
    minted: Liquidity,
    fees: Vec<Amount>,
    invariant_before: u128,
    invariant_after: u128,
    new_balances: Balances,
    new_total_supply: Liquidity,
}

impl DepositOutcome {
    pub(crate) fn new(
        minted: Liquidity,
        fees: Vec<Amount>,
        (invariant_before, invariant_after): (u128, u128),
        new_balances: Balances,
        new_total_supply: Liquidity,
    ) -> Self {
        Self {
            minted,
            fees,
            invariant_before,
            invariant_after,
            new_balances,
            new_total_supply,
        }
    }

    /// LP shares minted to the depositor.
    #[must_use]
    pub const fn minted(&self) -> Liquidity {
        self.minted
    }

    /// Imbalance fee charged per coin (all zero on the first deposit).
    #[must_use]
    pub fn fees(&self) -> &[Amount] {
        &self.fees
    }

    /// `D` before the deposit.
    #[must_use]
    pub const fn invariant_before(&self) -> u128 {
        self.invariant_before
    }

    /// `D` after the deposit, net of fees.
    #[must_use]
    pub const fn invariant_after(&self) -> u128 {
        self.invariant_after
    }

    /// Balances to persist.
    #[must_use]
    pub const fn new_balances(&self) -> &Balances {
        &self.new_balances
    }

    /// Share supply after minting.
    #[must_use]
    pub const fn new_total_supply(&self) -> Liquidity {
        self.new_total_supply
    }
}

/// Result of removing liquidity from a StableSwap pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawOutcome {
    amounts: Vec<Amount>,
    fees: Vec<Amount>,
    burned: Liquidity,
    new_balances: Balances,
    new_total_supply: Liquidity,
}

impl WithdrawOutcome {
    pub(crate) fn new(
        amounts: Vec<Amount>,
        fees: Vec<Amount>,
        burned: Liquidity,
        new_balances: Balances,
        new_total_supply: Liquidity,
    ) -> Self {
        Self {
            amounts,
            fees,
            burned,
            new_balances,
            new_total_supply,
        }
    }

    /// Amount paid out per coin.
    #[must_use]
    pub fn amounts(&self) -> &[Amount] {
        &self.amounts
    }

    /// Fee charged per coin.
    #[must_use]
    pub fn fees(&self) -> &[Amount] {
        &self.fees
    }

    /// LP shares burned.
    #[must_use]
    pub const fn burned(&self) -> Liquidity {
        self.burned
    }

    /// Balances to persist.
    #[must_use]
    pub const fn new_balances(&self) -> &Balances {
        &self.new_balances
    }

    /// Share supply after burning.
    #[must_use]
    pub const fn new_total_supply(&self) -> Liquidity {
        self.new_total_supply
    }
}
