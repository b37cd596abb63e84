//! Configuration for a StableSwap pool snapshot.

use crate::domain::{Balances, Decimals, FeeSchedule, Liquidity};
use crate::error::EngineError;
use crate::math::MAX_A;

/// Configuration for a Curve-style StableSwap pool over `n` pegged coins.
///
/// # Amplification
///
/// `A = 1` behaves close to constant product; large `A` approaches
/// constant sum (1:1 swaps).  Stablecoin baskets typically run 100–2000.
///
/// # Validation
///
/// - One [`Decimals`] entry per balance.
/// - `1 <= amplification <= 1_000_000`.
/// - Every balance fits in `u128` once scaled to 18 decimals.
/// - A pool with outstanding shares holds a non-zero balance of every coin.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StablePoolConfig {
    decimals: Vec<Decimals>,
    amplification: u32,
    fees: FeeSchedule,
    balances: Balances,
    total_supply: Liquidity,
}

impl StablePoolConfig {
    /// Creates a new `StablePoolConfig`.
    ///
    /// # Errors
    ///
    /// Returns whatever [`validate`](Self::validate) rejects.
    pub fn new(
        decimals: Vec<Decimals>,
        amplification: u32,
        fees: FeeSchedule,
        balances: Balances,
        total_supply: Liquidity,
    ) -> Result<Self, EngineError> {
        let config = Self {
            decimals,
            amplification,
            fees,
            balances,
            total_supply,
        };
        config.validate()?;
        Ok(config)
    }

    /// A basket whose coins all use 18 decimals.
    ///
    /// # Errors
    ///
    /// Returns whatever [`validate`](Self::validate) rejects.
    pub fn uniform(
        amplification: u32,
        fees: FeeSchedule,
        balances: Balances,
        total_supply: Liquidity,
    ) -> Result<Self, EngineError> {
        let decimals = vec![Decimals::MAX; balances.len()];
        Self::new(decimals, amplification, fees, balances, total_supply)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidConfiguration`] for a decimals/balances
    ///   length mismatch or an out-of-range amplification.
    /// - [`EngineError::Overflow`] if a balance overflows at 18 decimals.
    /// - [`EngineError::ZeroBalance`] if shares exist but a coin is empty.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.decimals.len() != self.balances.len() {
            return Err(EngineError::InvalidConfiguration(
                "one decimals entry per coin required",
            ));
        }
        if self.amplification == 0 || u128::from(self.amplification) > MAX_A {
            return Err(EngineError::InvalidConfiguration(
                "amplification must be in 1..=1_000_000",
            ));
        }
        for (decimals, balance) in self.decimals.iter().zip(self.balances.as_slice()) {
            decimals.to_internal(*balance)?;
        }
        if !self.total_supply.is_zero() {
            if let Some(index) = self.balances.first_zero() {
                return Err(EngineError::ZeroBalance { index });
            }
        }
        Ok(())
    }

    /// Native decimals of each coin.
    #[must_use]
    pub fn decimals(&self) -> &[Decimals] {
        &self.decimals
    }

    /// Amplification coefficient `A`.
    #[must_use]
    pub const fn amplification(&self) -> u32 {
        self.amplification
    }

    /// Swap and admin fee.
    #[must_use]
    pub const fn fees(&self) -> FeeSchedule {
        self.fees
    }

    /// Balances in native units.
    #[must_use]
    pub const fn balances(&self) -> &Balances {
        &self.balances
    }

    /// Outstanding LP shares.
    #[must_use]
    pub const fn total_supply(&self) -> Liquidity {
        self.total_supply
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn balances(raw: &[u128]) -> Balances {
        let Ok(b) = Balances::from_raw(raw) else {
            panic!("valid balances");
        };
        b
    }

    #[test]
    fn valid_config() {
        let result = StablePoolConfig::uniform(
            1_500,
            FeeSchedule::ZERO,
            balances(&[100, 100, 100]),
            Liquidity::new(300),
        );
        let Ok(cfg) = result else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.amplification(), 1_500);
        assert_eq!(cfg.decimals().len(), 3);
    }

    #[test]
    fn empty_pool_without_supply_is_valid() {
        let Ok(zeroed) = Balances::zeroed(2) else {
            panic!("valid balances");
        };
        assert!(StablePoolConfig::uniform(10, FeeSchedule::ZERO, zeroed, Liquidity::ZERO).is_ok());
    }

    #[test]
    fn zero_amplification_rejected() {
        let result =
            StablePoolConfig::uniform(0, FeeSchedule::ZERO, balances(&[1, 1]), Liquidity::ZERO);
        let Err(EngineError::InvalidConfiguration(_)) = result else {
            panic!("expected InvalidConfiguration");
        };
    }

    #[test]
    fn amplification_above_max_rejected() {
        let result = StablePoolConfig::uniform(
            1_000_001,
            FeeSchedule::ZERO,
            balances(&[1, 1]),
            Liquidity::ZERO,
        );
        assert!(result.is_err());
    }

    #[test]
    fn decimals_length_mismatch_rejected() {
        let result = StablePoolConfig::new(
            vec![Decimals::MAX],
            10,
            FeeSchedule::ZERO,
            balances(&[1, 1]),
            Liquidity::ZERO,
        );
        let Err(EngineError::InvalidConfiguration(_)) = result else {
            panic!("expected InvalidConfiguration");
        };
    }

    #[test]
    fn supply_with_empty_coin_rejected() {
        let result = StablePoolConfig::uniform(
            10,
            FeeSchedule::ZERO,
            balances(&[5, 0, 5]),
            Liquidity::new(10),
        );
        assert_eq!(result, Err(EngineError::ZeroBalance { index: 1 }));
    }

    #[test]
    fn scaled_overflow_rejected() {
        let Ok(d0) = Decimals::new(0) else {
            panic!("valid decimals");
        };
        let result = StablePoolConfig::new(
            vec![d0, Decimals::MAX],
            10,
            FeeSchedule::ZERO,
            balances(&[u128::MAX, 1]),
            Liquidity::ZERO,
        );
        let Err(EngineError::Overflow(_)) = result else {
            panic!("expected Overflow");
        };
    }
}
