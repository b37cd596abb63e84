//! Constant-product destination pair (Uniswap V2 / PancakeSwap style).
//!
//! The pair is read-only here: the allocation solver only asks it for its
//! reserve ratio, the router-style optimal deposit and the shares a
//! deposit would mint.  [`ConstantProductPair::amount_out`] prices a swap
//! through the pair itself, the naive alternative to the stable route.
//!
//! # Formulas
//!
//! ```text
//! quote(a)        = a · rB / rA
//! mint(a, b)      = min(a · T / rA, b · T / rB)
//! mint_first(a,b) = √(a · b) − 1000
//! amount_out(in)  = in·(1 − fee) · rOut / (rIn + in·(1 − fee))
//! ```
//!
//! Every intermediate is 256-bit; every division truncates.

use core::fmt;

use primitive_types::U256;

use crate::domain::{Amount, BasisPoints, Liquidity, Rounding, BPS_DENOMINATOR};
use crate::error::EngineError;
use crate::math::{div_round_wide, isqrt, mul_div, narrow, wide};

/// Shares locked forever by the first deposit.
pub const MINIMUM_LIQUIDITY: u128 = 1_000;

/// Swap fee the PancakeSwap V2 router charges (0.25 %).
pub const DEFAULT_PAIR_FEE: BasisPoints = BasisPoints::new(25);

/// Reserves and share supply of a constant-product pair.
///
/// # Examples
///
/// ```
/// use stable_allocator::domain::Amount;
/// use stable_allocator::pools::ConstantProductPair;
///
/// let pair = ConstantProductPair::new(Amount::new(1_000), Amount::new(2_000)).expect("valid");
/// let (a, b) = pair.optimal_deposit(Amount::new(100), Amount::new(500)).expect("deposit");
/// assert_eq!((a.get(), b.get()), (100, 200));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantProductPair {
    reserve_a: Amount,
    reserve_b: Amount,
    total_supply: Liquidity,
    fee: BasisPoints,
}

impl ConstantProductPair {
    /// A pair whose share supply is taken to be `√(rA · rB)`.
    ///
    /// # Errors
    ///
    /// Same as [`with_total_supply`](Self::with_total_supply).
    pub fn new(reserve_a: Amount, reserve_b: Amount) -> Result<Self, EngineError> {
        let supply = narrow(isqrt(reserve_a.to_u256() * reserve_b.to_u256()), "pair supply")?;
        Self::with_total_supply(reserve_a, reserve_b, Liquidity::new(supply))
    }

    /// A pair with a known share supply.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidConfiguration`] if exactly one reserve is
    /// zero, or if shares and reserves disagree on emptiness.
    pub fn with_total_supply(
        reserve_a: Amount,
        reserve_b: Amount,
        total_supply: Liquidity,
    ) -> Result<Self, EngineError> {
        if reserve_a.is_zero() != reserve_b.is_zero() {
            return Err(EngineError::InvalidConfiguration(
                "pair reserves must both be zero or both non-zero",
            ));
        }
        if reserve_a.is_zero() != total_supply.is_zero() {
            return Err(EngineError::InvalidConfiguration(
                "pair supply must be zero exactly when reserves are",
            ));
        }
        Ok(Self {
            reserve_a,
            reserve_b,
            total_supply,
            fee: DEFAULT_PAIR_FEE,
        })
    }

    /// Replaces the pair's swap fee.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidConfiguration`] above 100 %.
    pub const fn with_fee(mut self, fee: BasisPoints) -> Result<Self, EngineError> {
        if !fee.is_valid_percent() {
            return Err(EngineError::InvalidConfiguration("pair fee exceeds 10000 bps"));
        }
        self.fee = fee;
        Ok(self)
    }

    /// Reserve of asset A.
    pub const fn reserve_a(&self) -> Amount {
        self.reserve_a
    }

    /// Reserve of asset B.
    pub const fn reserve_b(&self) -> Amount {
        self.reserve_b
    }

    /// Outstanding LP shares.
    #[must_use]
    pub const fn total_supply(&self) -> Liquidity {
        self.total_supply
    }

    /// Swap fee.
    #[must_use]
    pub const fn fee(&self) -> BasisPoints {
        self.fee
    }

    /// Returns `true` if the pair has never been funded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.reserve_a.is_zero()
    }

    fn reserves(&self, a_to_b: bool) -> (u128, u128) {
        if a_to_b {
            (self.reserve_a.get(), self.reserve_b.get())
        } else {
            (self.reserve_b.get(), self.reserve_a.get())
        }
    }

    /// Equivalent amount of the other asset at the reserve ratio.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ZeroBalance`] on an empty pair.
    /// - [`EngineError::Overflow`] if the result exceeds `u128`.
    pub fn quote(&self, amount: Amount, a_to_b: bool) -> Result<Amount, EngineError> {
        let (reserve_in, reserve_out) = self.reserves(a_to_b);
        if reserve_in == 0 {
            return Err(EngineError::ZeroBalance {
                index: usize::from(!a_to_b),
            });
        }
        mul_div(amount.get(), reserve_out, reserve_in, Rounding::Down).map(Amount::new)
    }

    /// Largest deposit at the current ratio that fits inside the desired
    /// amounts, as the router computes it.
    ///
    /// An empty pair takes both amounts as offered.
    ///
    /// # Errors
    ///
    /// Same as [`quote`](Self::quote).
    pub fn optimal_deposit(&self, desired_a: Amount, desired_b: Amount) -> Result<(Amount, Amount), EngineError> {
        if self.is_empty() {
            return Ok((desired_a, desired_b));
        }
        let b_optimal = self.quote(desired_a, true)?;
        if b_optimal <= desired_b {
            return Ok((desired_a, b_optimal));
        }
        let a_optimal = self.quote(desired_b, false)?;
        Ok((a_optimal.min(desired_a), desired_b))
    }

    /// Shares the pair mints for depositing `(amount_a, amount_b)`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidQuantity`] if a first deposit does not clear
    ///   [`MINIMUM_LIQUIDITY`].
    /// - [`EngineError::Overflow`] if the result exceeds `u128`.
    pub fn mint_estimate(&self, amount_a: Amount, amount_b: Amount) -> Result<Liquidity, EngineError> {
        if self.is_empty() {
            let root = narrow(isqrt(amount_a.to_u256() * amount_b.to_u256()), "initial shares")?;
            return root
                .checked_sub(MINIMUM_LIQUIDITY)
                .filter(|&minted| minted > 0)
                .map(Liquidity::new)
                .ok_or(EngineError::InvalidQuantity("initial deposit below minimum liquidity"));
        }
        let supply = self.total_supply.get();
        let by_a = mul_div(amount_a.get(), supply, self.reserve_a.get(), Rounding::Down)?;
        let by_b = mul_div(amount_b.get(), supply, self.reserve_b.get(), Rounding::Down)?;
        Ok(Liquidity::new(by_a.min(by_b)))
    }

    /// Output of swapping `amount_in` through the pair, net of its fee.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ZeroBalance`] on an empty pair.
    /// - [`EngineError::Overflow`] on overflow.
    pub fn amount_out(&self, amount_in: Amount, a_to_b: bool) -> Result<Amount, EngineError> {
        let (reserve_in, reserve_out) = self.reserves(a_to_b);
        if reserve_in == 0 {
            return Err(EngineError::ZeroBalance {
                index: usize::from(!a_to_b),
            });
        }
        let in_with_fee = amount_in.to_u256() * U256::from(self.fee.complement().get());
        let numerator = in_with_fee
            .checked_mul(wide(reserve_out))
            .ok_or(EngineError::Overflow("pair output numerator"))?;
        let denominator = wide(reserve_in) * U256::from(BPS_DENOMINATOR) + in_with_fee;
        narrow(numerator / denominator, "pair output").map(Amount::new)
    }

    /// Deviation of `x : y` from the reserve ratio `rA : rB`, in basis
    /// points of the smaller cross product, rounded up.
    ///
    /// Returns `u128::MAX` when exactly one cross product is zero.
    #[must_use]
    pub fn ratio_deviation_bps(&self, x: Amount, y: Amount) -> u128 {
        ratio_deviation_bps(
            x.to_u256() * self.reserve_b.to_u256(),
            y.to_u256() * self.reserve_a.to_u256(),
        )
    }
}

/// `|lhs − rhs| · 10⁴ / min(lhs, rhs)`, rounded up and saturated.
fn ratio_deviation_bps(lhs: U256, rhs: U256) -> u128 {
    let (low, high) = if lhs < rhs { (lhs, rhs) } else { (rhs, lhs) };
    if low == high {
        return 0;
    }
    if low.is_zero() {
        return u128::MAX;
    }
    let Some(scaled) = (high - low).checked_mul(U256::from(BPS_DENOMINATOR)) else {
        return u128::MAX;
    };
    div_round_wide(scaled, low, Rounding::Up)
        .and_then(|q| narrow(q, "ratio deviation").ok())
        .unwrap_or(u128::MAX)
}

impl fmt::Display for ConstantProductPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pair(reserves {}/{}, supply {}, fee {})",
            self.reserve_a, self.reserve_b, self.total_supply, self.fee
        )
    }
}
