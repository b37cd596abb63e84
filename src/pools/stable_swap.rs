//! StableSwap pool engine (Curve style) over an `n`-coin basket.
//!
//! A [`StableSwapPool`] is a snapshot: balances, share supply, fees and
//! amplification.  Every operation is a pure function of that snapshot
//! returning an outcome that carries the balances the caller should
//! persist; [`StableSwapPool::commit`] applies them.
//!
//! # Pricing
//!
//! Balances are lifted to 18 decimals (`xp`) and priced against the
//! invariant solved by [`compute_d`].  Swaps keep `D` fixed and solve for
//! the output balance; liquidity changes compare `D` before and after.
//!
//! # Fees
//!
//! - Swaps charge the swap fee on the gross output.
//! - Imbalanced deposits and withdrawals charge
//!   `fee · n / (4 · (n − 1))` on each coin's distance from the
//!   proportional ideal.
//! - The admin share of every fee leaves the pool balances; the rest stays
//!   in the pool, so `D` never decreases across a swap.
//!
//! All divisions truncate in the pool's favour.

use crate::config::StablePoolConfig;
use crate::domain::{
    Amount, Balances, Decimals, DepositOutcome, FeeSchedule, Liquidity, Rounding, SwapOutcome,
    WithdrawOutcome,
};
use crate::error::EngineError;
use crate::math::{compute_d, compute_y, compute_y_d, mul_div, CheckedArithmetic};
use crate::traits::FromConfig;

/// Precision of [`StableSwapPool::virtual_price`].
pub const VIRTUAL_PRICE_PRECISION: u128 = 1_000_000_000_000_000_000;

/// A Curve-style StableSwap pool.
///
/// # Examples
///
/// ```
/// use stable_allocator::config::StablePoolConfig;
/// use stable_allocator::domain::{Amount, Balances, FeeSchedule, Liquidity};
/// use stable_allocator::pools::StableSwapPool;
/// use stable_allocator::traits::FromConfig;
///
/// let balances = Balances::from_raw(&[1_000_000, 1_000_000, 1_000_000]).expect("3 coins");
/// let cfg = StablePoolConfig::uniform(1_500, FeeSchedule::ZERO, balances, Liquidity::new(3_000_000))
///     .expect("valid config");
/// let pool = StableSwapPool::from_config(&cfg).expect("valid pool");
///
/// let out = pool.get_dy(0, 1, Amount::new(1_000)).expect("quote");
/// assert!(out.get() > 990 && out.get() < 1_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StableSwapPool {
    decimals: Vec<Decimals>,
    amplification: u32,
    fees: FeeSchedule,
    balances: Balances,
    total_supply: Liquidity,
}

impl FromConfig<StablePoolConfig> for StableSwapPool {
    type Error = EngineError;

    fn from_config(config: &StablePoolConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            decimals: config.decimals().to_vec(),
            amplification: config.amplification(),
            fees: config.fees(),
            balances: config.balances().clone(),
            total_supply: config.total_supply(),
        })
    }
}

impl StableSwapPool {
    // -- accessors ---------------------------------------------------------

    /// Number of coins in the basket.
    #[must_use]
    pub fn n_coins(&self) -> usize {
        self.balances.len()
    }

    /// Amplification coefficient `A`.
    #[must_use]
    pub const fn amplification(&self) -> u32 {
        self.amplification
    }

    /// Fee schedule.
    #[must_use]
    pub const fn fees(&self) -> FeeSchedule {
        self.fees
    }

    /// Current balances in native units.
    #[must_use]
    pub const fn balances(&self) -> &Balances {
        &self.balances
    }

    /// Outstanding LP shares.
    #[must_use]
    pub const fn total_supply(&self) -> Liquidity {
        self.total_supply
    }

    /// Native decimals of each coin.
    #[must_use]
    pub fn decimals(&self) -> &[Decimals] {
        &self.decimals
    }

    /// Replaces balances and supply with those of an outcome the caller
    /// has executed.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidConfiguration`] if the coin count changes.
    /// - [`EngineError::ZeroBalance`] if shares remain but a coin is empty.
    pub fn commit(&mut self, balances: Balances, total_supply: Liquidity) -> Result<(), EngineError> {
        if balances.len() != self.balances.len() {
            return Err(EngineError::InvalidConfiguration("coin count cannot change"));
        }
        if !total_supply.is_zero() {
            if let Some(index) = balances.first_zero() {
                return Err(EngineError::ZeroBalance { index });
            }
        }
        self.balances = balances;
        self.total_supply = total_supply;
        Ok(())
    }

    // -- helpers -----------------------------------------------------------

    fn amp(&self) -> u128 {
        u128::from(self.amplification)
    }

    /// Lifts a native amount of coin `index` to the internal precision.
    fn internal(&self, index: usize, amount: Amount) -> Result<u128, EngineError> {
        self.decimals
            .get(index)
            .map_or(Ok(amount.get()), |d| d.to_internal(amount))
    }

    /// Drops an internal-precision value to coin `index`'s decimals,
    /// truncating.
    fn native(&self, index: usize, value: u128) -> Amount {
        self.decimals
            .get(index)
            .and_then(|d| d.from_internal(value, Rounding::Down))
            .unwrap_or(Amount::new(value))
    }

    fn check_index(&self, index: usize) -> Result<(), EngineError> {
        if index >= self.n_coins() {
            return Err(EngineError::InvalidIndex {
                index,
                n_coins: self.n_coins(),
            });
        }
        Ok(())
    }

    fn check_amounts(&self, amounts: &[Amount]) -> Result<(), EngineError> {
        if amounts.len() != self.n_coins() {
            return Err(EngineError::InvalidQuantity("one amount per coin required"));
        }
        Ok(())
    }

    /// Lifts native balances to the 18-decimal internal precision.
    fn scale(&self, raw: &[u128]) -> Result<Vec<u128>, EngineError> {
        raw.iter()
            .zip(&self.decimals)
            .map(|(&v, d)| d.to_internal(Amount::new(v)))
            .collect()
    }

    fn d_of(&self, raw: &[u128]) -> Result<u128, EngineError> {
        compute_d(&self.scale(raw)?, self.amp())
    }

    fn subtract(raw: &[u128], amounts: &[Amount]) -> Result<Vec<u128>, EngineError> {
        raw.iter()
            .zip(amounts)
            .map(|(&b, a)| {
                b.checked_sub(a.get())
                    .ok_or(EngineError::InvalidQuantity("withdrawal exceeds pool balance"))
            })
            .collect()
    }

    fn add(raw: &[u128], amounts: &[Amount]) -> Result<Vec<u128>, EngineError> {
        raw.iter()
            .zip(amounts)
            .map(|(&b, a)| {
                b.checked_add(a.get())
                    .ok_or(EngineError::Overflow("deposit overflows pool balance"))
            })
            .collect()
    }

    /// Imbalance fees for moving from `old` to `new` balances where the
    /// invariant goes from `d0` to `d1`.
    ///
    /// Returns `(fees, admin_fees)` per coin in native units.
    fn imbalance_fees(
        &self,
        old: &[u128],
        new: &[u128],
        d0: u128,
        d1: u128,
    ) -> Result<(Vec<u128>, Vec<u128>), EngineError> {
        let rate = self.fees.imbalance_fee(self.n_coins());
        let admin = self.fees.admin_fee();
        let mut fees = Vec::with_capacity(old.len());
        let mut admin_fees = Vec::with_capacity(old.len());
        for (&o, &n) in old.iter().zip(new) {
            let ideal = mul_div(d1, o, d0, Rounding::Down)?;
            let fee = rate.apply(ideal.abs_diff(n))?;
            admin_fees.push(admin.apply(fee)?);
            fees.push(fee);
        }
        Ok((fees, admin_fees))
    }

    /// Splits post-change balances into the ones to persist (admin fees
    /// removed) and the ones to price (all fees removed).
    fn deduct_fees(
        new: &[u128],
        fees: &[u128],
        admin_fees: &[u128],
    ) -> Result<(Vec<u128>, Vec<u128>), EngineError> {
        let underflow = EngineError::Underflow("imbalance fee exceeds balance");
        let mut persisted = Vec::with_capacity(new.len());
        let mut net = Vec::with_capacity(new.len());
        for ((&n, &fee), &admin) in new.iter().zip(fees).zip(admin_fees) {
            persisted.push(n.checked_sub(admin).ok_or(underflow.clone())?);
            net.push(n.checked_sub(fee).ok_or(underflow.clone())?);
        }
        Ok((persisted, net))
    }

    // -- read-only quantities ----------------------------------------------

    /// Balances at 18-decimal precision.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`] if a scaled balance exceeds `u128`.
    pub fn xp(&self) -> Result<Vec<u128>, EngineError> {
        self.scale(&self.balances.to_raw())
    }

    /// Current invariant `D`.
    ///
    /// # Errors
    ///
    /// See [`compute_d`].
    pub fn invariant(&self) -> Result<u128, EngineError> {
        compute_d(&self.xp()?, self.amp())
    }

    /// Value of one LP share in 18-decimal units: `D · 10^18 / supply`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidQuantity`] if no shares exist.
    /// - Any error from [`compute_d`].
    pub fn virtual_price(&self) -> Result<u128, EngineError> {
        if self.total_supply.is_zero() {
            return Err(EngineError::InvalidQuantity("pool has no shares"));
        }
        mul_div(
            self.invariant()?,
            VIRTUAL_PRICE_PRECISION,
            self.total_supply.get(),
            Rounding::Down,
        )
    }

    /// Output of selling `dx` of coin `i` for coin `j`, net of the swap fee.
    ///
    /// # Errors
    ///
    /// Same as [`exchange`](Self::exchange) without the slippage check.
    pub fn get_dy(&self, i: usize, j: usize, dx: Amount) -> Result<Amount, EngineError> {
        self.exchange(i, j, dx, Amount::ZERO)
            .map(|outcome| outcome.amount_out())
    }

    /// Shares a deposit would mint (or a withdrawal burn) ignoring fees.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidQuantity`] for a wrong-length amount list or
    ///   a withdrawal from a pool without shares.
    /// - Any error from [`compute_d`].
    pub fn calc_token_amount(&self, amounts: &[Amount], is_deposit: bool) -> Result<Liquidity, EngineError> {
        self.check_amounts(amounts)?;
        let old = self.balances.to_raw();
        let supply = self.total_supply.get();
        let new = if is_deposit {
            Self::add(&old, amounts)?
        } else {
            if supply == 0 {
                return Err(EngineError::InvalidQuantity("pool has no shares"));
            }
            Self::subtract(&old, amounts)?
        };
        let d1 = self.d_of(&new)?;
        if supply == 0 {
            return Ok(Liquidity::new(d1));
        }
        let d0 = self.d_of(&old)?;
        let diff = d1.abs_diff(d0);
        mul_div(supply, diff, d0, Rounding::Down).map(Liquidity::new)
    }

    // -- swaps -------------------------------------------------------------

    /// Sells `dx` of coin `i` for coin `j`.
    ///
    /// Gross output is `xp[j] − y − 1` with `y` from [`compute_y`], floored
    /// at zero.  The swap fee comes out of the gross output; its admin share
    /// is removed from the pool balance.
    ///
    /// # Errors
    ///
    /// - [`EngineError::SameCoin`] / [`EngineError::InvalidIndex`] for bad
    ///   indices.
    /// - [`EngineError::InvalidQuantity`] if `dx` is zero.
    /// - [`EngineError::ZeroBalance`] if either coin's balance is zero.
    /// - [`EngineError::SlippageExceeded`] if the net output is below
    ///   `min_dy`.
    /// - [`EngineError::InvariantNotConverged`] from the Newton solve.
    pub fn exchange(&self, i: usize, j: usize, dx: Amount, min_dy: Amount) -> Result<SwapOutcome, EngineError> {
        if i == j {
            return Err(EngineError::SameCoin { index: i });
        }
        let held = [(i, self.balances.try_get(i)?), (j, self.balances.try_get(j)?)];
        if dx.is_zero() {
            return Err(EngineError::InvalidQuantity("swap amount is zero"));
        }
        if let Some(&(index, _)) = held.iter().find(|(_, balance)| balance.is_zero()) {
            return Err(EngineError::ZeroBalance { index });
        }

        let balances = self.balances.to_raw();
        let xp = self.scale(&balances)?;
        let x = self
            .internal(i, dx)?
            .checked_add(xp[i])
            .ok_or(EngineError::Overflow("swap input overflows"))?;
        let y = compute_y(i, j, x, &xp, self.amp())?;

        let dy = xp[j].saturating_sub(y).saturating_sub(1);
        let dy_fee = self.fees.swap_fee().apply(dy)?;
        let dy_admin = self.fees.admin_fee().apply(dy_fee)?;
        let amount_out = self.native(j, dy - dy_fee);
        if amount_out < min_dy {
            return Err(EngineError::SlippageExceeded {
                minimum: min_dy.get(),
                actual: amount_out.get(),
            });
        }
        let admin_out = self.native(j, dy_admin);

        let mut new_balances = balances;
        new_balances[i] = new_balances[i]
            .checked_add(dx.get())
            .ok_or(EngineError::Overflow("input balance overflow"))?;
        new_balances[j] = new_balances[j]
            .checked_sub(amount_out.get() + admin_out.get())
            .ok_or(EngineError::Underflow("output balance below zero"))?;

        Ok(SwapOutcome::new(
            (i, j),
            dx,
            amount_out,
            (self.native(j, dy_fee), admin_out),
            Balances::from_raw(&new_balances)?,
        ))
    }

    // -- liquidity ---------------------------------------------------------

    /// Deposits `amounts` (one per coin, native units).
    ///
    /// The first deposit into an empty pool needs every coin and mints
    /// `D`.  Later deposits pay the imbalance fee and mint
    /// `supply · (D2 − D0) / D0`, where `D2` is the invariant net of fees.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidQuantity`] for a wrong-length or all-zero
    ///   deposit, or one that does not grow the invariant.
    /// - [`EngineError::ZeroBalance`] if a first deposit omits a coin.
    /// - Any error from [`compute_d`].
    pub fn add_liquidity(&self, amounts: &[Amount]) -> Result<DepositOutcome, EngineError> {
        self.check_amounts(amounts)?;
        if amounts.iter().all(Amount::is_zero) {
            return Err(EngineError::InvalidQuantity("deposit is empty"));
        }
        let supply = self.total_supply;
        let old = self.balances.to_raw();
        if supply.is_zero() {
            if let Some(index) = amounts.iter().position(Amount::is_zero) {
                return Err(EngineError::ZeroBalance { index });
            }
        }

        let d0 = if supply.is_zero() { 0 } else { self.d_of(&old)? };
        let new = Self::add(&old, amounts)?;
        let d1 = self.d_of(&new)?;
        if d1 <= d0 {
            return Err(EngineError::InvalidQuantity("deposit does not grow the invariant"));
        }

        if supply.is_zero() {
            let minted = Liquidity::new(d1);
            return Ok(DepositOutcome::new(
                minted,
                vec![Amount::ZERO; amounts.len()],
                (d0, d1),
                Balances::from_raw(&new)?,
                minted,
            ));
        }

        let (fees, admin_fees) = self.imbalance_fees(&old, &new, d0, d1)?;
        let (persisted, net) = Self::deduct_fees(&new, &fees, &admin_fees)?;
        let d2 = self.d_of(&net)?;
        let minted = mul_div(supply.get(), d2.saturating_sub(d0), d0, Rounding::Down)?;
        let minted = Liquidity::new(minted);

        Ok(DepositOutcome::new(
            minted,
            fees.into_iter().map(Amount::new).collect(),
            (d0, d2),
            Balances::from_raw(&persisted)?,
            supply.safe_add(&minted)?,
        ))
    }

    /// Burns `shares` for a proportional slice of every balance.  No fee.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidQuantity`] if `shares` is zero.
    /// - [`EngineError::InsufficientShares`] if `shares` exceeds supply.
    pub fn remove_liquidity(&self, shares: Liquidity) -> Result<WithdrawOutcome, EngineError> {
        if shares.is_zero() {
            return Err(EngineError::InvalidQuantity("burn amount is zero"));
        }
        let supply = self.total_supply;
        let remaining = supply.safe_sub(&shares)?;

        let old = self.balances.to_raw();
        let mut amounts = Vec::with_capacity(old.len());
        let mut persisted = Vec::with_capacity(old.len());
        for &b in &old {
            let out = mul_div(b, shares.get(), supply.get(), Rounding::Down)?;
            amounts.push(Amount::new(out));
            persisted.push(b - out);
        }

        Ok(WithdrawOutcome::new(
            amounts,
            vec![Amount::ZERO; old.len()],
            shares,
            Balances::from_raw(&persisted)?,
            remaining,
        ))
    }

    /// Withdraws exactly `amounts`, burning
    /// `(D0 − D2) · supply / D0 + 1` shares.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidQuantity`] for a wrong-length or all-zero
    ///   request, one exceeding a balance, or a pool without shares.
    /// - [`EngineError::MaxBurnExceeded`] if the burn exceeds `max_burn`.
    /// - [`EngineError::InsufficientShares`] if it exceeds the supply.
    /// - Any error from [`compute_d`].
    pub fn remove_liquidity_imbalance(
        &self,
        amounts: &[Amount],
        max_burn: Liquidity,
    ) -> Result<WithdrawOutcome, EngineError> {
        self.check_amounts(amounts)?;
        if amounts.iter().all(Amount::is_zero) {
            return Err(EngineError::InvalidQuantity("withdrawal is empty"));
        }
        let supply = self.total_supply;
        if supply.is_zero() {
            return Err(EngineError::InvalidQuantity("pool has no shares"));
        }

        let old = self.balances.to_raw();
        let d0 = self.d_of(&old)?;
        let new = Self::subtract(&old, amounts)?;
        let d1 = self.d_of(&new)?;

        let (fees, admin_fees) = self.imbalance_fees(&old, &new, d0, d1)?;
        let (persisted, net) = Self::deduct_fees(&new, &fees, &admin_fees)?;
        let d2 = self.d_of(&net)?;

        let burn = mul_div(d0.saturating_sub(d2), supply.get(), d0, Rounding::Down)?
            .checked_add(1)
            .ok_or(EngineError::Overflow("burn amount overflow"))?;
        if burn > max_burn.get() {
            return Err(EngineError::MaxBurnExceeded {
                maximum: max_burn.get(),
                actual: burn,
            });
        }
        let burned = Liquidity::new(burn);
        let remaining = supply.safe_sub(&burned)?;

        Ok(WithdrawOutcome::new(
            amounts.to_vec(),
            fees.into_iter().map(Amount::new).collect(),
            burned,
            Balances::from_raw(&persisted)?,
            remaining,
        ))
    }

    /// Amount of coin `i` that burning `shares` pays out, and the
    /// imbalance fee withheld, both in native units.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidIndex`] for a bad index.
    /// - [`EngineError::InvalidQuantity`] if `shares` is zero or equals the
    ///   whole supply.
    /// - [`EngineError::InsufficientShares`] if `shares` exceeds supply.
    /// - Any error from the Newton solvers.
    pub fn calc_withdraw_one_coin(&self, shares: Liquidity, i: usize) -> Result<(Amount, Amount), EngineError> {
        self.check_index(i)?;
        if shares.is_zero() {
            return Err(EngineError::InvalidQuantity("burn amount is zero"));
        }
        let supply = self.total_supply;
        if shares > supply {
            return Err(EngineError::InsufficientShares {
                requested: shares.get(),
                available: supply.get(),
            });
        }
        if shares == supply {
            return Err(EngineError::InvalidQuantity("cannot withdraw the whole supply in one coin"));
        }

        let amp = self.amp();
        let rate = self.fees.imbalance_fee(self.n_coins());
        let xp = self.xp()?;
        let d0 = compute_d(&xp, amp)?;
        let d1 = d0 - mul_div(shares.get(), d0, supply.get(), Rounding::Down)?;
        let new_y = compute_y_d(amp, i, &xp, d1)?;

        let mut xp_reduced = xp.clone();
        for (k, reduced) in xp_reduced.iter_mut().enumerate() {
            let scaled = mul_div(xp[k], d1, d0, Rounding::Down)?;
            let expected = if k == i {
                scaled.saturating_sub(new_y)
            } else {
                xp[k] - scaled
            };
            *reduced -= rate.apply(expected)?;
        }

        let y_reduced = compute_y_d(amp, i, &xp_reduced, d1)?;
        let dy = self.native(i, xp_reduced[i].saturating_sub(y_reduced).saturating_sub(1));
        let dy_0 = self.native(i, xp[i].saturating_sub(new_y));
        Ok((dy, dy_0.saturating_sub(&dy)))
    }

    /// Burns `shares` for coin `i` alone.
    ///
    /// The admin share of the withheld fee leaves the pool.
    ///
    /// # Errors
    ///
    /// Same as [`calc_withdraw_one_coin`](Self::calc_withdraw_one_coin),
    /// plus [`EngineError::SlippageExceeded`] below `min_amount`.
    pub fn remove_liquidity_one_coin(
        &self,
        shares: Liquidity,
        i: usize,
        min_amount: Amount,
    ) -> Result<WithdrawOutcome, EngineError> {
        let (dy, fee) = self.calc_withdraw_one_coin(shares, i)?;
        if dy < min_amount {
            return Err(EngineError::SlippageExceeded {
                minimum: min_amount.get(),
                actual: dy.get(),
            });
        }
        let admin = self.fees.admin_fee().apply(fee.get())?;

        let mut persisted = self.balances.to_raw();
        persisted[i] = persisted[i]
            .checked_sub(dy.get() + admin)
            .ok_or(EngineError::Underflow("withdrawal exceeds pool balance"))?;

        let n = self.n_coins();
        let mut amounts = vec![Amount::ZERO; n];
        let mut fees = vec![Amount::ZERO; n];
        amounts[i] = dy;
        fees[i] = fee;

        Ok(WithdrawOutcome::new(
            amounts,
            fees,
            shares,
            Balances::from_raw(&persisted)?,
            self.total_supply.safe_sub(&shares)?,
        ))
    }

    /// Returns `true` if the pool holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balances.is_all_zero()
    }
}
