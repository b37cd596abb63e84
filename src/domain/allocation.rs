//! Allocation request and the deposit plan the solver returns.

use core::fmt;

use super::{Amount, Liquidity};

/// Which way the stable leg swaps, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapDirection {
    /// Amounts already match the destination ratio.
    NoSwap,
    /// Sell part of X for Y through the stable pool.
    XToY,
    /// Sell part of Y for X through the stable pool.
    YToX,
}

impl SwapDirection {
    /// Returns `true` unless this is [`SwapDirection::NoSwap`].
    #[must_use]
    pub const fn swaps(&self) -> bool {
        !matches!(self, Self::NoSwap)
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NoSwap => "none",
            Self::XToY => "x->y",
            Self::YToX => "y->x",
        };
        f.write_str(s)
    }
}

/// Two amounts headed for a constant-product pair, X matching the pair's
/// reserve A and Y matching reserve B.
///
/// `min_swap_output` guards the stable leg: a plan whose swap would return
/// less is rejected as slippage.
///
/// # Examples
///
/// ```
/// use stable_allocator::domain::{AllocationRequest, Amount};
///
/// let req = AllocationRequest::new(Amount::new(30_000), Amount::new(20_000));
/// assert_eq!(req.min_swap_output(), Amount::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationRequest {
    amount_x: Amount,
    amount_y: Amount,
    min_swap_output: Amount,
}

impl AllocationRequest {
    /// A request with no swap-output guard.
    pub const fn new(amount_x: Amount, amount_y: Amount) -> Self {
        Self {
            amount_x,
            amount_y,
            min_swap_output: Amount::ZERO,
        }
    }

    /// Sets the minimum acceptable output of the stable swap leg.
    pub const fn with_min_swap_output(mut self, min_swap_output: Amount) -> Self {
        self.min_swap_output = min_swap_output;
        self
    }

    /// Amount of the X-side asset.
    pub const fn amount_x(&self) -> Amount {
        self.amount_x
    }

    /// Amount of the Y-side asset.
    pub const fn amount_y(&self) -> Amount {
        self.amount_y
    }

    /// Minimum output of the swap leg.
    pub const fn min_swap_output(&self) -> Amount {
        self.min_swap_output
    }
}

/// Deposit plan produced by the allocation solver.
///
/// `final_x`/`final_y` are the holdings after the stable swap; the
/// deposited amounts are `final − dust` on each side.
///
/// # Invariants
///
/// - `dust_x <= final_x` and `dust_y <= final_y`.
/// - At most one side carries dust from the proportional deposit.
/// - `swap_amount == 0` iff `swap_direction == NoSwap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationPlan {
    final_x: Amount,
    final_y: Amount,
    shares_estimate: Liquidity,
    dust_x: Amount,
    dust_y: Amount,
    swap_amount: Amount,
    swap_output: Amount,
    swap_direction: SwapDirection,
    iterations: u32,
}

impl AllocationPlan {
    pub(crate) const fn new(
        (final_x, final_y): (Amount, Amount),
        shares_estimate: Liquidity,
        (dust_x, dust_y): (Amount, Amount),
        swap_amount: Amount,
        swap_output: Amount,
        swap_direction: SwapDirection,
        iterations: u32,
    ) -> Self {
        Self {
            final_x,
            final_y,
            shares_estimate,
            dust_x,
            dust_y,
            swap_amount,
            swap_output,
            swap_direction,
            iterations,
        }
    }

    /// X holdings after the swap.
    pub const fn final_x(&self) -> Amount {
        self.final_x
    }

    /// Y holdings after the swap.
    pub const fn final_y(&self) -> Amount {
        self.final_y
    }

    /// X actually deposited (`final_x − dust_x`).
    pub const fn deposit_x(&self) -> Amount {
        self.final_x.saturating_sub(&self.dust_x)
    }

    /// Y actually deposited (`final_y − dust_y`).
    pub const fn deposit_y(&self) -> Amount {
        self.final_y.saturating_sub(&self.dust_y)
    }

    /// LP shares the destination pair is expected to mint.
    #[must_use]
    pub const fn shares_estimate(&self) -> Liquidity {
        self.shares_estimate
    }

    /// X left over after the deposit.
    pub const fn dust_x(&self) -> Amount {
        self.dust_x
    }

    /// Y left over after the deposit.
    pub const fn dust_y(&self) -> Amount {
        self.dust_y
    }

    /// Amount sold through the stable pool.
    pub const fn swap_amount(&self) -> Amount {
        self.swap_amount
    }

    /// Amount the stable pool is quoted to return.
    pub const fn swap_output(&self) -> Amount {
        self.swap_output
    }

    /// Direction of the stable swap.
    #[must_use]
    pub const fn swap_direction(&self) -> SwapDirection {
        self.swap_direction
    }

    /// Bisection steps spent; zero on the fast path.
    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }
}

impl fmt::Display for AllocationPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AllocationPlan(swap {} {}, deposit {}/{}, dust {}/{}, shares {})",
            self.swap_direction,
            self.swap_amount,
            self.deposit_x(),
            self.deposit_y(),
            self.dust_x,
            self.dust_y,
            self.shares_estimate
        )
    }
}
