//! Fundamental domain value types used throughout the crate.
//!
//! Amounts, LP shares, fee rates, balance vectors, operation outcomes and
//! the allocation request/plan pair.  All types are newtypes or plain
//! structs with validated constructors so invariants hold from the moment
//! a value exists.

mod allocation;
mod amount;
mod balances;
mod basis_points;
mod decimals;
mod fee_schedule;
mod liquidity;
mod liquidity_outcome;
mod quantity;
mod rounding;
mod swap_outcome;

pub use allocation::{AllocationPlan, AllocationRequest, SwapDirection};
pub use amount::Amount;
pub use balances::{Balances, MAX_COINS, MIN_COINS};
pub use basis_points::{BasisPoints, BPS_DENOMINATOR};
pub use decimals::Decimals;
pub use fee_schedule::{FeeRate, FeeSchedule, FEE_DENOMINATOR, MAX_ADMIN_FEE, MAX_FEE};
pub use liquidity::Liquidity;
pub use liquidity_outcome::{DepositOutcome, WithdrawOutcome};
pub use rounding::Rounding;
pub use swap_outcome::SwapOutcome;
