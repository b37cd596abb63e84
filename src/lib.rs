//! # Stable Allocator
//!
//! StableSwap invariant engine and optimal two-asset liquidity allocation.
//!
//! A caller holding amounts `(x, y)` of two stablecoins wants the largest
//! share of a constant-product pair with reserves `(rA, rB)`.  Depositing
//! as-is strands the excess; swapping the excess naively through the pair
//! pays its fee and moves its price.  This crate instead prices the
//! rebalancing swap on a Curve-style StableSwap basket and searches the
//! swap size that lands the holdings exactly on `rA : rB`.
//!
//! Everything is integer arithmetic over `u128` amounts with 256-bit
//! intermediates.  Nothing here touches I/O, clocks or shared state.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no | `Serialize`/`Deserialize` on domain, config and plan types |
//!
//! # Quick Start
//!
//! ```rust
//! use stable_allocator::config::{SolverConfig, StablePoolConfig};
//! use stable_allocator::domain::{
//!     AllocationRequest, Amount, Balances, BasisPoints, FeeSchedule, Liquidity, SwapDirection,
//! };
//! use stable_allocator::pools::{ConstantProductPair, StableSwapPool};
//! use stable_allocator::solver::{AllocationSolver, StableRoute};
//! use stable_allocator::traits::FromConfig;
//!
//! const UNIT: u128 = 1_000_000_000_000_000_000;
//!
//! // 1. A two-coin stable basket, A = 1500, 4 bps swap fee
//! let balances = Balances::from_raw(&[200_000_000 * UNIT, 200_000_000 * UNIT]).expect("2 coins");
//! let fees = FeeSchedule::from_bps(BasisPoints::new(4)).expect("valid fee");
//! let cfg = StablePoolConfig::uniform(1_500, fees, balances, Liquidity::new(400_000_000 * UNIT))
//!     .expect("valid config");
//! let stable = StableSwapPool::from_config(&cfg).expect("valid pool");
//!
//! // 2. The destination pair and the stable route between its assets
//! let pair = ConstantProductPair::new(Amount::new(1_000_000 * UNIT), Amount::new(1_000_000 * UNIT))
//!     .expect("valid pair");
//! let route = StableRoute::new(&stable, 0, 1).expect("valid route");
//!
//! // 3. Plan the deposit of 30 000 X and 20 000 Y
//! let solver = AllocationSolver::new(SolverConfig::default()).expect("valid solver");
//! let request = AllocationRequest::new(Amount::new(30_000 * UNIT), Amount::new(20_000 * UNIT));
//! let plan = solver.solve(&request, &pair, &route).expect("plan");
//!
//! assert_eq!(plan.swap_direction(), SwapDirection::XToY);
//! assert!(plan.dust_x().get() < 100 && plan.dust_y().get() < 100);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ AllocationSolver │  bisection over the swap size
//! └────────┬─────────┘
//!          │ SwapQuoter::quote(direction, s)
//!          ▼
//! ┌──────────────────┐      ┌─────────────────────┐
//! │   StableRoute    │      │ ConstantProductPair │  target ratio,
//! └────────┬─────────┘      └─────────────────────┘  deposit, mint
//!          │ get_dy(i, j, s)
//!          ▼
//! ┌──────────────────┐
//! │  StableSwapPool  │  exchange, liquidity, virtual price
//! └────────┬─────────┘
//!          │ compute_d / compute_y
//!          ▼
//! ┌──────────────────┐
//! │       math       │  Newton solvers, U256 helpers
//! └──────────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Balances`](domain::Balances), [`FeeSchedule`](domain::FeeSchedule), the allocation request and plan |
//! | [`traits`] | [`FromConfig`](traits::FromConfig) and the [`SwapQuoter`](traits::SwapQuoter) seam |
//! | [`config`] | [`StablePoolConfig`](config::StablePoolConfig) and [`SolverConfig`](config::SolverConfig) |
//! | [`pools`]  | [`StableSwapPool`](pools::StableSwapPool) and [`ConstantProductPair`](pools::ConstantProductPair) |
//! | [`solver`] | [`AllocationSolver`](solver::AllocationSolver) and [`StableRoute`](solver::StableRoute) |
//! | [`quote`]  | Call-style functions over raw integers |
//! | [`math`]   | Invariant solvers, checked and 256-bit arithmetic |
//! | [`error`]  | [`EngineError`](error::EngineError) and [`SolverError`](error::SolverError) |
//! | [`prelude`] | Convenience re-exports for common types and traits |
//!
//! # Logging
//!
//! The crate emits [`tracing`] events: `debug` for solver decisions,
//! `trace` per bisection step, `warn` when an iteration cap is hit.  It
//! never installs a subscriber.

pub mod config;
pub mod domain;
pub mod error;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod quote;
pub mod solver;
pub mod traits;
