//! Optimal stable-route allocation example.
//!
//! Demonstrates planning a two-stablecoin deposit into a constant-product
//! pair: the solver sizes the rebalancing swap on a StableSwap basket so
//! the holdings land on the pair's reserve ratio, and the result is
//! compared with swapping a fixed 5 000 up front.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=stable_allocator=debug cargo run --example stable_optimal
//! ```

use stable_allocator::config::{SolverConfig, StablePoolConfig};
use stable_allocator::domain::{
    AllocationRequest, Amount, Balances, FeeRate, FeeSchedule, Liquidity,
};
use stable_allocator::pools::{ConstantProductPair, StableSwapPool};
use stable_allocator::solver::{AllocationSolver, StableRoute};
use stable_allocator::traits::FromConfig;
use tracing_subscriber::EnvFilter;

const UNIT: u128 = 1_000_000_000_000_000_000;
const BUSD: usize = 0;
const USDT: usize = 2;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Optimal stable-route allocation ===\n");

    // ── 1. The stable basket: BUSD / USDC / USDT ────────────────────────
    //    A = 1500, 0.04% swap fee, half of each fee to the protocol
    let balances = Balances::from_raw(&[
        208_410_034 * UNIT,
        267_533_680 * UNIT,
        167_034_881 * UNIT,
    ])?;
    let fees = FeeSchedule::new(FeeRate::new(4_000_000)?, FeeRate::new(5_000_000_000)?)?;
    let supply = Liquidity::new(balances.to_raw().iter().sum());
    let config = StablePoolConfig::uniform(1_500, fees, balances, supply)?;
    let stable = StableSwapPool::from_config(&config)?;

    println!("Stable basket:   {}", stable.balances());
    println!("  Invariant D:   {}", stable.invariant()?);
    println!("  Virtual price: {}", stable.virtual_price()?);

    // ── 2. The destination pair: USDT / BUSD ────────────────────────────
    let pair = ConstantProductPair::new(
        Amount::new(154_750_056 * UNIT),
        Amount::new(154_656_157 * UNIT),
    )?;
    println!("\nDestination pair: {pair}");

    // ── 3. Plan 20 000 USDT + 30 000 BUSD ───────────────────────────────
    let route = StableRoute::new(&stable, USDT, BUSD)?;
    let solver = AllocationSolver::new(SolverConfig::default())?;
    let request = AllocationRequest::new(Amount::new(20_000 * UNIT), Amount::new(30_000 * UNIT));
    let plan = solver.solve(&request, &pair, &route)?;

    println!("\nOptimal plan:");
    println!("  Direction:     {}", plan.swap_direction());
    println!("  Swap:          {} -> {}", plan.swap_amount(), plan.swap_output());
    println!("  Deposit:       {} USDT + {} BUSD", plan.deposit_x(), plan.deposit_y());
    println!("  Dust:          {} USDT, {} BUSD", plan.dust_x(), plan.dust_y());
    println!("  Shares:        {}", plan.shares_estimate());
    println!("  Iterations:    {}", plan.iterations());

    // ── 4. Compare with swapping a fixed 5 000 BUSD ─────────────────────
    let sell = Amount::new(5_000 * UNIT);
    let received = stable.get_dy(BUSD, USDT, sell)?;
    let holdings_x = Amount::new(20_000 * UNIT + received.get());
    let holdings_y = Amount::new(25_000 * UNIT);
    let (dx, dy) = pair.optimal_deposit(holdings_x, holdings_y)?;
    let baseline = pair.mint_estimate(dx, dy)?;

    println!("\nFixed 5 000 swap:");
    println!("  Shares:        {baseline}");
    println!(
        "  Left behind:   {} USDT, {} BUSD",
        holdings_x.saturating_sub(&dx),
        holdings_y.saturating_sub(&dy)
    );
    println!(
        "\nExtra shares from the optimal plan: {}",
        plan.shares_estimate().get().saturating_sub(baseline.get())
    );

    // ── 5. Stable route versus swapping through the pair ────────────────
    let naive = pair.amount_out(sell, false)?;
    println!("\n5 000 BUSD -> USDT:");
    println!("  Stable basket: {received}");
    println!("  Pair itself:   {naive}");

    println!("\n=== Done ===");
    Ok(())
}
