//! Constant-product pair lifecycle (Uniswap V2 style).
//!
//! Deploys two tokens on an in-memory ledger, creates their pair through a
//! factory, provides liquidity, trades against it and withdraws with the
//! collected fees.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=debug cargo run --example pair_lifecycle
//! ```

use uviswap::prelude::*;

const E18: u128 = 1_000_000_000_000_000_000;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== Constant Product Pair (x · y = k) ===\n");

    let lp = Address::from_low_u64(0x1);
    let trader = Address::from_low_u64(0x2);

    // ── 1. Deploy tokens ────────────────────────────────────────────────
    let mut ledger = MemoryLedger::new();
    let usdt = ledger.deploy_token("Tether USD", "USDT", 18, 1_000, lp)?;
    let usdc = ledger.deploy_token("USD Coin", "USDC", 18, 1_000, lp)?;
    ledger.transfer(usdt, lp, trader, Amount::new(200 * E18))?;
    println!("USDT: {usdt}");
    println!("USDC: {usdc}");

    // ── 2. Create the pair ──────────────────────────────────────────────
    let mut factory = PairFactory::new(Address::from_low_u64(0xfac), PairConfig::default())?;
    let handle = factory.create_pair(usdt, usdc)?;
    let pair = factory
        .pair_mut(handle)
        .ok_or("factory lost the new pair")?;
    println!("\nPair {handle} at {}", pair.address());
    println!("  token0:      {}", pair.token0());
    println!("  token1:      {}", pair.token1());
    println!("  fee:         {}", pair.fee_tier());

    // ── 3. Provide liquidity ────────────────────────────────────────────
    let deposit = Amount::new(500 * E18);
    ledger.approve(usdt, lp, pair.address(), deposit)?;
    ledger.approve(usdc, lp, pair.address(), deposit)?;
    let shares = pair.add_liquidity(&mut ledger, lp, deposit, deposit)?;
    println!("\n--- Add Liquidity ---");
    println!("  Deposited:   {deposit} + {deposit}");
    println!("  Minted:      {shares}");
    println!("  k:           {}", pair.k()?);

    // ── 4. Trade 100 USDT for USDC ──────────────────────────────────────
    let amount_in = Amount::new(100 * E18);
    println!("\n--- Swap: sell {amount_in} USDT ---");
    println!("  Quoted out:  {}", pair.quote_swap(usdt, amount_in)?);
    ledger.approve(usdt, trader, pair.address(), amount_in)?;
    let result = pair.swap(&mut ledger, trader, usdt, amount_in)?;
    println!("  {result}");
    println!("  k after:     {}", pair.k()?);

    // ── 5. Trade back ───────────────────────────────────────────────────
    let back = result.amount_out();
    ledger.approve(usdc, trader, pair.address(), back)?;
    let reverse = pair.swap(&mut ledger, trader, usdc, back)?;
    println!("\n--- Swap: sell {back} USDC ---");
    println!("  {reverse}");

    // ── 6. Withdraw everything ──────────────────────────────────────────
    let withdrawal = pair.remove_liquidity(&mut ledger, lp, shares)?;
    println!("\n--- Remove Liquidity ---");
    println!("  Burned:      {shares}");
    println!("  Returned:    {withdrawal}");
    println!("  Reserves:    {:?}", pair.reserves());
    println!("  LP USDT:     {}", ledger.balance_of(usdt, lp));
    println!("  LP USDC:     {}", ledger.balance_of(usdc, lp));

    println!("\nEvents:");
    for event in pair.drain_events() {
        println!("  {event:?}");
    }
    for created in factory.drain_events() {
        println!("  {created}");
    }

    println!("\n=== Done ===");
    Ok(())
}
