//! # Uviswap
//!
//! Constant-product automated market maker: a factory that creates one
//! liquidity pair per unordered token pair, and pairs that mint shares,
//! burn shares and swap with a fee retained by liquidity providers.
//!
//! Token balances live outside the engine behind the
//! [`TokenLedger`](traits::TokenLedger) capability.  Pairs move funds with
//! allowance-based pulls and direct pushes, and never leave a half-applied
//! operation behind: any failure restores both the pair and the ledger.
//!
//! # Quick Start
//!
//! ```rust
//! use uviswap::prelude::*;
//!
//! let lp = Address::from_low_u64(1);
//! let trader = Address::from_low_u64(2);
//!
//! // 1. Deploy two tokens on an in-memory ledger
//! let mut ledger = MemoryLedger::new();
//! let usdt = ledger.deploy_token("Tether", "USDT", 18, 1_000, lp).expect("deployed");
//! let usdc = ledger.deploy_token("USD Coin", "USDC", 18, 1_000, lp).expect("deployed");
//!
//! // 2. Create the pair through a factory
//! let mut factory = PairFactory::new(Address::from_low_u64(100), PairConfig::default())
//!     .expect("valid blueprint");
//! let handle = factory.create_pair(usdt, usdc).expect("new pair");
//! let pair = factory.pair_mut(handle).expect("registered");
//!
//! // 3. Provide liquidity
//! let deposit = Amount::new(500 * 10u128.pow(18));
//! ledger.approve(usdt, lp, pair.address(), deposit).expect("approved");
//! ledger.approve(usdc, lp, pair.address(), deposit).expect("approved");
//! let shares = pair.add_liquidity(&mut ledger, lp, deposit, deposit).expect("minted");
//! assert_eq!(shares.get(), deposit.get());
//!
//! // 4. Swap 100 USDT for USDC
//! let amount_in = Amount::new(100 * 10u128.pow(18));
//! ledger.transfer(usdt, lp, trader, amount_in).expect("funded");
//! ledger.approve(usdt, trader, pair.address(), amount_in).expect("approved");
//! let result = pair.swap(&mut ledger, trader, usdt, amount_in).expect("swapped");
//! assert_eq!(ledger.balance_of(usdc, trader), result.amount_out());
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Address`](domain::Address), [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`FeeTier`](domain::FeeTier), etc. |
//! | [`traits`] | The [`TokenLedger`](traits::TokenLedger) capability |
//! | [`config`] | [`PairConfig`](config::PairConfig) blueprint |
//! | [`ledger`] | [`MemoryLedger`](ledger::MemoryLedger) and transfer rollback |
//! | [`pools`]  | The constant-product [`Pair`](pools::Pair) |
//! | [`factory`] | [`PairFactory`](factory::PairFactory) registry |
//! | [`events`] | [`PairCreated`](events::PairCreated) and [`PairEvent`](events::PairEvent) records |
//! | [`math`]   | 256-bit integers, checked arithmetic, integer square root |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports |

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod factory;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod traits;
