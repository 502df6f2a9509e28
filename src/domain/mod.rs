//! Fundamental domain value types used throughout the AMM library.
//!
//! This module contains the core value types that model the AMM domain:
//! addresses, token amounts, liquidity shares, fees, token pairs and
//! operation outcomes.  All types use newtypes with validated constructors
//! to enforce invariants.

mod address;
mod amount;
mod basis_points;
mod fee_tier;
mod shares;
mod swap_result;
mod token_pair;
mod withdrawal;

pub use address::Address;
pub use amount::Amount;
pub use basis_points::BasisPoints;
pub use fee_tier::FeeTier;
pub use shares::Shares;
pub use swap_result::SwapResult;
pub use token_pair::TokenPair;
pub use withdrawal::Withdrawal;
