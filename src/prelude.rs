//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use uviswap::prelude::*;
//! ```

pub use crate::config::PairConfig;
pub use crate::domain::{
    Address, Amount, BasisPoints, FeeTier, Shares, SwapResult, TokenPair, Withdrawal,
};
pub use crate::error::{AmmError, Result};
pub use crate::events::{PairCreated, PairEvent};
pub use crate::factory::{PairFactory, PairHandle};
pub use crate::ledger::MemoryLedger;
pub use crate::math::CheckedArithmetic;
pub use crate::pools::Pair;
pub use crate::traits::TokenLedger;
