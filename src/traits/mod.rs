//! Core trait abstractions.
//!
//! [`TokenLedger`] is the seam between the AMM engine and whatever holds
//! the actual token balances.  Pairs are generic over it, so the same
//! engine runs against the in-memory reference ledger in tests and against
//! any host ledger in production.

mod token_ledger;

pub use token_ledger::TokenLedger;
