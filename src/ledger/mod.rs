//! Token ledger implementations and transfer bookkeeping.
//!
//! - [`MemoryLedger`] — in-memory multi-token ledger implementing
//!   [`TokenLedger`](crate::traits::TokenLedger), used by tests, demos and
//!   simulations.
//! - `TransferJournal` (crate-private) — records the transfers of one pair
//!   operation and reverses them if the operation does not complete.

mod journal;
mod memory;

pub(crate) use journal::TransferJournal;
pub use memory::{MemoryLedger, TokenInfo};
