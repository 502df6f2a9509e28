//! The external token capability pairs move funds through.
//!
//! A pair never stores token balances of its own beyond its reserve
//! counters: every deposit, payout and swap leg is a call into a
//! [`TokenLedger`].  The ledger is the authority on balances; the pair's
//! reserves mirror the pair address's ledger balances after every
//! successful operation.
//!
//! # Call Semantics
//!
//! | Pair operation | Ledger calls |
//! |----------------|--------------|
//! | `add_liquidity` | `transfer_from(token0)`, `transfer_from(token1)` |
//! | `remove_liquidity` | `transfer(token0)`, `transfer(token1)` |
//! | `swap` | `transfer_from(token_in)`, `transfer(token_out)` |
//!
//! `transfer_from` draws on an allowance the depositor granted the pair
//! via [`approve`](TokenLedger::approve).

use crate::domain::{Address, Amount};
use crate::error::AmmError;

/// Fungible-token ledger covering every token a pair may trade.
///
/// # Contract
///
/// - Each call is all-or-nothing: on `Err` no balance or allowance has
///   changed.
/// - Failures are reported as [`AmmError::TransferFailed`] and are
///   propagated unchanged by the pair.
/// - A completed leg must be reversible by a plain `transfer` back to
///   its sender.  A pair undoes the first leg of a failed operation that
///   way; if the ledger refuses, the pair returns
///   [`AmmError::InvariantViolation`] and the ledger keeps the
///   partial change.
///
/// # Implementors
///
/// - [`MemoryLedger`](crate::ledger::MemoryLedger) — in-memory reference
///   ledger used in tests and simulations.
pub trait TokenLedger {
    /// Returns `holder`'s balance of `token`.  Unknown tokens or holders
    /// have a zero balance.
    #[must_use]
    fn balance_of(&self, token: Address, holder: Address) -> Amount;

    /// Returns how much of `owner`'s `token` the `spender` may still move.
    #[must_use]
    fn allowance(&self, token: Address, owner: Address, spender: Address) -> Amount;

    /// Sets `spender`'s allowance over `owner`'s `token` to `amount`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::TransferFailed`] if the token is unknown.
    fn approve(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<(), AmmError>;

    /// Moves `amount` of `token` from `from` to `to`, authorised by `from`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::TransferFailed`] if the token is unknown or `from`'s
    ///   balance is too low.
    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), AmmError>;

    /// Moves `amount` of `token` from `from` to `to` on behalf of
    /// `spender`, consuming `spender`'s allowance.
    ///
    /// # Errors
    ///
    /// - [`AmmError::TransferFailed`] if the token is unknown, the
    ///   allowance is too low, or `from`'s balance is too low.
    fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), AmmError>;
}
