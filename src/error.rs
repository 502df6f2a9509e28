//! Unified error types for the Uviswap library.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type.  Every error is terminal for the operation that raised it:
//! nothing is retried internally, and no reserve, share or ledger mutation
//! survives a failed call.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Every failure a pair, factory or ledger operation can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum AmmError {
    // -- validation ---------------------------------------------------------
    /// Both sides of a pair are the same token.
    #[error("identical tokens")]
    IdenticalTokens,

    /// The zero address was supplied where a real identifier is required.
    #[error("zero address")]
    ZeroAddress,

    /// The token is not one of the pair's two tokens.
    #[error("token is not part of this pair")]
    UnknownToken,

    /// A required amount was zero.
    #[error("amount must be greater than zero")]
    ZeroAmount,

    /// Registry index or handle out of bounds.
    #[error("index out of range")]
    IndexOutOfRange,

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    // -- economic guards ----------------------------------------------------
    /// First deposit too small to mint a single share.
    #[error("insufficient initial liquidity")]
    InsufficientInitialLiquidity,

    /// Deposit into a live pool would mint zero shares.
    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// Burn would pay out zero of at least one token.
    #[error("insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    /// Swap would pay out nothing.
    #[error("insufficient output amount")]
    InsufficientOutputAmount,

    /// Caller holds fewer shares than requested, or requested zero.
    #[error("insufficient shares")]
    InsufficientShares,

    /// The pool is empty.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    // -- registry / lifecycle -----------------------------------------------
    /// A pair already exists for this token combination.
    #[error("pair already exists")]
    PairExists,

    /// `initialize` was called on an initialised pair.
    #[error("pair already initialized")]
    AlreadyInitialized,

    /// The pair has not been initialised with its tokens yet.
    #[error("pair not initialized")]
    NotInitialized,

    // -- propagated ---------------------------------------------------------
    /// The token ledger refused a transfer.
    #[error("transfer failed: {0}")]
    TransferFailed(&'static str),

    // -- arithmetic ---------------------------------------------------------
    /// Checked arithmetic overflowed.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Checked arithmetic underflowed.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A post-condition that must always hold did not.
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),
}
