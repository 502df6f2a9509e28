//! Outcome of a swap operation.

use core::fmt;

use super::{Address, Amount};
use crate::error::AmmError;

/// The outcome of a swap: which token went in, which came out, how much of
/// each, and the portion of the input the pool kept as fee.
///
/// # Invariants
///
/// - `amount_in > 0` and `amount_out > 0`.
/// - `fee <= amount_in`.
///
/// # Examples
///
/// ```
/// use uviswap::domain::{Address, Amount, SwapResult};
///
/// let result = SwapResult::new(
///     Address::from_low_u64(1),
///     Address::from_low_u64(2),
///     Amount::new(1_000),
///     Amount::new(990),
///     Amount::new(3),
/// );
/// assert!(result.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapResult {
    token_in: Address,
    token_out: Address,
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
}

impl SwapResult {
    /// Creates a new `SwapResult` with validated invariants.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`] if `amount_in` is zero.
    /// - [`AmmError::InsufficientOutputAmount`] if `amount_out` is zero.
    /// - [`AmmError::InvariantViolation`] if `fee > amount_in`.
    pub fn new(
        token_in: Address,
        token_out: Address,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
    ) -> Result<Self, AmmError> {
        if amount_in.is_zero() {
            return Err(AmmError::ZeroAmount);
        }
        if amount_out.is_zero() {
            return Err(AmmError::InsufficientOutputAmount);
        }
        if fee > amount_in {
            return Err(AmmError::InvariantViolation("fee exceeds amount_in"));
        }
        Ok(Self {
            token_in,
            token_out,
            amount_in,
            amount_out,
            fee,
        })
    }

    /// Returns the token sold to the pool.
    #[must_use]
    pub const fn token_in(&self) -> Address {
        self.token_in
    }

    /// Returns the token bought from the pool.
    #[must_use]
    pub const fn token_out(&self) -> Address {
        self.token_out
    }

    /// Returns the input amount.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Returns the output amount.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Returns the fee retained by the pool, in units of `token_in`.
    pub const fn fee(&self) -> Amount {
        self.fee
    }
}

impl fmt::Display for SwapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapResult(in={}, out={}, fee={})",
            self.amount_in, self.amount_out, self.fee
        )
    }
}
