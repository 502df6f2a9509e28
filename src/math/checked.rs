//! Checked arithmetic trait for domain wrapper types.
//!
//! The [`CheckedArithmetic`] trait provides fallible arithmetic operations
//! that return [`Result<Self, AmmError>`](crate::error::AmmError) instead
//! of panicking on overflow, underflow, or division by zero.
//!
//! # Implementations
//!
//! - [`Amount`] — token quantities
//! - [`Shares`] — liquidity share quantities
//!
//! # Examples
//!
//! ```
//! use uviswap::domain::Amount;
//! use uviswap::math::CheckedArithmetic;
//!
//! let a = Amount::new(100);
//! let b = Amount::new(200);
//! assert_eq!(a.safe_add(&b), Ok(Amount::new(300)));
//! assert!(a.safe_sub(&b).is_err());
//! ```

use super::U256;
use crate::domain::{Amount, Shares};
use crate::error::AmmError;

/// Fallible arithmetic for domain wrapper types.
///
/// Every method returns [`Result<Self, AmmError>`] with a specific error
/// variant so callers can distinguish overflow from underflow from
/// division by zero.
///
/// # Contract
///
/// - Never panics: every error condition produces `Err`.
/// - Never saturates or wraps.
/// - Division always floors.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds 256 bits.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds 256 bits.
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked floor division.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `other` is zero.
    fn safe_div(&self, other: &Self) -> Result<Self, AmmError>;
}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("amount subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_mul(other)
            .ok_or(AmmError::Overflow("amount multiplication overflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_div(other).ok_or(AmmError::DivisionByZero)
    }
}

// ---------------------------------------------------------------------------
// Shares
// ---------------------------------------------------------------------------

impl CheckedArithmetic for Shares {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("share addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("share subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError> {
        self.get()
            .checked_mul(other.get())
            .map(Shares::from_u256)
            .ok_or(AmmError::Overflow("share multiplication overflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self) -> Result<Self, AmmError> {
        self.get()
            .checked_div(other.get())
            .map(Shares::from_u256)
            .ok_or(AmmError::DivisionByZero)
    }
}

// ---------------------------------------------------------------------------
// Raw helpers
// ---------------------------------------------------------------------------

/// Computes `floor(a × b / denominator)` on raw 256-bit values.
///
/// This is the building block for every pro-rata computation in the pool:
/// shares minted against reserves, tokens paid out against shares.
///
/// # Errors
///
/// - [`AmmError::Overflow`] if `a × b` exceeds 256 bits.
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
///
/// # Examples
///
/// ```
/// use uviswap::math::{mul_div, U256};
///
/// let r = mul_div(U256::from(10u8), U256::from(7u8), U256::from(3u8));
/// assert_eq!(r, Ok(U256::from(23u8)));
/// ```
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, AmmError> {
    if denominator.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    let product = a
        .checked_mul(b)
        .ok_or(AmmError::Overflow("mul_div product overflow"))?;
    Ok(product / denominator)
}
