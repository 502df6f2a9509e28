//! Raw token amount with checked arithmetic.

use core::fmt;

use crate::math::U256;

/// A raw token amount in the smallest unit (wei or equivalent).
///
/// `Amount` never interprets decimals: `500e18` is stored as
/// `500_000_000_000_000_000_000`.  The backing integer is 256 bits wide so
/// that products of two reserves never need to leave the type.
///
/// Arithmetic methods are checked: they return `None` on overflow,
/// underflow, or division by zero instead of panicking.  Division always
/// floors.
///
/// # Examples
///
/// ```
/// use uviswap::domain::Amount;
///
/// let a = Amount::new(100);
/// let b = Amount::new(200);
/// assert_eq!(a.checked_add(&b), Some(Amount::new(300)));
/// assert_eq!(b.checked_sub(&a), Some(Amount::new(100)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Amount(U256);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(U256([0; 4]));

    /// Maximum representable amount.
    pub const MAX: Self = Self(U256([u64::MAX; 4]));

    /// Creates a new `Amount` from a raw `u128` value.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(value: u128) -> Self {
        Self(U256([value as u64, (value >> 64) as u64, 0, 0]))
    }

    /// Wraps a raw 256-bit value.
    pub const fn from_u256(value: U256) -> Self {
        Self(value)
    }

    /// Returns the underlying 256-bit value.
    #[must_use]
    pub const fn get(&self) -> U256 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Checked multiplication. Returns `None` on overflow.
    #[must_use]
    pub fn checked_mul(&self, other: &Self) -> Option<Self> {
        self.0.checked_mul(other.0).map(Self)
    }

    /// Checked floor division. Returns `None` if `divisor` is zero.
    #[must_use]
    pub fn checked_div(&self, divisor: &Self) -> Option<Self> {
        self.0.checked_div(divisor.0).map(Self)
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_and_get() {
        assert_eq!(Amount::new(42).get(), U256::from(42u8));
    }

    #[test]
    fn new_spans_both_low_limbs() {
        let v = u128::MAX - 7;
        assert_eq!(Amount::new(v).get(), U256::from(v));
    }

    #[test]
    fn constants() {
        assert!(Amount::ZERO.is_zero());
        assert_eq!(Amount::MAX.get(), U256::MAX);
        assert_eq!(Amount::default(), Amount::ZERO);
    }

    #[test]
    fn display_is_decimal() {
        assert_eq!(format!("{}", Amount::new(1_000_000)), "1000000");
        let big = Amount::new(500 * 10u128.pow(18));
        assert_eq!(big.to_string(), "500000000000000000000");
    }

    #[test]
    fn ordering() {
        assert!(Amount::new(1) < Amount::new(2));
        assert!(Amount::MAX > Amount::new(u128::MAX));
    }

    #[test]
    fn add_overflow() {
        assert_eq!(Amount::MAX.checked_add(&Amount::new(1)), None);
    }

    #[test]
    fn sub_underflow() {
        assert_eq!(Amount::new(1).checked_sub(&Amount::new(2)), None);
    }

    #[test]
    fn mul_overflow() {
        assert_eq!(Amount::MAX.checked_mul(&Amount::new(2)), None);
    }

    #[test]
    fn div_floors_and_rejects_zero() {
        assert_eq!(
            Amount::new(10).checked_div(&Amount::new(3)),
            Some(Amount::new(3))
        );
        assert_eq!(Amount::new(1).checked_div(&Amount::new(2)), Some(Amount::ZERO));
        assert_eq!(Amount::new(10).checked_div(&Amount::ZERO), None);
    }

    #[test]
    fn from_u128() {
        let a: Amount = 7u128.into();
        assert_eq!(a, Amount::new(7));
    }
}
