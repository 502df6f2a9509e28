//! Liquidity share units.

use core::fmt;

use crate::math::U256;

/// Liquidity shares issued by a pair.
///
/// Distinct from [`Amount`](super::Amount) because a share measures a
/// fraction of *both* reserves rather than a quantity of one token.
///
/// # Examples
///
/// ```
/// use uviswap::domain::Shares;
///
/// let a = Shares::new(1_000);
/// let b = Shares::new(2_000);
/// assert_eq!(a.checked_add(&b), Some(Shares::new(3_000)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Shares(U256);

impl Shares {
    /// No shares.
    pub const ZERO: Self = Self(U256([0; 4]));

    /// Creates `Shares` from a raw `u128` value.
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

    /// Returns `true` if there are no shares.
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
}

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
