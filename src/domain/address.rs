//! Chain-agnostic account address.

use core::fmt;

/// A 32-byte identifier for anything that can hold or be a token: token
/// contracts, liquidity providers, traders, pairs and the factory.
///
/// All 32-byte sequences are valid addresses, so construction is
/// infallible.  Ordering is lexicographic over the bytes, which equals the
/// numeric order of the big-endian value; pairs use it for canonical token
/// ordering.
///
/// # Examples
///
/// ```
/// use uviswap::domain::Address;
///
/// let addr = Address::from_bytes([1u8; 32]);
/// assert_eq!(addr.as_bytes(), [1u8; 32]);
/// assert!(Address::from_low_u64(1) < Address::from_low_u64(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 32]);

impl Address {
    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates an address whose big-endian value is `value`.
    ///
    /// Handy for tests and simulations that want small, ordered ids.
    #[must_use]
    pub fn from_low_u64(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns the all-zero address, the "no such account" sentinel.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Returns `true` for the all-zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
