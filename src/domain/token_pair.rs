//! Ordered pair of distinct token addresses.

use super::Address;
use crate::error::AmmError;

/// An ordered pair of distinct tokens, canonically sorted by address.
///
/// The canonical ordering guarantees `token0 < token1`, so `(A, B)` and
/// `(B, A)` always map to the same pair.  This is the key the factory
/// indexes pairs under.
///
/// # Examples
///
/// ```
/// use uviswap::domain::{Address, TokenPair};
///
/// let usdt = Address::from_low_u64(1);
/// let usdc = Address::from_low_u64(2);
///
/// // Order is enforced automatically:
/// let pair = TokenPair::new(usdc, usdt).expect("distinct tokens");
/// assert_eq!(pair.token0(), usdt);
/// assert_eq!(pair.token1(), usdc);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenPair {
    token0: Address,
    token1: Address,
}

impl TokenPair {
    /// Creates a new canonically-ordered `TokenPair`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::IdenticalTokens`] if both addresses are equal.
    pub fn new(token_a: Address, token_b: Address) -> Result<Self, AmmError> {
        if token_a == token_b {
            return Err(AmmError::IdenticalTokens);
        }

        let (token0, token1) = if token_a < token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };

        Ok(Self { token0, token1 })
    }

    /// Returns the lower-addressed token.
    #[must_use]
    pub const fn token0(&self) -> Address {
        self.token0
    }

    /// Returns the higher-addressed token.
    #[must_use]
    pub const fn token1(&self) -> Address {
        self.token1
    }

    /// Returns `true` if the given token is part of this pair.
    #[must_use]
    pub fn contains(&self, token: &Address) -> bool {
        self.token0 == *token || self.token1 == *token
    }

    /// Returns the counterpart of `token` in this pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownToken`] if `token` is not in the pair.
    pub fn other(&self, token: &Address) -> Result<Address, AmmError> {
        if *token == self.token0 {
            Ok(self.token1)
        } else if *token == self.token1 {
            Ok(self.token0)
        } else {
            Err(AmmError::UnknownToken)
        }
    }
}
