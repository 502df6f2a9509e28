//! Token amounts paid out by a liquidity burn.

use core::fmt;

use super::Amount;

/// The two token amounts a burn of liquidity shares returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Withdrawal {
    amount0: Amount,
    amount1: Amount,
}

impl Withdrawal {
    /// Creates a withdrawal of `amount0` of token0 and `amount1` of token1.
    pub const fn new(amount0: Amount, amount1: Amount) -> Self {
        Self { amount0, amount1 }
    }

    /// Amount of token0 paid out.
    pub const fn amount0(&self) -> Amount {
        self.amount0
    }

    /// Amount of token1 paid out.
    pub const fn amount1(&self) -> Amount {
        self.amount1
    }

    /// `true` if either side pays nothing.
    #[must_use]
    pub fn has_empty_side(&self) -> bool {
        self.amount0.is_zero() || self.amount1.is_zero()
    }
}

impl From<Withdrawal> for (Amount, Amount) {
    fn from(w: Withdrawal) -> Self {
        (w.amount0, w.amount1)
    }
}

impl fmt::Display for Withdrawal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Withdrawal({}, {})", self.amount0, self.amount1)
    }
}
