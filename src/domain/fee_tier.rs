//! Swap fee tiers built on [`BasisPoints`].

use core::fmt;

use super::{Amount, BasisPoints};
use crate::error::AmmError;
use crate::math::{mul_div, U256};

/// The swap fee a pair retains from every input amount.
///
/// The fee is never paid out to a separate party: it stays in the pool and
/// raises the redemption value of every outstanding share.
///
/// Any `BasisPoints` value is accepted here; [`PairConfig`] rejects tiers at
/// or above 100%.
///
/// [`PairConfig`]: crate::config::PairConfig
///
/// # Examples
///
/// ```
/// use uviswap::domain::{Amount, FeeTier};
///
/// let tier = FeeTier::TIER_0_30_PERCENT;
/// assert_eq!(tier.basis_points().get(), 30);
/// // 0.3% of 1000 is retained, 997 is priced.
/// assert_eq!(tier.net_of_fee(Amount::new(1_000)), Ok(Amount::new(997)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// Denominator every tier is expressed against (10 000 bp = 100%).
    pub const DENOMINATOR: u32 = 10_000;

    /// No fee.
    pub const ZERO: Self = Self(BasisPoints::ZERO);

    /// 0.05% fee — stablecoin pairs (5 bp).
    pub const TIER_0_05_PERCENT: Self = Self(BasisPoints::new(5));

    /// 0.30% fee — the reference rate, `3 / 1000` (30 bp).
    pub const TIER_0_30_PERCENT: Self = Self(BasisPoints::new(30));

    /// 1.00% fee — exotic pairs (100 bp).
    pub const TIER_1_00_PERCENT: Self = Self(BasisPoints::new(100));

    /// Creates a new `FeeTier` from arbitrary [`BasisPoints`].
    #[must_use]
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Returns `DENOMINATOR − fee_bps`, the weight of the input that
    /// reaches the pricing curve.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the tier exceeds 100%.
    pub const fn retained_weight(&self) -> Result<u32, AmmError> {
        match self.0.complement() {
            Some(w) => Ok(w),
            None => Err(AmmError::InvalidConfiguration("fee tier exceeds 100%")),
        }
    }

    /// Returns `floor(amount × (DENOMINATOR − fee_bps) / DENOMINATOR)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if the tier exceeds 100%.
    /// - [`AmmError::Overflow`] if the intermediate product overflows.
    pub fn net_of_fee(&self, amount: Amount) -> Result<Amount, AmmError> {
        let weight = self.retained_weight()?;
        mul_div(
            amount.get(),
            U256::from(weight),
            U256::from(Self::DENOMINATOR),
        )
        .map(Amount::from_u256)
    }

    /// Returns the part of `amount` the pool keeps as fee:
    /// `amount − net_of_fee(amount)`.
    ///
    /// Because [`net_of_fee`](Self::net_of_fee) floors, the fee rounds up.
    ///
    /// # Errors
    ///
    /// Same as [`net_of_fee`](Self::net_of_fee).
    pub fn fee_on(&self, amount: Amount) -> Result<Amount, AmmError> {
        let net = self.net_of_fee(amount)?;
        amount
            .checked_sub(&net)
            .ok_or(AmmError::Underflow("fee exceeds amount"))
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::TIER_0_30_PERCENT
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}
