//! Blueprint configuration for constant-product pairs.

use crate::domain::{BasisPoints, FeeTier};
use crate::error::AmmError;

/// The immutable parameters every pair created from this blueprint shares.
///
/// The factory holds one `PairConfig` and stamps it onto each pair it
/// creates; tokens and reserves are *not* part of the blueprint, they are
/// supplied by `initialize` and the first deposit.
///
/// # Validation
///
/// - The fee tier must be strictly below 100%: a 100% fee would price
///   every input at zero and make swaps impossible.
///
/// # Examples
///
/// ```
/// use uviswap::config::PairConfig;
/// use uviswap::domain::{BasisPoints, FeeTier};
///
/// let cfg = PairConfig::new(FeeTier::new(BasisPoints::new(30))).expect("valid");
/// assert_eq!(cfg, PairConfig::default());
/// assert!(PairConfig::new(FeeTier::new(BasisPoints::MAX_PERCENT)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PairConfig {
    fee_tier: FeeTier,
}

impl PairConfig {
    /// Creates a new `PairConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the fee tier is 100%
    /// or more.
    pub fn new(fee_tier: FeeTier) -> Result<Self, AmmError> {
        let config = Self { fee_tier };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the fee tier is 100%
    /// or more.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.fee_tier.basis_points() >= BasisPoints::MAX_PERCENT {
            return Err(AmmError::InvalidConfiguration(
                "fee tier must be below 100%",
            ));
        }
        Ok(())
    }

    /// Returns the fee tier.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }
}
