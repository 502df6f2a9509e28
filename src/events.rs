//! Observable records emitted by pairs and the factory.
//!
//! The engine does not push events anywhere: each component appends them
//! to its own log, and hosts read them with `events()` or take them with
//! `drain_events()`.  Every record is also written to the `log` facade.

use core::fmt;

use crate::domain::{Address, Amount, Shares};
use crate::factory::PairHandle;

/// Emitted once per successful [`PairFactory::create_pair`].
///
/// [`PairFactory::create_pair`]: crate::factory::PairFactory::create_pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairCreated {
    /// Lower-addressed token.
    pub token0: Address,
    /// Higher-addressed token.
    pub token1: Address,
    /// The new pair's ledger address.
    pub pair: Address,
    /// Handle for factory lookups.
    pub handle: PairHandle,
    /// Position in [`all_pairs`](crate::factory::PairFactory::all_pairs).
    pub index: usize,
}

impl fmt::Display for PairCreated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PairCreated({} / {} at {}, #{})",
            self.token0, self.token1, self.pair, self.index
        )
    }
}

/// State changes of a single pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairEvent {
    /// Liquidity deposited and shares minted.
    Mint {
        sender: Address,
        amount0: Amount,
        amount1: Amount,
        shares: Shares,
    },
    /// Shares burned and liquidity withdrawn.
    Burn {
        sender: Address,
        amount0: Amount,
        amount1: Amount,
        shares: Shares,
    },
    /// One token sold to the pool for the other.
    Swap {
        sender: Address,
        token_in: Address,
        amount_in: Amount,
        amount_out: Amount,
    },
    /// Shares moved between holders.
    Transfer {
        from: Address,
        to: Address,
        shares: Shares,
    },
}
