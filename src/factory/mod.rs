//! Pair creation and lookup.
//!
//! [`PairFactory`] owns every [`Pair`](crate::pools::Pair) it creates and
//! hands out [`PairHandle`]s for later access.  At most one pair exists
//! per unordered token pair.

mod pair_factory;

pub use pair_factory::{PairFactory, PairHandle};
