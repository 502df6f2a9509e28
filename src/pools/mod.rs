//! Liquidity pools.
//!
//! | Pool | Style |
//! |------|-------|
//! | [`Pair`] | Uniswap V2 constant product |

mod pair;

pub use pair::Pair;

#[cfg(test)]
mod proptest_properties;
