//! 256-bit unsigned integer backing every amount and share count.
//!
//! Token amounts in the reference domain carry 18 decimals, so the product
//! of two reserves (`500e18 × 500e18 = 2.5e41`) already exceeds `u128`.
//! All pool math therefore runs on [`U256`].

#![allow(
    clippy::all,
    clippy::pedantic,
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    missing_docs
)]

uint::construct_uint! {
    /// 256-bit unsigned integer (four little-endian `u64` limbs).
    pub struct U256(4);
}
