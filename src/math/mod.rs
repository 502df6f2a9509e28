//! Arithmetic utilities for AMM calculations.
//!
//! This module provides the 256-bit [`U256`] integer every amount is
//! stored in, [`CheckedArithmetic`] for overflow-safe operations on the
//! domain newtypes, [`mul_div`] for pro-rata floor division, and
//! [`isqrt`] for the initial share mint.
//!
//! Nothing in this module wraps, saturates or panics: every failure is an
//! [`AmmError`](crate::error::AmmError).

mod checked;
mod sqrt;
mod u256;

pub use checked::{mul_div, CheckedArithmetic};
pub use sqrt::isqrt;
pub use u256::U256;
