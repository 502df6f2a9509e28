//! Integer square root.

use super::U256;

/// Floor square root via Newton's method.
///
/// Returns `None` only if an intermediate step overflows, which cannot
/// happen for valid `U256` inputs since every iterate stays `≤ n / 2 + 1`.
///
/// # Examples
///
/// ```
/// use uviswap::math::{isqrt, U256};
///
/// assert_eq!(isqrt(U256::from(16u8)), Some(U256::from(4u8)));
/// assert_eq!(isqrt(U256::from(17u8)), Some(U256::from(4u8)));
/// ```
#[must_use]
pub fn isqrt(n: U256) -> Option<U256> {
    if n.is_zero() {
        return Some(U256::zero());
    }
    let two = U256::from(2u8);
    let mut x = n;
    // ceil(n / 2) without the `n + 1` overflow at U256::MAX
    let mut y = (n / two).checked_add(n % two)?;
    while y < x {
        x = y;
        y = x.checked_add(n / x)? / two;
    }
    Some(x)
}
