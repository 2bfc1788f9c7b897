// ============================================================================
// Numeric Constants
// Precision and process-wide big-integer constants, computed once
// ============================================================================

use num_bigint::BigInt;
use num_traits::One;
use std::sync::LazyLock;

/// Number of fractional digits retained by [`Dec`](super::Dec).
pub const PRECISION: u32 = 18;

/// Upper bound on Newton iterations in `approx_root`.
pub const MAX_APPROX_ROOT_ITERATIONS: usize = 100;

/// Bit length of the largest allowed magnitude (`2^256 - 1`).
pub const MAX_BIT_LEN: u64 = 256;

/// Integer digits in the sortable encoding.
pub const SORTABLE_INTEGER_DIGITS: usize = 18;

/// 10^18
pub(crate) static PRECISION_MULTIPLIER: LazyLock<BigInt> =
    LazyLock::new(|| BigInt::from(10u8).pow(PRECISION));

/// 10^36, used to keep precision through a quotient before chopping.
pub(crate) static SQUARED_PRECISION_MULTIPLIER: LazyLock<BigInt> =
    LazyLock::new(|| BigInt::from(10u8).pow(2 * PRECISION));

/// 5 * 10^17, the half unit compared against chopped remainders.
pub(crate) static HALF_PRECISION_MULTIPLIER: LazyLock<BigInt> =
    LazyLock::new(|| &*PRECISION_MULTIPLIER / 2u8);

/// 2^256 - 1
pub(crate) static MAX_MAGNITUDE: LazyLock<BigInt> =
    LazyLock::new(|| (BigInt::one() << MAX_BIT_LEN) - 1u8);

/// 10^`n` for precisions other than the fixed one.
pub(crate) fn pow10(n: u32) -> BigInt {
    match n {
        PRECISION => PRECISION_MULTIPLIER.clone(),
        _ => BigInt::from(10u8).pow(n),
    }
}

/// `|value| <= 2^256 - 1`
#[inline]
pub(crate) fn within_bound(value: &BigInt) -> bool {
    value.bits() <= MAX_BIT_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(PRECISION_MULTIPLIER.to_string(), "1000000000000000000");
        assert_eq!(
            SQUARED_PRECISION_MULTIPLIER.to_string(),
            "1000000000000000000000000000000000000"
        );
        assert_eq!(HALF_PRECISION_MULTIPLIER.to_string(), "500000000000000000");
        assert_eq!(
            MAX_MAGNITUDE.to_string(),
            "115792089237316195423570985008687907853269984665640564039457584007913129639935"
        );
    }

    #[test]
    fn test_pow10() {
        assert_eq!(pow10(0), BigInt::one());
        assert_eq!(pow10(4).to_string(), "10000");
        assert_eq!(pow10(PRECISION), *PRECISION_MULTIPLIER);
    }

    #[test]
    fn test_within_bound_edges() {
        let max = MAX_MAGNITUDE.clone();
        assert!(within_bound(&max));
        assert!(within_bound(&-max.clone()));
        assert!(!within_bound(&(&max + 1u8)));
        assert!(!within_bound(&-(&max + 1u8)));
        assert!(within_bound(&BigInt::from(0)));
    }
}
