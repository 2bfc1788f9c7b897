// ============================================================================
// Bounded Integer
// Unscaled big integer sharing the decimal's 256-bit magnitude bound
// ============================================================================

use super::constants::{within_bound, MAX_MAGNITUDE};
use super::errors::{or_fatal, DecError, DecResult};
use num_bigint::{BigInt, Sign};
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Signed integer with `|value| <= 2^256 - 1`.
///
/// Used as a constructor input for [`Dec`](super::Dec) and as the output of
/// its truncation and rounding. Division truncates toward zero.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Int(BigInt);

impl Int {
    #[inline]
    pub fn new(value: i64) -> Self {
        Self(BigInt::from(value))
    }

    #[inline]
    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    #[inline]
    pub fn one() -> Self {
        Self(BigInt::one())
    }

    /// 2^256 - 1
    pub fn max_value() -> Self {
        Self(MAX_MAGNITUDE.clone())
    }

    /// # Errors
    /// Returns `Overflow` if `|value| > 2^256 - 1`.
    pub fn checked_from_big_int(value: BigInt) -> DecResult<Self> {
        if within_bound(&value) {
            Ok(Self(value))
        } else {
            Err(DecError::Overflow)
        }
    }

    #[track_caller]
    pub fn from_big_int(value: BigInt) -> Self {
        or_fatal(Self::checked_from_big_int(value))
    }

    #[inline]
    pub fn big_int(&self) -> &BigInt {
        &self.0
    }

    #[inline]
    pub fn into_big_int(self) -> BigInt {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.sign() == Sign::Plus
    }

    /// `None` if the value does not fit an `i64`.
    pub fn to_i64(&self) -> Option<i64> {
        self.0.to_i64()
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Sum of `self` and `rhs`.
    ///
    /// # Errors
    /// Returns `Overflow` if the result needs more than 256 bits.
    pub fn checked_add(&self, rhs: &Self) -> DecResult<Self> {
        Self::checked_from_big_int(&self.0 + &rhs.0)
    }

    /// Difference of `self` and `rhs`.
    ///
    /// # Errors
    /// Returns `Overflow` if the result needs more than 256 bits.
    pub fn checked_sub(&self, rhs: &Self) -> DecResult<Self> {
        Self::checked_from_big_int(&self.0 - &rhs.0)
    }

    /// Product of `self` and `rhs`.
    ///
    /// # Errors
    /// Returns `Overflow` if the result needs more than 256 bits.
    pub fn checked_mul(&self, rhs: &Self) -> DecResult<Self> {
        Self::checked_from_big_int(&self.0 * &rhs.0)
    }

    /// # Errors
    /// Returns `DivideByZero` if `rhs` is zero.
    pub fn checked_quo(&self, rhs: &Self) -> DecResult<Self> {
        if rhs.is_zero() {
            return Err(DecError::DivideByZero);
        }
        Ok(Self(&self.0 / &rhs.0))
    }
}

macro_rules! fatal_int_binop {
    ($imp:ident, $method:ident, $checked:ident) => {
        impl $imp<&Int> for &Int {
            type Output = Int;

            #[inline]
            #[track_caller]
            fn $method(self, rhs: &Int) -> Int {
                or_fatal(self.$checked(rhs))
            }
        }

        impl $imp<Int> for Int {
            type Output = Int;

            #[inline]
            #[track_caller]
            fn $method(self, rhs: Int) -> Int {
                or_fatal(self.$checked(&rhs))
            }
        }
    };
}

fatal_int_binop!(Add, add, checked_add);
fatal_int_binop!(Sub, sub, checked_sub);
fatal_int_binop!(Mul, mul, checked_mul);
fatal_int_binop!(Div, div, checked_quo);

impl Neg for Int {
    type Output = Int;

    fn neg(self) -> Int {
        Int(-self.0)
    }
}

impl From<i64> for Int {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Int({})", self.0)
    }
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for Int {
    type Err = DecError;

    /// Parse `-?[0-9]+`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('-').unwrap_or(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DecError::Parse("expected an integer"));
        }
        let magnitude =
            BigInt::parse_bytes(digits.as_bytes(), 10).ok_or(DecError::Parse("expected an integer"))?;
        Self::checked_from_big_int(if digits.len() < s.len() { -magnitude } else { magnitude })
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Int;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;

    impl Serialize for Int {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for Int {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_str(IntVisitor)
        }
    }

    struct IntVisitor;

    impl<'de> de::Visitor<'de> for IntVisitor {
        type Value = Int;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("string-encoded integer")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            v.parse()
                .map_err(|e| E::custom(format!("Error parsing integer '{}': {}", v, e)))
        }
    }
}
