// ============================================================================
// Deterministic Decimal
// 18-digit fixed-point decimal over a 256-bit bounded big integer
// ============================================================================

use super::constants::{
    pow10, within_bound, HALF_PRECISION_MULTIPLIER, PRECISION, PRECISION_MULTIPLIER,
    SQUARED_PRECISION_MULTIPLIER,
};
use super::errors::{fatal, or_fatal, DecError, DecResult};
use super::int::Int;
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Fixed-point decimal with 18 fractional digits.
///
/// Internally stores `value × 10^18` as an arbitrary-precision integer whose
/// magnitude never exceeds `2^256 - 1`. Every operation returns a new value.
///
/// Two error channels exist:
/// - parsing and the `checked_*` methods return [`DecError`];
/// - operators (`+ - * /`) and the plain methods (`quo`, `ceil`, ...) abort
///   with a panic on `Overflow` or `DivideByZero`.
///
/// # Example
/// ```
/// use ledger_dec::numeric::Dec;
///
/// let rate: Dec = "0.75".parse().unwrap();
/// let amount = Dec::new(200);
/// assert_eq!((&amount * &rate).to_string(), "150.000000000000000000");
/// ```
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dec(BigInt);

impl Dec {
    // ========================================================================
    // Construction
    // ========================================================================

    /// 0.000000000000000000
    #[inline]
    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    /// 1.000000000000000000
    #[inline]
    pub fn one() -> Self {
        Self(PRECISION_MULTIPLIER.clone())
    }

    /// The smallest representable unit, 10^-18.
    #[inline]
    pub fn smallest() -> Self {
        Self(BigInt::one())
    }

    /// Lift a machine integer (scale 0).
    ///
    /// Always in range: `|i64| × 10^18` is far below the bound.
    pub fn new(value: i64) -> Self {
        Self(BigInt::from(value) * &*PRECISION_MULTIPLIER)
    }

    /// Create `value × 10^-prec`, e.g. `with_prec(75, 2)` is 0.75.
    pub fn with_prec(value: i64, prec: u32) -> Self {
        Self::from_big_int_with_prec(BigInt::from(value), prec)
    }

    /// Create from an already scaled integer (`raw = value × 10^18`).
    ///
    /// # Errors
    /// Returns `Overflow` if `|raw| > 2^256 - 1`.
    pub fn checked_from_raw(raw: BigInt) -> DecResult<Self> {
        if within_bound(&raw) {
            Ok(Self(raw))
        } else {
            Err(DecError::Overflow)
        }
    }

    /// Lift a big integer carrying `prec` fractional digits.
    ///
    /// Precisions above 18 drop the excess digits, truncating toward zero.
    ///
    /// # Errors
    /// Returns `Overflow` if the scaled value is out of range.
    pub fn checked_from_big_int_with_prec(value: BigInt, prec: u32) -> DecResult<Self> {
        if prec <= PRECISION {
            return Self::checked_from_raw(value * pow10(PRECISION - prec));
        }
        let excess = prec - PRECISION;
        // |value| < 2^bits <= 10^bits, so every digit is dropped
        if u64::from(excess) >= value.bits() {
            return Ok(Self::zero());
        }
        Self::checked_from_raw(value / pow10(excess))
    }

    /// Fatal variant of [`checked_from_big_int_with_prec`](Self::checked_from_big_int_with_prec).
    #[track_caller]
    pub fn from_big_int_with_prec(value: BigInt, prec: u32) -> Self {
        or_fatal(Self::checked_from_big_int_with_prec(value, prec))
    }

    /// Lift an [`Int`] (scale 0).
    ///
    /// # Errors
    /// Returns `Overflow` when `int × 10^18` leaves the range.
    pub fn checked_from_int(value: &Int) -> DecResult<Self> {
        Self::checked_from_raw(value.big_int() * &*PRECISION_MULTIPLIER)
    }

    /// Fatal variant of [`checked_from_int`](Self::checked_from_int).
    #[track_caller]
    pub fn from_int(value: &Int) -> Self {
        or_fatal(Self::checked_from_int(value))
    }

    /// Validate a freshly computed raw value or abort.
    #[inline]
    #[track_caller]
    pub(crate) fn validated(raw: BigInt) -> Self {
        or_fatal(Self::checked_from_raw(raw))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The scaled integer (`value × 10^18`).
    #[inline]
    pub fn big_int(&self) -> &BigInt {
        &self.0
    }

    /// Consume the decimal, returning the scaled integer.
    #[inline]
    pub fn into_big_int(self) -> BigInt {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.sign() == Sign::Plus
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    /// `|raw| <= 2^256 - 1`
    #[inline]
    pub fn is_in_valid_range(&self) -> bool {
        within_bound(&self.0)
    }

    /// Absolute value; cannot leave the (symmetric) range.
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Checked addition.
    ///
    /// # Errors
    /// Returns `Overflow` if the sum is out of range.
    #[inline]
    pub fn checked_add(&self, rhs: &Self) -> DecResult<Self> {
        Self::checked_from_raw(&self.0 + &rhs.0)
    }

    /// Checked subtraction.
    ///
    /// # Errors
    /// Returns `Overflow` if the difference is out of range.
    #[inline]
    pub fn checked_sub(&self, rhs: &Self) -> DecResult<Self> {
        Self::checked_from_raw(&self.0 - &rhs.0)
    }

    /// Checked multiplication, rounding half away from zero.
    ///
    /// # Errors
    /// Returns `Overflow` if the rounded product is out of range.
    pub fn checked_mul(&self, rhs: &Self) -> DecResult<Self> {
        Self::checked_from_raw(chop_round_half_away(&self.0 * &rhs.0))
    }

    /// Checked multiplication, truncating toward zero.
    ///
    /// # Errors
    /// Returns `Overflow` if the product is out of range.
    pub fn checked_mul_truncate(&self, rhs: &Self) -> DecResult<Self> {
        Self::checked_from_raw(&self.0 * &rhs.0 / &*PRECISION_MULTIPLIER)
    }

    /// Multiply by an unscaled integer.
    ///
    /// # Errors
    /// Returns `Overflow` if the product is out of range.
    pub fn checked_mul_int(&self, rhs: &Int) -> DecResult<Self> {
        Self::checked_from_raw(&self.0 * rhs.big_int())
    }

    /// Checked quotient, rounding half away from zero.
    ///
    /// The dividend is widened by 10^36 so the truncated quotient keeps 18
    /// guard digits, which are then chopped with rounding.
    ///
    /// # Errors
    /// - `DivideByZero` if `rhs` is zero
    /// - `Overflow` if the quotient is out of range
    pub fn checked_quo(&self, rhs: &Self) -> DecResult<Self> {
        if rhs.is_zero() {
            return Err(DecError::DivideByZero);
        }
        let widened = &self.0 * &*SQUARED_PRECISION_MULTIPLIER / &rhs.0;
        Self::checked_from_raw(chop_round_half_away(widened))
    }

    /// Checked quotient, truncating toward zero.
    ///
    /// # Errors
    /// - `DivideByZero` if `rhs` is zero
    /// - `Overflow` if the quotient is out of range
    pub fn checked_quo_truncate(&self, rhs: &Self) -> DecResult<Self> {
        if rhs.is_zero() {
            return Err(DecError::DivideByZero);
        }
        Self::checked_from_raw(&self.0 * &*PRECISION_MULTIPLIER / &rhs.0)
    }

    /// Checked quotient where a nonzero chopped remainder rounds the
    /// magnitude up.
    ///
    /// Widens like [`checked_quo`](Self::checked_quo); only the digits
    /// removed by the final chop decide the rounding.
    ///
    /// # Errors
    /// - `DivideByZero` if `rhs` is zero
    /// - `Overflow` if the quotient is out of range
    pub fn checked_quo_round_up(&self, rhs: &Self) -> DecResult<Self> {
        if rhs.is_zero() {
            return Err(DecError::DivideByZero);
        }
        let widened = &self.0 * &*SQUARED_PRECISION_MULTIPLIER / &rhs.0;
        Self::checked_from_raw(chop_round_up(widened))
    }

    /// Divide by an unscaled integer, truncating toward zero.
    ///
    /// # Errors
    /// Returns `DivideByZero` if `rhs` is zero.
    pub fn checked_quo_int(&self, rhs: &Int) -> DecResult<Self> {
        if rhs.is_zero() {
            return Err(DecError::DivideByZero);
        }
        Self::checked_from_raw(&self.0 / rhs.big_int())
    }

    // Fatal counterparts. Each aborts on the error its checked form returns.

    #[track_caller]
    pub fn mul_truncate(&self, rhs: &Self) -> Self {
        or_fatal(self.checked_mul_truncate(rhs))
    }

    #[track_caller]
    pub fn mul_int(&self, rhs: &Int) -> Self {
        or_fatal(self.checked_mul_int(rhs))
    }

    #[track_caller]
    pub fn mul_int64(&self, rhs: i64) -> Self {
        Self::validated(&self.0 * rhs)
    }

    #[track_caller]
    pub fn quo(&self, rhs: &Self) -> Self {
        or_fatal(self.checked_quo(rhs))
    }

    #[track_caller]
    pub fn quo_truncate(&self, rhs: &Self) -> Self {
        or_fatal(self.checked_quo_truncate(rhs))
    }

    #[track_caller]
    pub fn quo_round_up(&self, rhs: &Self) -> Self {
        or_fatal(self.checked_quo_round_up(rhs))
    }

    #[track_caller]
    pub fn quo_int(&self, rhs: &Int) -> Self {
        or_fatal(self.checked_quo_int(rhs))
    }

    #[track_caller]
    pub fn quo_int64(&self, rhs: i64) -> Self {
        if rhs == 0 {
            fatal(DecError::DivideByZero);
        }
        Self(&self.0 / rhs)
    }

    // ========================================================================
    // Rounding
    // ========================================================================

    /// Round to the nearest integer, ties to even.
    pub fn round_int(&self) -> Int {
        Int::from_big_int(chop_round_half_even(&self.0))
    }

    /// [`round_int`](Self::round_int) as an `i64`; aborts if it does not fit.
    #[track_caller]
    pub fn round_int64(&self) -> i64 {
        to_i64_or_fatal(&chop_round_half_even(&self.0))
    }

    /// Round to the nearest integer, ties to even, keeping the scale.
    ///
    /// Aborts with `Overflow` if rounding up leaves the range.
    #[track_caller]
    pub fn round_dec(&self) -> Self {
        Self::validated(chop_round_half_even(&self.0) * &*PRECISION_MULTIPLIER)
    }

    /// Drop the fractional part (toward zero).
    pub fn truncate_int(&self) -> Int {
        Int::from_big_int(&self.0 / &*PRECISION_MULTIPLIER)
    }

    /// [`truncate_int`](Self::truncate_int) as an `i64`; aborts if it does not fit.
    #[track_caller]
    pub fn truncate_int64(&self) -> i64 {
        to_i64_or_fatal(&(&self.0 / &*PRECISION_MULTIPLIER))
    }

    /// Drop the fractional part, keeping the scale.
    pub fn truncate_dec(&self) -> Self {
        Self(&self.0 / &*PRECISION_MULTIPLIER * &*PRECISION_MULTIPLIER)
    }

    /// Smallest integer not less than the value.
    ///
    /// Aborts with `Overflow` when the next integer is out of range, even
    /// though the value itself is valid.
    #[track_caller]
    pub fn ceil(&self) -> Self {
        or_fatal(self.checked_ceil())
    }

    /// # Errors
    /// Returns `Overflow` when the ceiling is out of range.
    pub fn checked_ceil(&self) -> DecResult<Self> {
        let (mut quo, rem) = self.0.div_rem(&*PRECISION_MULTIPLIER);
        if rem.sign() == Sign::Plus {
            quo += 1u8;
        }
        Self::checked_from_raw(quo * &*PRECISION_MULTIPLIER)
    }
}

// ============================================================================
// Chopping
// ============================================================================

/// Remove 18 digits, rounding the remainder half away from zero.
fn chop_round_half_away(value: BigInt) -> BigInt {
    let (quo, rem) = value.div_rem(&*PRECISION_MULTIPLIER);
    if rem.abs() < *HALF_PRECISION_MULTIPLIER {
        return quo;
    }
    match value.sign() {
        Sign::Minus => quo - 1u8,
        _ => quo + 1u8,
    }
}

/// Remove 18 digits, moving away from zero on any nonzero remainder.
fn chop_round_up(value: BigInt) -> BigInt {
    let (quo, rem) = value.div_rem(&*PRECISION_MULTIPLIER);
    if rem.is_zero() {
        return quo;
    }
    match value.sign() {
        Sign::Minus => quo - 1u8,
        _ => quo + 1u8,
    }
}

/// Remove 18 digits, rounding an exact half to the even neighbour.
fn chop_round_half_even(value: &BigInt) -> BigInt {
    let (quo, rem) = value.div_rem(&*PRECISION_MULTIPLIER);
    let away = match rem.abs().cmp(&*HALF_PRECISION_MULTIPLIER) {
        Ordering::Less => false,
        Ordering::Greater => true,
        Ordering::Equal => quo.is_odd(),
    };
    match (away, value.sign()) {
        (false, _) => quo,
        (true, Sign::Minus) => quo - 1u8,
        (true, _) => quo + 1u8,
    }
}

#[track_caller]
fn to_i64_or_fatal(value: &BigInt) -> i64 {
    match value.to_i64() {
        Some(v) => v,
        None => fatal(DecError::Overflow),
    }
}

// ============================================================================
// Operator Traits
// ============================================================================

// Operators abort on faults; use the checked_* methods to recover instead.
macro_rules! fatal_binop {
    ($imp:ident, $method:ident, $checked:ident) => {
        impl $imp<&Dec> for &Dec {
            type Output = Dec;

            #[inline]
            #[track_caller]
            fn $method(self, rhs: &Dec) -> Dec {
                or_fatal(self.$checked(rhs))
            }
        }

        impl $imp<Dec> for Dec {
            type Output = Dec;

            #[inline]
            #[track_caller]
            fn $method(self, rhs: Dec) -> Dec {
                or_fatal(self.$checked(&rhs))
            }
        }

        impl $imp<&Dec> for Dec {
            type Output = Dec;

            #[inline]
            #[track_caller]
            fn $method(self, rhs: &Dec) -> Dec {
                or_fatal(self.$checked(rhs))
            }
        }
    };
}

fatal_binop!(Add, add, checked_add);
fatal_binop!(Sub, sub, checked_sub);
fatal_binop!(Mul, mul, checked_mul);
fatal_binop!(Div, div, checked_quo);

impl Neg for Dec {
    type Output = Dec;

    #[inline]
    fn neg(self) -> Dec {
        Dec(-self.0)
    }
}

impl Neg for &Dec {
    type Output = Dec;

    #[inline]
    fn neg(self) -> Dec {
        Dec(-&self.0)
    }
}

impl From<i64> for Dec {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dec({}, raw={})", self, self.0)
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = PRECISION as usize;
        let digits = format!("{:0>width$}", self.0.magnitude().to_string(), width = width + 1);
        let (int_part, frac_part) = digits.split_at(digits.len() - width);

        if self.is_negative() {
            f.write_str("-")?;
        }
        write!(f, "{}.{}", int_part, frac_part)
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl std::str::FromStr for Dec {
    type Err = DecError;

    /// Parse `-?[0-9]+(\.[0-9]+)?` with at most 18 fractional digits.
    ///
    /// # Examples
    /// - "0.75" -> raw 750000000000000000
    /// - "-12" -> -12.000000000000000000
    /// - "1." / ".5" / "" -> `Parse`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DecError::Parse("empty string"));
        }

        let (is_negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (int_str, frac_str) = match body.split_once('.') {
            Some((int_str, frac_str)) => (int_str, Some(frac_str)),
            None => (body, None),
        };

        if int_str.is_empty() {
            return Err(DecError::Parse("missing integer digits"));
        }
        if !int_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DecError::Parse("unexpected character in integer part"));
        }

        let frac_str = match frac_str {
            None => "",
            Some("") => return Err(DecError::Parse("missing fractional digits")),
            Some(frac) if !frac.bytes().all(|b| b.is_ascii_digit()) => {
                return Err(DecError::Parse("unexpected character in fractional part"));
            },
            Some(frac) if frac.len() > PRECISION as usize => {
                return Err(DecError::PrecisionExceeded { digits: frac.len() });
            },
            Some(frac) => frac,
        };

        let scaled = format!(
            "{}{:0<width$}",
            int_str,
            frac_str,
            width = PRECISION as usize
        );
        let magnitude = BigInt::parse_bytes(scaled.as_bytes(), 10)
            .ok_or(DecError::Parse("unparseable digits"))?;

        Self::checked_from_raw(if is_negative { -magnitude } else { magnitude })
    }
}

// ============================================================================
// Conversion from rust_decimal (for API boundaries)
// ============================================================================

impl Dec {
    /// Convert from `rust_decimal::Decimal`.
    ///
    /// # Errors
    /// - `PrecisionExceeded` if nonzero digits sit beyond 18 places
    /// - `Overflow` if the value is out of range
    pub fn from_decimal(d: rust_decimal::Decimal) -> DecResult<Self> {
        let mantissa = BigInt::from(d.mantissa());
        let scale = d.scale();

        if scale <= PRECISION {
            return Self::checked_from_raw(mantissa * pow10(PRECISION - scale));
        }

        let (quo, rem) = mantissa.div_rem(&pow10(scale - PRECISION));
        if !rem.is_zero() {
            return Err(DecError::PrecisionExceeded {
                digits: scale as usize,
            });
        }
        Self::checked_from_raw(quo)
    }

    /// Convert to `rust_decimal::Decimal` at scale 18.
    ///
    /// # Errors
    /// Returns `Overflow` if the scaled value does not fit a 96-bit mantissa.
    pub fn to_decimal(&self) -> DecResult<rust_decimal::Decimal> {
        let raw = self.0.to_i128().ok_or(DecError::Overflow)?;
        rust_decimal::Decimal::try_from_i128_with_scale(raw, PRECISION)
            .map_err(|_| DecError::Overflow)
    }
}

// ============================================================================
// Tests
// ============================================================================
