// ============================================================================
// Decimal Codec
// Canonical bytes, serde string scalars, and order-preserving key bytes
// ============================================================================
//
// Sortable layout (37 or 38 bytes, or a boundary token):
//
//   value >= 0       "IIIIIIIIIIIIIIIIII.FFFFFFFFFFFFFFFFFF"
//   value < 0        "-" + same layout holding 10^36 - 1 - |raw|
//   value == 10^18   "max"
//   value == -10^18  "--"
//
// '-' (0x2D) sorts below '0' (0x30), so all negatives precede all
// non-negatives; the nines' complement puts larger magnitudes first.

use super::constants::{pow10, PRECISION, SORTABLE_INTEGER_DIGITS};
use super::dec::Dec;
use super::errors::{or_fatal, DecError, DecResult};
use num_bigint::BigInt;
use num_traits::Signed;
use std::cmp::Ordering;
use std::sync::LazyLock;

const SORTABLE_MAX: &[u8] = b"max";
const SORTABLE_MIN: &[u8] = b"--";
const SORTABLE_DIGITS: usize = SORTABLE_INTEGER_DIGITS + PRECISION as usize;

/// Raw value of 10^18, the largest magnitude the sortable layout carries.
static SORTABLE_LIMIT: LazyLock<BigInt> =
    LazyLock::new(|| pow10(SORTABLE_DIGITS as u32));

impl Dec {
    // ========================================================================
    // Canonical Bytes
    // ========================================================================

    /// ASCII bytes of the canonical string.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Length of [`to_bytes`](Self::to_bytes) without allocating the bytes.
    pub fn encoded_len(&self) -> usize {
        let digits = self.big_int().magnitude().to_string().len();
        let sign = usize::from(self.is_negative());
        sign + digits.max(PRECISION as usize + 1) + 1
    }

    /// Decode canonical bytes (any valid literal is accepted).
    ///
    /// # Errors
    /// Same as parsing: `Parse`, `PrecisionExceeded`, `Overflow`.
    pub fn from_bytes(bytes: &[u8]) -> DecResult<Self> {
        std::str::from_utf8(bytes)
            .map_err(|_| DecError::Parse("bytes are not valid UTF-8"))?
            .parse()
    }

    // ========================================================================
    // Sortable Bytes
    // ========================================================================

    /// Fixed-width key bytes whose lexicographic order is numeric order.
    ///
    /// Aborts with `Overflow` for magnitudes above 10^18.
    #[track_caller]
    pub fn to_sortable_bytes(&self) -> Vec<u8> {
        or_fatal(self.checked_to_sortable_bytes())
    }

    /// # Errors
    /// Returns `Overflow` for magnitudes above 10^18.
    pub fn checked_to_sortable_bytes(&self) -> DecResult<Vec<u8>> {
        let magnitude = self.big_int().abs();
        match magnitude.cmp(&*SORTABLE_LIMIT) {
            Ordering::Greater => Err(DecError::Overflow),
            Ordering::Equal if self.is_negative() => Ok(SORTABLE_MIN.to_vec()),
            Ordering::Equal => Ok(SORTABLE_MAX.to_vec()),
            Ordering::Less if self.is_negative() => {
                let complement = &*SORTABLE_LIMIT - 1u8 - magnitude;
                let mut out = Vec::with_capacity(SORTABLE_DIGITS + 2);
                out.push(b'-');
                write_fixed(&mut out, &complement);
                Ok(out)
            },
            Ordering::Less => {
                let mut out = Vec::with_capacity(SORTABLE_DIGITS + 1);
                write_fixed(&mut out, &magnitude);
                Ok(out)
            },
        }
    }

    /// Inverse of [`to_sortable_bytes`](Self::to_sortable_bytes).
    ///
    /// # Errors
    /// Returns `Parse` if the bytes are not a sortable encoding.
    pub fn from_sortable_bytes(bytes: &[u8]) -> DecResult<Self> {
        match bytes {
            SORTABLE_MAX => Ok(Dec::validated(SORTABLE_LIMIT.clone())),
            SORTABLE_MIN => Ok(Dec::validated(-SORTABLE_LIMIT.clone())),
            [b'-', rest @ ..] => {
                let complement = read_fixed(rest)?;
                let magnitude = &*SORTABLE_LIMIT - 1u8 - complement;
                if magnitude == BigInt::from(0) {
                    return Err(DecError::Parse("negative zero in sortable bytes"));
                }
                Dec::checked_from_raw(-magnitude)
            },
            _ => Dec::checked_from_raw(read_fixed(bytes)?),
        }
    }
}

fn write_fixed(out: &mut Vec<u8>, digits: &BigInt) {
    let padded = format!("{:0>width$}", digits.to_string(), width = SORTABLE_DIGITS);
    let (int_part, frac_part) = padded.as_bytes().split_at(SORTABLE_INTEGER_DIGITS);
    out.extend_from_slice(int_part);
    out.push(b'.');
    out.extend_from_slice(frac_part);
}

fn read_fixed(bytes: &[u8]) -> DecResult<BigInt> {
    if bytes.len() != SORTABLE_DIGITS + 1 || bytes[SORTABLE_INTEGER_DIGITS] != b'.' {
        return Err(DecError::Parse("malformed sortable bytes"));
    }
    let digits: Vec<u8> = bytes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != SORTABLE_INTEGER_DIGITS)
        .map(|(_, b)| *b)
        .collect();
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(DecError::Parse("malformed sortable bytes"));
    }
    BigInt::parse_bytes(&digits, 10).ok_or(DecError::Parse("malformed sortable bytes"))
}

// ============================================================================
// Serde (JSON / YAML string scalars)
// ============================================================================

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Dec;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;

    /// Serializes as the canonical string
    impl Serialize for Dec {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for Dec {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_str(DecVisitor)
        }
    }

    struct DecVisitor;

    impl<'de> de::Visitor<'de> for DecVisitor {
        type Value = Dec;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("string-encoded decimal")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            v.parse()
                .map_err(|e| E::custom(format!("Error parsing decimal '{}': {}", v, e)))
        }
    }
}

#[cfg(feature = "serde")]
impl Dec {
    /// `"<canonical>"`
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// Double-quoted YAML scalar followed by a newline.
    ///
    /// The canonical string holds only digits, `-` and `.`, so it needs no
    /// escaping inside double quotes.
    pub fn to_yaml(&self) -> String {
        format!("\"{}\"\n", self)
    }

    pub fn from_yaml(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }
}
