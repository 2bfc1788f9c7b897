// ============================================================================
// Numeric Errors
// Error types for deterministic decimal arithmetic
// ============================================================================

use std::fmt;

/// Errors produced by decimal construction and arithmetic.
///
/// `Parse` and `PrecisionExceeded` are returned to callers. `Overflow` and
/// `DivideByZero` are returned by the `checked_*` family and abort the
/// operation (see [`fatal`]) everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecError {
    /// Literal does not match `-?[0-9]+(\.[0-9]+)?`
    Parse(&'static str),
    /// More fractional digits than the 18 retained
    PrecisionExceeded {
        /// Number of fractional digits supplied
        digits: usize,
    },
    /// Scaled value outside `±(2^256 - 1)`
    Overflow,
    /// Division-family operation with a zero divisor
    DivideByZero,
}

impl fmt::Display for DecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecError::Parse(reason) => write!(f, "invalid decimal literal: {}", reason),
            DecError::PrecisionExceeded { digits } => write!(
                f,
                "precision exceeded: {} fractional digits, at most {} allowed",
                digits,
                super::constants::PRECISION
            ),
            DecError::Overflow => {
                write!(f, "arithmetic overflow: value out of range")
            },
            DecError::DivideByZero => write!(f, "division by zero"),
        }
    }
}

impl std::error::Error for DecError {}

/// Result type alias for decimal operations
pub type DecResult<T> = Result<T, DecError>;

/// Abort the current operation with an unrecoverable arithmetic fault.
///
/// Every replica hits the same fault for the same inputs, so the surrounding
/// transaction aborts identically everywhere.
#[cold]
#[track_caller]
pub(crate) fn fatal(err: DecError) -> ! {
    tracing::error!(error = %err, "fatal decimal fault");
    panic!("{}", err)
}

/// Unwrap a checked result or raise the fault it carries.
#[inline]
#[track_caller]
pub(crate) fn or_fatal<T>(result: DecResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => fatal(err),
    }
}
