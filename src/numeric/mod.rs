// ============================================================================
// Numeric Module
// Deterministic 18-digit decimal arithmetic for replicated ledgers
// ============================================================================
//
// This module provides:
// - Dec: signed decimal, raw big integer scaled by 10^18
// - Int: bounded big integer used for conversions and rounding
// - DecError: parse and arithmetic faults
// - Canonical, JSON/YAML and order-preserving byte encodings
//
// Design principles:
// - No floating-point operations
// - Every result is bit-identical across machines
// - Range faults abort the operation; `checked_*` variants return them

mod approx;
mod codec;
mod constants;
mod dec;
mod errors;
mod int;

pub use constants::{MAX_APPROX_ROOT_ITERATIONS, MAX_BIT_LEN, PRECISION, SORTABLE_INTEGER_DIGITS};
pub use dec::Dec;
pub use errors::{DecError, DecResult};
pub use int::Int;
