// ============================================================================
// Utilities Module
// Slice helpers and optional log output
// ============================================================================

#[cfg(feature = "logging")]
pub mod logging;
pub mod seq;
