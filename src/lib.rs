// ============================================================================
// Ledger Decimal Library
// Deterministic fixed-point arithmetic for replicated ledger state
// ============================================================================

//! # Ledger Decimal
//!
//! Signed decimals with exactly 18 fractional digits, backed by a big
//! integer and bounded to `±(2^256 - 1)` in the scaled domain. Every
//! operation is bit-identical on every machine, so replicas of a ledger
//! reach the same state.
//!
//! ## Features
//!
//! - **Fixed precision** with explicit rounding: half away from zero for
//!   `*` and `quo`, truncating and round-up variants, ties-to-even for
//!   integer rounding
//! - **Fault semantics**: out-of-range results abort the operation;
//!   `checked_*` variants return [`DecError`](numeric::DecError) instead
//! - **Encodings**: canonical string, JSON/YAML scalars, and
//!   order-preserving key bytes for store indexes
//! - **Stake ranking** over any byte-ordered key-value store
//!
//! ## Example
//!
//! ```rust
//! use ledger_dec::prelude::*;
//!
//! let rate: Dec = "0.05".parse().unwrap();
//! let principal = Dec::new(1200);
//! let interest = &principal * &rate;
//! assert_eq!(interest.to_string(), "60.000000000000000000");
//!
//! // Ranked by stake through the store's byte order
//! let mut ranking =
//!     StakeRanking::new(MemStore::new(), IndexConfig::for_module("bonded_tokens_pool")).unwrap();
//! ranking.set_stake(b"validator-a", &interest).unwrap();
//! ranking.set_stake(b"validator-b", &principal).unwrap();
//! assert_eq!(ranking.top(1).unwrap()[0].0, b"validator-b".to_vec());
//! ```

pub mod numeric;
pub mod store;
pub mod utils;

// Re-exports for convenience
pub mod prelude {
    pub use crate::numeric::{Dec, DecError, DecResult, Int, PRECISION};
    pub use crate::store::{
        get_and_decode, load_dec, store_dec, IndexConfig, KvStore, MemStore, ModuleAddress,
        SharedStore, StakeRanking, StoreApi, StoreError,
    };
}
