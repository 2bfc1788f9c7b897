// ============================================================================
// Store Module
// Byte-ordered key-value access and decimal-keyed indexes
// ============================================================================

pub mod config;
mod kv;
mod ranking;

pub use config::{IndexConfig, ModuleAddress};
pub use kv::{
    get_and_decode, load_dec, store_dec, KvStore, MemStore, SharedStore, StoreApi, StoreError,
    StoreResult,
};
pub use ranking::{RankedAccount, StakeRanking};
