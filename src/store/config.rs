// ============================================================================
// Store Configuration
// Module addresses and index layout settings
// ============================================================================

use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::LazyLock;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Module Address
// ============================================================================

/// Byte length of a module address.
pub const ADDRESS_LEN: usize = 20;

/// Deterministic account address owned by a named module.
///
/// The first 20 bytes of `SHA-256(name)`; identical on every replica, so
/// module accounts can be referenced before any state exists.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModuleAddress([u8; ADDRESS_LEN]);

impl ModuleAddress {
    pub fn for_module(name: &str) -> Self {
        let digest = Sha256::digest(name.as_bytes());
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&digest[..ADDRESS_LEN]);
        Self(bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl fmt::Display for ModuleAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ModuleAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleAddress({})", self)
    }
}

impl AsRef<[u8]> for ModuleAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

pub const BONDED_POOL: &str = "bonded_tokens_pool";
pub const NOT_BONDED_POOL: &str = "not_bonded_tokens_pool";
pub const DISTRIBUTION: &str = "distribution";
pub const FEE_COLLECTOR: &str = "fee_collector";
pub const STAKING: &str = "staking";

pub static BONDED_POOL_ADDRESS: LazyLock<ModuleAddress> =
    LazyLock::new(|| ModuleAddress::for_module(BONDED_POOL));

pub static NOT_BONDED_POOL_ADDRESS: LazyLock<ModuleAddress> =
    LazyLock::new(|| ModuleAddress::for_module(NOT_BONDED_POOL));

pub static DISTRIBUTION_ADDRESS: LazyLock<ModuleAddress> =
    LazyLock::new(|| ModuleAddress::for_module(DISTRIBUTION));

pub static FEE_COLLECTOR_ADDRESS: LazyLock<ModuleAddress> =
    LazyLock::new(|| ModuleAddress::for_module(FEE_COLLECTOR));

pub static STAKING_ADDRESS: LazyLock<ModuleAddress> =
    LazyLock::new(|| ModuleAddress::for_module(STAKING));

// ============================================================================
// Index Configuration
// ============================================================================

/// Layout of a ranking index inside a shared key-value store
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexConfig {
    /// Bytes every key of the index starts with
    pub prefix: Vec<u8>,

    /// Optional: Maximum number of ranked accounts
    /// None means unlimited
    pub max_entries: Option<usize>,
}

impl IndexConfig {
    pub fn new(prefix: impl Into<Vec<u8>>) -> Self {
        Self {
            prefix: prefix.into(),
            max_entries: None,
        }
    }

    /// Prefix the index with the owning module's address.
    pub fn for_module(name: &str) -> Self {
        Self::new(ModuleAddress::for_module(name).as_bytes().to_vec())
    }

    /// Builder method: Cap the number of ranked accounts
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = Some(max);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.prefix.is_empty() {
            return Err("Index prefix cannot be empty".to_string());
        }
        if self.max_entries == Some(0) {
            return Err("Max entries must be positive".to_string());
        }
        Ok(())
    }
}
