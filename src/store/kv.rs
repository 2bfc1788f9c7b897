// ============================================================================
// Key-Value Store
// Byte-ordered store contract, in-memory implementation, typed helpers
// ============================================================================

use crate::numeric::{Dec, DecError};
use crossbeam_skiplist::SkipMap;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;
use std::sync::Arc;

// ============================================================================
// Store Errors
// ============================================================================

/// Errors raised while reading typed values out of a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Stored bytes did not decode
    Decode {
        key: Vec<u8>,
        source: DecError,
    },
    /// Value has no order-preserving encoding
    Encode { source: DecError },
    /// Index is at its configured capacity
    Full { max_entries: usize },
    /// Index configuration rejected
    InvalidConfig(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Decode { key, source } => {
                write!(f, "cannot decode value at key {:02x?}: {}", key, source)
            },
            StoreError::Encode { source } => write!(f, "cannot encode index key: {}", source),
            StoreError::Full { max_entries } => {
                write!(f, "index full: at most {} entries", max_entries)
            },
            StoreError::InvalidConfig(reason) => write!(f, "invalid index config: {}", reason),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Decode { source, .. } | StoreError::Encode { source } => Some(source),
            _ => None,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

// ============================================================================
// Store Trait
// ============================================================================

/// Byte-keyed store iterated in lexicographic key order
pub trait KvStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    fn set(&mut self, key: &[u8], value: &[u8]);

    fn delete(&mut self, key: &[u8]);

    fn has(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Entries with `start <= key < end`, ascending. `None` leaves the
    /// bound open.
    fn range(&self, start: Option<&[u8]>, end: Option<&[u8]>) -> Vec<(Vec<u8>, Vec<u8>)>;

    /// The last `limit` entries of [`range`](KvStore::range), descending.
    fn range_rev(
        &self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        limit: usize,
    ) -> Vec<(Vec<u8>, Vec<u8>)> {
        let mut entries = self.range(start, end);
        entries.reverse();
        entries.truncate(limit);
        entries
    }
}

// ============================================================================
// In-Memory Store
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &[u8], value: &[u8]) {
        tracing::trace!(key = ?key, len = value.len(), "store set");
        self.entries.insert(key.to_vec(), value.to_vec());
    }

    fn delete(&mut self, key: &[u8]) {
        tracing::trace!(key = ?key, "store delete");
        self.entries.remove(key);
    }

    fn has(&self, key: &[u8]) -> bool {
        self.entries.contains_key(key)
    }

    fn range(&self, start: Option<&[u8]>, end: Option<&[u8]>) -> Vec<(Vec<u8>, Vec<u8>)> {
        match range_bounds(start, end) {
            Some(bounds) => self
                .entries
                .range::<[u8], _>(bounds)
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            None => Vec::new(),
        }
    }

    fn range_rev(
        &self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        limit: usize,
    ) -> Vec<(Vec<u8>, Vec<u8>)> {
        match range_bounds(start, end) {
            Some(bounds) => self
                .entries
                .range::<[u8], _>(bounds)
                .rev()
                .take(limit)
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Half-open bounds, or `None` when the range is empty.
fn range_bounds<'a>(
    start: Option<&'a [u8]>,
    end: Option<&'a [u8]>,
) -> Option<(Bound<&'a [u8]>, Bound<&'a [u8]>)> {
    if let (Some(s), Some(e)) = (start, end) {
        if s >= e {
            return None;
        }
    }
    Some((
        start.map_or(Bound::Unbounded, Bound::Included),
        end.map_or(Bound::Unbounded, Bound::Excluded),
    ))
}

// ============================================================================
// Shared Store
// ============================================================================

/// Lock-free ordered store; clones share the same entries
#[derive(Clone, Default)]
pub struct SharedStore {
    /// SkipMap keeps keys sorted for range scans without a global lock
    entries: Arc<SkipMap<Vec<u8>, Vec<u8>>>,
}

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for SharedStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedStore")
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl KvStore for SharedStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn set(&mut self, key: &[u8], value: &[u8]) {
        tracing::trace!(key = ?key, len = value.len(), "shared store set");
        self.entries.insert(key.to_vec(), value.to_vec());
    }

    fn delete(&mut self, key: &[u8]) {
        tracing::trace!(key = ?key, "shared store delete");
        self.entries.remove(key);
    }

    fn has(&self, key: &[u8]) -> bool {
        self.entries.contains_key(key)
    }

    fn range(&self, start: Option<&[u8]>, end: Option<&[u8]>) -> Vec<(Vec<u8>, Vec<u8>)> {
        match range_bounds(start, end) {
            Some(bounds) => self
                .entries
                .range::<[u8], _>(bounds)
                .map(|entry| (entry.key().clone(), entry.value().clone()))
                .collect(),
            None => Vec::new(),
        }
    }

    fn range_rev(
        &self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        limit: usize,
    ) -> Vec<(Vec<u8>, Vec<u8>)> {
        match range_bounds(start, end) {
            Some(bounds) => self
                .entries
                .range::<[u8], _>(bounds)
                .rev()
                .take(limit)
                .map(|entry| (entry.key().clone(), entry.value().clone()))
                .collect(),
            None => Vec::new(),
        }
    }
}

// ============================================================================
// Typed Access
// ============================================================================

/// Read `key` and decode it. An absent key is `Ok(None)`, never an error.
pub fn get_and_decode<S, T, E, F>(store: &S, decode: F, key: &[u8]) -> Result<Option<T>, E>
where
    S: KvStore + ?Sized,
    F: FnOnce(&[u8]) -> Result<T, E>,
{
    match store.get(key) {
        None => Ok(None),
        Some(bytes) => decode(&bytes).map(Some),
    }
}

/// Store a decimal as its canonical bytes.
pub fn store_dec<S: KvStore + ?Sized>(store: &mut S, key: &[u8], value: &Dec) {
    store.set(key, &value.to_bytes());
}

/// Load a decimal written by [`store_dec`].
pub fn load_dec<S: KvStore + ?Sized>(store: &S, key: &[u8]) -> StoreResult<Option<Dec>> {
    get_and_decode(store, Dec::from_bytes, key).map_err(|source| StoreError::Decode {
        key: key.to_vec(),
        source,
    })
}

/// Thin handle forwarding to an underlying store
#[derive(Debug)]
pub struct StoreApi<S> {
    store: S,
}

impl<S: KvStore> StoreApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S: KvStore> KvStore for StoreApi<S> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.store.get(key)
    }

    fn set(&mut self, key: &[u8], value: &[u8]) {
        self.store.set(key, value)
    }

    fn delete(&mut self, key: &[u8]) {
        self.store.delete(key)
    }

    fn has(&self, key: &[u8]) -> bool {
        self.store.has(key)
    }

    fn range(&self, start: Option<&[u8]>, end: Option<&[u8]>) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.store.range(start, end)
    }

    fn range_rev(
        &self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        limit: usize,
    ) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.store.range_rev(start, end, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mem_store_basic_operations() {
        let mut store = MemStore::new();
        assert!(store.is_empty());

        store.set(b"a", b"1");
        store.set(b"b", b"2");
        assert_eq!(store.get(b"a"), Some(b"1".to_vec()));
        assert!(store.has(b"b"));
        assert_eq!(store.len(), 2);

        store.set(b"a", b"3");
        assert_eq!(store.get(b"a"), Some(b"3".to_vec()));

        store.delete(b"a");
        assert!(!store.has(b"a"));
        assert_eq!(store.get(b"a"), None);
        // deleting an absent key is a no-op
        store.delete(b"zz");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_range_is_byte_ordered_and_half_open() {
        let mut store = MemStore::new();
        let keys: [&[u8]; 5] = [b"b", b"a", b"ab", b"c", b"\x00"];
        for key in keys {
            store.set(key, key);
        }

        let keys: Vec<Vec<u8>> = store.range(None, None).into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![b"\x00".to_vec(), b"a".to_vec(), b"ab".to_vec(), b"b".to_vec(), b"c".to_vec()]
        );

        let keys: Vec<Vec<u8>> = store
            .range(Some(&b"a"[..]), Some(&b"b"[..]))
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec![b"a".to_vec(), b"ab".to_vec()]);

        assert!(store.range(Some(&b"c"[..]), Some(&b"a"[..])).is_empty());
    }

    #[test]
    fn test_range_rev_takes_from_the_top() {
        let mut mem = MemStore::new();
        let mut shared = SharedStore::new();
        for key in [&b"a"[..], b"ab", b"b", b"c"] {
            mem.set(key, key);
            shared.set(key, key);
        }
        let api = StoreApi::new(mem.clone());

        let expected = vec![b"b".to_vec(), b"ab".to_vec()];
        let keys = |entries: Vec<(Vec<u8>, Vec<u8>)>| -> Vec<Vec<u8>> {
            entries.into_iter().map(|(k, _)| k).collect()
        };
        assert_eq!(keys(mem.range_rev(Some(&b"a"[..]), Some(&b"c"[..]), 2)), expected);
        assert_eq!(keys(shared.range_rev(Some(&b"a"[..]), Some(&b"c"[..]), 2)), expected);
        assert_eq!(keys(api.range_rev(Some(&b"a"[..]), Some(&b"c"[..]), 2)), expected);

        assert_eq!(mem.range_rev(None, None, 10).len(), 4);
        assert!(mem.range_rev(None, None, 0).is_empty());
        assert!(shared.range_rev(Some(&b"c"[..]), Some(&b"a"[..]), 3).is_empty());
    }

    #[test]
    fn test_shared_store_clones_see_writes() {
        let mut writer = SharedStore::new();
        let reader = writer.clone();

        writer.set(b"k2", b"two");
        writer.set(b"k1", b"one");
        assert_eq!(reader.get(b"k1"), Some(b"one".to_vec()));
        assert_eq!(reader.len(), 2);

        let keys: Vec<Vec<u8>> = reader
            .range(Some(&b"k1"[..]), None)
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec![b"k1".to_vec(), b"k2".to_vec()]);

        writer.delete(b"k1");
        assert!(!reader.has(b"k1"));
        assert!(reader.range(Some(&b"k2"[..]), Some(&b"k2"[..])).is_empty());
    }

    #[test]
    fn test_get_and_decode_absent_key() {
        let store = MemStore::new();
        let res: Result<Option<Dec>, DecError> = get_and_decode(&store, Dec::from_bytes, b"missing");
        assert_eq!(res, Ok(None));
    }

    #[test]
    fn test_get_and_decode_propagates_decode_error() {
        let mut store = MemStore::new();
        store.set(b"bad", b"not a number");
        let res = get_and_decode(&store, Dec::from_bytes, b"bad");
        assert!(matches!(res, Err(DecError::Parse(_))));

        let res = load_dec(&store, b"bad");
        assert!(matches!(res, Err(StoreError::Decode { .. })));
    }

    #[test]
    fn test_store_and_load_dec() {
        let mut api = StoreApi::new(MemStore::new());
        let value: Dec = "-12.5".parse().unwrap();
        store_dec(&mut api, b"balance", &value);

        assert_eq!(api.get(b"balance"), Some(b"-12.500000000000000000".to_vec()));
        assert_eq!(load_dec(&api, b"balance"), Ok(Some(value)));

        api.delete(b"balance");
        assert_eq!(load_dec(&api, b"balance"), Ok(None));
        assert!(api.into_inner().is_empty());
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Decode {
            key: vec![0xab],
            source: DecError::Overflow,
        };
        assert_eq!(
            err.to_string(),
            "cannot decode value at key [ab]: arithmetic overflow: value out of range"
        );
        assert_eq!(
            StoreError::Full { max_entries: 3 }.to_string(),
            "index full: at most 3 entries"
        );
    }
}
