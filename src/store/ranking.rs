// ============================================================================
// Stake Ranking Index
// Accounts ordered by decimal stake through sortable key bytes
// ============================================================================
//
// Key layout under the configured prefix:
//
//   prefix ‖ sortable(stake) ‖ account  ->  account
//   prefix ‖ 0x00 ‖ account             ->  canonical(stake)
//
// Sortable encodings never begin with 0x00, so the reverse entries sit below
// every ranked entry and a single range scan yields stakes in numeric order.
// No sortable encoding is a prefix of another, so every key holding a given
// stake sorts below prefix_end(prefix ‖ sortable(stake)).

use super::config::IndexConfig;
use super::kv::{load_dec, store_dec, KvStore, StoreError, StoreResult};
use crate::numeric::{Dec, DecError};

const REVERSE_TAG: u8 = 0x00;
const RANKED_START: u8 = 0x01;

/// Account identifier paired with its stake
pub type RankedAccount = (Vec<u8>, Dec);

/// Stake index over a byte-ordered store
#[derive(Debug)]
pub struct StakeRanking<S> {
    store: S,
    config: IndexConfig,
}

impl<S: KvStore> StakeRanking<S> {
    /// # Errors
    /// Returns `InvalidConfig` if the configuration does not validate.
    pub fn new(store: S, config: IndexConfig) -> StoreResult<Self> {
        config.validate().map_err(StoreError::InvalidConfig)?;
        Ok(Self { store, config })
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Insert or move `account` to `stake`.
    ///
    /// # Errors
    /// - `Encode` if the stake magnitude exceeds 10^18
    /// - `Full` if `account` is new and the index is at capacity
    pub fn set_stake(&mut self, account: &[u8], stake: &Dec) -> StoreResult<()> {
        let sortable = stake
            .checked_to_sortable_bytes()
            .map_err(|source| StoreError::Encode { source })?;

        match self.stake_of(account)? {
            Some(old) => {
                let old_key = self.ranked_key(&old.to_sortable_bytes(), account);
                self.store.delete(&old_key);
            },
            None => {
                if let Some(max_entries) = self.config.max_entries {
                    if self.len() >= max_entries {
                        tracing::debug!(max_entries, "stake index full, rejecting account");
                        return Err(StoreError::Full { max_entries });
                    }
                }
            },
        }

        let key = self.ranked_key(&sortable, account);
        let reverse = self.reverse_key(account);
        self.store.set(&key, account);
        store_dec(&mut self.store, &reverse, stake);
        tracing::trace!(account = ?account, stake = %stake, "stake updated");
        Ok(())
    }

    /// Drop `account`, returning its last stake.
    pub fn remove(&mut self, account: &[u8]) -> StoreResult<Option<Dec>> {
        let Some(stake) = self.stake_of(account)? else {
            return Ok(None);
        };
        let key = self.ranked_key(&stake.to_sortable_bytes(), account);
        let reverse = self.reverse_key(account);
        self.store.delete(&key);
        self.store.delete(&reverse);
        tracing::trace!(account = ?account, "stake removed");
        Ok(Some(stake))
    }

    pub fn stake_of(&self, account: &[u8]) -> StoreResult<Option<Dec>> {
        load_dec(&self.store, &self.reverse_key(account))
    }

    pub fn contains(&self, account: &[u8]) -> bool {
        self.store.has(&self.reverse_key(account))
    }

    /// Number of ranked accounts.
    pub fn len(&self) -> usize {
        let start = self.tagged(REVERSE_TAG);
        let end = self.tagged(RANKED_START);
        self.store.range(Some(start.as_slice()), Some(end.as_slice())).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All accounts, lowest stake first; ties ordered by account bytes.
    pub fn ascending(&self) -> StoreResult<Vec<RankedAccount>> {
        let start = self.tagged(RANKED_START);
        let end = prefix_end(&self.config.prefix);
        let entries = self.store.range(Some(start.as_slice()), end.as_deref());
        self.decode_all(entries)
    }

    /// Up to `n` accounts, highest stake first. Reads only those `n` entries.
    pub fn top(&self, n: usize) -> StoreResult<Vec<RankedAccount>> {
        let start = self.tagged(RANKED_START);
        let end = prefix_end(&self.config.prefix);
        let entries = self
            .store
            .range_rev(Some(start.as_slice()), end.as_deref(), n);
        self.decode_all(entries)
    }

    /// Accounts with `min <= stake <= max`, ascending.
    ///
    /// # Errors
    /// Returns `Encode` if `min` has no sortable encoding.
    pub fn between(&self, min: &Dec, max: &Dec) -> StoreResult<Vec<RankedAccount>> {
        if min > max {
            return Ok(Vec::new());
        }
        let lower = min
            .checked_to_sortable_bytes()
            .map_err(|source| StoreError::Encode { source })?;
        let start = self.stake_key(&lower);
        // max above the sortable range leaves the scan open to the prefix end
        let end = match max.checked_to_sortable_bytes() {
            Ok(upper) => prefix_end(&self.stake_key(&upper)),
            Err(_) => prefix_end(&self.config.prefix),
        };
        let entries = self.store.range(Some(start.as_slice()), end.as_deref());
        self.decode_all(entries)
    }

    // ========================================================================
    // Keys
    // ========================================================================

    fn decode_all(&self, entries: Vec<(Vec<u8>, Vec<u8>)>) -> StoreResult<Vec<RankedAccount>> {
        entries
            .into_iter()
            .map(|(key, account)| -> StoreResult<RankedAccount> {
                let from = self.config.prefix.len();
                let to = key.len().saturating_sub(account.len());
                let stake = key
                    .get(from..to)
                    .ok_or(DecError::Parse("truncated index key"))
                    .and_then(Dec::from_sortable_bytes)
                    .map_err(|source| StoreError::Decode {
                        key: key.clone(),
                        source,
                    })?;
                Ok((account, stake))
            })
            .collect()
    }

    fn stake_key(&self, sortable: &[u8]) -> Vec<u8> {
        self.ranked_key(sortable, &[])
    }

    fn ranked_key(&self, sortable: &[u8], account: &[u8]) -> Vec<u8> {
        let mut key = Vec::with_capacity(self.config.prefix.len() + sortable.len() + account.len());
        key.extend_from_slice(&self.config.prefix);
        key.extend_from_slice(sortable);
        key.extend_from_slice(account);
        key
    }

    fn reverse_key(&self, account: &[u8]) -> Vec<u8> {
        let mut key = self.tagged(REVERSE_TAG);
        key.extend_from_slice(account);
        key
    }

    fn tagged(&self, tag: u8) -> Vec<u8> {
        let mut key = self.config.prefix.clone();
        key.push(tag);
        key
    }
}

/// Smallest key greater than every key starting with `prefix`, if any.
fn prefix_end(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < u8::MAX {
            end.push(last + 1);
            return Some(end);
        }
    }
    None
}
