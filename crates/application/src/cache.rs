//! Cache/invalidation coordinator.
//!
//! Tracks cached collection and request lists by [`CacheKey`] and which of
//! them must be refetched after a mutation. Invalidation is always as
//! narrow as the key: a collection key touches only that collection, a
//! namespace key touches every list of that kind in the same workspace.
//!
//! Every invalidation advances an epoch. A fetch records the epoch before
//! it calls out, and its result is only stored if nothing covering the key
//! was invalidated in between.

use std::collections::BTreeMap;

use relay_domain::{CacheKey, Collection, EntityKind, SavedRequest};

/// Whether a key can be served from cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Never fetched.
    Missing,
    /// Fetched and not invalidated since.
    Fresh,
    /// Invalidated; the next read refetches.
    Stale,
}

/// Data held for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedData {
    /// A collection's requests, already normalized.
    Requests(Vec<SavedRequest>),
    /// A workspace's collections.
    Collections(Vec<Collection>),
}

/// One cache slot. `data` is `None` for a key invalidated before any read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Last fetched data.
    pub data: Option<CachedData>,
    /// Set by invalidation, cleared by a store.
    pub stale: bool,
    /// Epoch of the last invalidation that reached this key.
    pub invalidated_at: u64,
}

/// Cached lists plus their staleness.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CacheCoordinator {
    entries: BTreeMap<CacheKey, CacheEntry>,
    epoch: u64,
    // Fetches started before this epoch predate a reset.
    floor: u64,
}

impl CacheCoordinator {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no key is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current epoch; capture it before fetching and pass it to [`Self::store`].
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Looks up the slot for a key.
    #[must_use]
    pub fn entry(&self, key: &CacheKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Freshness of a key.
    #[must_use]
    pub fn freshness(&self, key: &CacheKey) -> Freshness {
        match self.entries.get(key) {
            None => Freshness::Missing,
            Some(entry) if entry.stale => Freshness::Stale,
            Some(_) => Freshness::Fresh,
        }
    }

    /// Returns true if the key has been invalidated since its last fetch.
    #[must_use]
    pub fn is_stale(&self, key: &CacheKey) -> bool {
        self.freshness(key) == Freshness::Stale
    }

    /// Keys currently marked stale.
    #[must_use]
    pub fn stale_keys(&self) -> Vec<&CacheKey> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.stale)
            .map(|(key, _)| key)
            .collect()
    }

    /// Cached requests for a key, if fresh.
    #[must_use]
    pub fn fresh_requests(&self, key: &CacheKey) -> Option<&[SavedRequest]> {
        match self.entries.get(key) {
            Some(CacheEntry {
                data: Some(CachedData::Requests(requests)),
                stale: false,
                ..
            }) => Some(requests),
            _ => None,
        }
    }

    /// Cached collections for a key, if fresh.
    #[must_use]
    pub fn fresh_collections(&self, key: &CacheKey) -> Option<&[Collection]> {
        match self.entries.get(key) {
            Some(CacheEntry {
                data: Some(CachedData::Collections(collections)),
                stale: false,
                ..
            }) => Some(collections),
            _ => None,
        }
    }

    /// Finds a collection name among cached collection lists of a workspace.
    ///
    /// Stale lists are searched too; a name is display-only.
    #[must_use]
    pub fn collection_name(&self, workspace: Option<&str>, collection_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .filter(|(key, _)| {
                key.kind == EntityKind::Collections && key.workspace.as_deref() == workspace
            })
            .filter_map(|(_, entry)| match &entry.data {
                Some(CachedData::Collections(collections)) => Some(collections),
                _ => None,
            })
            .flatten()
            .find(|collection| collection.id == collection_id)
            .map(|collection| collection.name.as_str())
    }

    /// Stores data fetched since `fetched_at` and marks the key fresh.
    ///
    /// The write is dropped, and the key left as it is, if the key or a
    /// namespace covering it was invalidated after `fetched_at`, or the
    /// cache was reset since.
    pub fn store(&mut self, key: CacheKey, data: CachedData, fetched_at: u64) -> bool {
        if fetched_at < self.floor || self.invalidated_since(&key, fetched_at) {
            return false;
        }
        let invalidated_at = self.entries.get(&key).map_or(0, |entry| entry.invalidated_at);
        self.entries.insert(
            key,
            CacheEntry {
                data: Some(data),
                stale: false,
                invalidated_at,
            },
        );
        true
    }

    fn invalidated_since(&self, key: &CacheKey, fetched_at: u64) -> bool {
        self.entries.iter().any(|(existing, entry)| {
            (existing == key || existing.covers(key)) && entry.invalidated_at > fetched_at
        })
    }

    /// Marks every reader of `key` stale and returns the affected keys.
    ///
    /// The key itself is always tracked afterwards, so invalidating a key
    /// nobody has read yet is still observable.
    pub fn invalidate(&mut self, key: &CacheKey) -> Vec<CacheKey> {
        self.epoch += 1;
        let epoch = self.epoch;
        let mut affected = Vec::new();
        if key.is_namespace() {
            for (existing, entry) in &mut self.entries {
                if existing != key && key.covers(existing) {
                    entry.stale = true;
                    entry.invalidated_at = epoch;
                    affected.push(existing.clone());
                }
            }
        }

        self.entries
            .entry(key.clone())
            .and_modify(|entry| {
                entry.stale = true;
                entry.invalidated_at = epoch;
            })
            .or_insert(CacheEntry {
                data: None,
                stale: true,
                invalidated_at: epoch,
            });
        affected.push(key.clone());
        affected
    }

    /// Drops every entry that does not belong to `workspace`.
    pub fn retain_workspace(&mut self, workspace: Option<&str>) {
        self.entries
            .retain(|key, _| key.workspace.as_deref() == workspace);
        self.reset_epoch();
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.reset_epoch();
    }

    fn reset_epoch(&mut self) {
        self.epoch += 1;
        self.floor = self.epoch;
    }
}
