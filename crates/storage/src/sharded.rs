//! Sharded storage for the benchmark
//!
//! A fixed array of partitions, each an FxHashMap behind its own RwLock.
//! Reads take the shard's lock shared, writes take it exclusive, and no
//! operation ever holds more than one shard lock.
//!
//! # Design
//!
//! - Placement: `fnv1a64(key) % shard_count`, a pure function of the key
//! - Fixed shard count: no resizing, no rehashing, no migration
//! - parking_lot RwLock: no poisoning, so get/set stay infallible
//!
//! Contention on a single access is bounded by the share of the key space
//! living on that shard, so read scalability grows with `shard_count`
//! independently of the number of workers.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use shardbench_core::{fnv1a64, Entry, Error, KvStore, Result};

/// One partition of the key space
///
/// Owns the mapping for every key whose hash lands on it.
#[derive(Debug, Default)]
pub struct Shard {
    /// HashMap with FxHash for O(1) lookups within the shard
    data: RwLock<FxHashMap<String, String>>,
}

impl Shard {
    /// Create a new empty shard
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shard with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: RwLock::new(FxHashMap::with_capacity_and_hasher(
                capacity,
                Default::default(),
            )),
        }
    }

    /// Get number of entries in this shard
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Check if shard is empty
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    #[inline]
    fn get(&self, key: &str) -> Option<String> {
        self.data.read().get(key).cloned()
    }

    #[inline]
    fn contains(&self, key: &str) -> bool {
        self.data.read().contains_key(key)
    }

    #[inline]
    fn set(&self, key: String, value: String) {
        self.data.write().insert(key, value);
    }
}

/// Hash-partitioned key/value store
///
/// # Thread Safety
///
/// All operations are thread-safe:
/// - get(): shared lock on one shard
/// - set(): exclusive lock on one shard
/// - Accesses to different shards never contend
///
/// # Example
///
/// ```
/// use shardbench_storage::ShardedStore;
///
/// let store = ShardedStore::new(16).unwrap();
/// store.set("abc".to_string(), "https://example.com".to_string());
/// assert_eq!(store.get("abc").as_deref(), Some("https://example.com"));
/// ```
pub struct ShardedStore {
    shards: Box<[Shard]>,
}

impl ShardedStore {
    /// Create a store with `shard_count` empty shards
    ///
    /// Returns [`Error::InvalidConfig`] if `shard_count` is zero.
    pub fn new(shard_count: usize) -> Result<Self> {
        Self::with_capacity(shard_count, 0)
    }

    /// Create a store sized for roughly `expected_entries` keys
    pub fn with_capacity(shard_count: usize, expected_entries: usize) -> Result<Self> {
        if shard_count == 0 {
            return Err(Error::config("shard count must be at least 1"));
        }
        let per_shard = (expected_entries + shard_count - 1) / shard_count;
        let shards = (0..shard_count)
            .map(|_| Shard::with_capacity(per_shard))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        tracing::debug!(shard_count, per_shard, "created sharded store");
        Ok(Self { shards })
    }

    /// Build a store and load a dataset into it
    pub fn from_entries<I>(shard_count: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = Entry>,
    {
        let entries = entries.into_iter();
        let store = Self::with_capacity(shard_count, entries.size_hint().0)?;
        store.load(entries);
        Ok(store)
    }

    /// Insert every entry of a dataset, returning how many were applied
    pub fn load<I>(&self, entries: I) -> usize
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut applied = 0;
        for entry in entries {
            self.set(entry.key, entry.value);
            applied += 1;
        }
        tracing::info!(
            applied,
            entries = self.total_entries(),
            shards = self.shard_count(),
            "loaded dataset"
        );
        applied
    }

    /// Get number of shards
    #[inline]
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Index of the shard owning `key`
    #[inline]
    pub fn shard_of(&self, key: &str) -> usize {
        (fnv1a64(key) % self.shards.len() as u64) as usize
    }

    #[inline]
    fn shard_for(&self, key: &str) -> &Shard {
        &self.shards[self.shard_of(key)]
    }

    /// Get a value by key
    ///
    /// Takes the owning shard's lock in shared mode.
    #[inline]
    pub fn get(&self, key: &str) -> Option<String> {
        self.shard_for(key).get(key)
    }

    /// Put a value for a key, overwriting any previous value
    ///
    /// Takes the owning shard's lock exclusively.
    #[inline]
    pub fn set(&self, key: String, value: String) {
        self.shard_for(&key).set(key, value)
    }

    /// Check if a key exists
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.shard_for(key).contains(key)
    }

    /// Number of entries on shard `index`, or `None` if out of range
    pub fn shard_len(&self, index: usize) -> Option<usize> {
        self.shards.get(index).map(Shard::len)
    }

    /// Get total number of entries across all shards
    ///
    /// Shards are read one at a time, so the sum is not a snapshot when
    /// writers are active.
    pub fn total_entries(&self) -> usize {
        self.shards.iter().map(Shard::len).sum()
    }
}

impl KvStore for ShardedStore {
    #[inline]
    fn get(&self, key: &str) -> Option<String> {
        ShardedStore::get(self, key)
    }

    #[inline]
    fn set(&self, key: String, value: String) {
        ShardedStore::set(self, key, value)
    }

    fn shard_count(&self) -> usize {
        ShardedStore::shard_count(self)
    }

    fn len(&self) -> usize {
        self.total_entries()
    }
}

impl std::fmt::Debug for ShardedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardedStore")
            .field("shard_count", &self.shard_count())
            .field("total_entries", &self.total_entries())
            .finish()
    }
}
