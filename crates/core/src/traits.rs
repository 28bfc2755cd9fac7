//! Store abstraction driven by the benchmark
//!
//! The execution driver is generic over [`KvStore`] so that alternative store
//! layouts can be measured under the same protocol.

/// A concurrent in-memory key/value store
///
/// Implementations must be safe to share across worker threads. `get` and
/// `set` are total: they never fail and complete in bounded time once any
/// lock they wait on is released.
pub trait KvStore: Send + Sync {
    /// Look up a key, returning a copy of its value if present
    fn get(&self, key: &str) -> Option<String>;

    /// Insert or overwrite a key
    fn set(&self, key: String, value: String);

    /// Number of independently locked partitions
    fn shard_count(&self) -> usize;

    /// Total number of entries
    ///
    /// Best-effort under concurrent mutation.
    fn len(&self) -> usize;

    /// Check if the store holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
