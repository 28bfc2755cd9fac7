//! Benchmark Run Test Suite
//!
//! End-to-end runs through the public API: files on disk, the sharded
//! store under concurrent workers, and the JSON/CSV report.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test benchmark_run
//! cargo test --test benchmark_run end_to_end::
//! ```

use shardbench::{Entry, Op};

// Test modules
pub mod concurrency;
pub mod end_to_end;
pub mod files;
pub mod properties;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// `n` entries `k0..k{n-1}` with values `v0..`.
pub fn small_dataset(n: usize) -> Vec<Entry> {
    (0..n)
        .map(|i| Entry::new(format!("k{}", i), format!("v{}", i)))
        .collect()
}

/// A trace of `n` ops over `keys` keys, one set every `write_every` ops.
pub fn mixed_trace(n: usize, keys: usize, write_every: usize) -> Vec<Op> {
    (0..n)
        .map(|i| {
            let key = format!("k{}", i % keys);
            if write_every > 0 && i % write_every == write_every - 1 {
                Op::Set(key, format!("w{}", i))
            } else {
                Op::Get(key)
            }
        })
        .collect()
}
