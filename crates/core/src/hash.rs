//! FNV-1a 64-bit hash
//!
//! Used only to place keys on shards. Every implementation of the benchmark
//! must agree on this function bit for bit, otherwise the same trace would
//! distribute differently across shards and runs would not be comparable.

/// FNV-1a 64-bit offset basis
pub const FNV_OFFSET_BASIS: u64 = 14_695_981_039_346_656_037;

/// FNV-1a 64-bit prime
pub const FNV_PRIME: u64 = 1_099_511_628_211;

/// Hash a string with FNV-1a 64
///
/// XOR each byte into the state, then multiply by [`FNV_PRIME`], left to right.
///
/// # Examples
///
/// ```
/// use shardbench_core::{fnv1a64, FNV_OFFSET_BASIS};
///
/// assert_eq!(fnv1a64(""), FNV_OFFSET_BASIS);
/// assert_eq!(fnv1a64("a"), 0xaf63_dc4c_8601_ec8c);
/// ```
#[inline]
pub fn fnv1a64(s: &str) -> u64 {
    fnv1a64_bytes(s.as_bytes())
}

/// Hash raw bytes with FNV-1a 64
#[inline]
pub fn fnv1a64_bytes(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}
