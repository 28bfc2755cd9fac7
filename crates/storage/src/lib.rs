//! Storage layer for shardbench
//!
//! This crate implements the store the benchmark drives:
//! - ShardedStore: fixed array of RwLock-guarded FxHashMap partitions
//! - Shard placement by FNV-1a, stable for the store's lifetime

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod sharded;

pub use sharded::{Shard, ShardedStore};
