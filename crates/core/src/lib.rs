//! Core types for the shardbench workspace
//!
//! This crate defines the pieces every other crate agrees on:
//! - [`fnv1a64`]: the shard-placement hash, bit-stable across implementations
//! - [`Entry`] and [`Op`]: dataset rows and trace operations
//! - [`KvStore`]: the seam between the execution driver and a store
//! - [`BenchConfig`]: run parameters and their validation
//! - [`Error`]: the error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod hash;
pub mod traits;
pub mod types;

pub use config::BenchConfig;
pub use error::{Error, Result};
pub use hash::{fnv1a64, FNV_OFFSET_BASIS, FNV_PRIME};
pub use traits::KvStore;
pub use types::{Entry, Op};
