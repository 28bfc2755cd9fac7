//! # shardbench
//!
//! Throughput and latency benchmark for a concurrent, lock-partitioned
//! in-memory key-value store.
//!
//! A run loads a dataset into a [`ShardedStore`], replays a pre-built
//! operation trace from N workers for a warmup phase and a measurement
//! phase, and reports total operations, throughput and p50/p95/p99 latency.
//!
//! ## Quick Start
//!
//! ```ignore
//! use shardbench::prelude::*;
//!
//! let report = Benchmark::builder()
//!     .config(BenchConfig::new().threads(4).shards(128).duration_s(10.0))
//!     .dataset_file("data/initial.tsv")?
//!     .trace_file("data/ops.txt")?
//!     .build()?
//!     .run()?;
//!
//! report.write_json("results.json")?;
//! ```
//!
//! ## Crates
//!
//! - [`shardbench_core`] - hash, operation types, config, errors
//! - [`shardbench_storage`] - the sharded store
//! - [`shardbench_engine`] - histogram, workers, driver
//! - [`shardbench_workload`] - file formats, generator, trace statistics

#![warn(missing_docs)]

mod benchmark;
mod environment;
mod error;
mod report;

pub mod prelude;

// Re-export main entry points
pub use benchmark::{Benchmark, BenchmarkBuilder};
pub use error::{Error, Result};
pub use report::{HostMeta, Metrics, ReportConfig, RunReport, CSV_HEADER};

// Re-export member crates
pub use shardbench_core;
pub use shardbench_engine;
pub use shardbench_storage;
pub use shardbench_workload;

pub use shardbench_core::{BenchConfig, Entry, Op};
pub use shardbench_engine::RunSummary;
pub use shardbench_storage::ShardedStore;
