//! Convenient imports for shardbench.
//!
//! ```ignore
//! use shardbench::prelude::*;
//!
//! let report = Benchmark::builder()
//!     .config(BenchConfig::new().threads(4).shards(64))
//!     .dataset_file("data/initial.tsv")?
//!     .trace_file("data/ops.txt")?
//!     .build()?
//!     .run()?;
//! ```

// Main entry point
pub use crate::benchmark::{Benchmark, BenchmarkBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Reporting
pub use crate::report::{HostMeta, Metrics, ReportConfig, RunReport};

// Core types
pub use shardbench_core::{BenchConfig, Entry, KvStore, Op};

// Store and engine
pub use shardbench_engine::{Histogram, RunSummary};
pub use shardbench_storage::ShardedStore;

// Workload
pub use shardbench_workload::{KeyDistribution, TraceStats, WorkloadSpec};
