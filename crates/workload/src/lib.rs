//! Workload collaborators for shardbench
//!
//! Everything that happens before and around a run but never inside it:
//! - loader: dataset (`key<TAB>value`) and trace (`G key` / `S key value`) files
//! - generator: deterministic, seeded dataset and trace generation
//! - stats: read/write mix and key distribution recomputed from a trace

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod generator;
pub mod loader;
pub mod stats;

pub use generator::{base62_encode, generate, KeyDistribution, Workload, WorkloadSpec};
pub use loader::{
    load_dataset, load_trace, parse_dataset, parse_trace, write_dataset, write_trace,
};
pub use stats::TraceStats;
