//! Measurement engine for shardbench
//!
//! This crate implements the timed execution protocol:
//! - Histogram: fixed-memory, two-resolution latency histogram
//! - partition: static split of the trace into per-worker slices
//! - Worker: warmup then measurement replay of one slice
//! - Driver: launches workers, merges their histograms, aggregates results

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod driver;
pub mod histogram;
pub mod partition;
pub mod worker;

pub use driver::{Driver, RunSummary};
pub use histogram::Histogram;
pub use partition::partition;
pub use worker::{Worker, WorkerPhase, WorkerReport};
