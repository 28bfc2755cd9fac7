//! Run configuration
//!
//! [`BenchConfig`] holds the parameters of one run. Sources are layered by
//! the caller: defaults, then an optional TOML file, then command-line flags.
//!
//! ```ignore
//! use shardbench_core::BenchConfig;
//!
//! let config = BenchConfig::new().threads(4).shards(64).duration_s(5.0);
//! config.validate(ops.len())?;
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default number of worker threads
pub const DEFAULT_THREADS: usize = 1;
/// Default number of shards
pub const DEFAULT_SHARDS: usize = 128;
/// Default warmup length in seconds
pub const DEFAULT_WARMUP_S: f64 = 2.0;
/// Default measurement length in seconds
pub const DEFAULT_DURATION_S: f64 = 10.0;
/// Longest accepted warmup or measurement phase, in seconds (one year)
///
/// Keeps every phase deadline representable as an `Instant`.
pub const MAX_PHASE_S: f64 = 365.0 * 24.0 * 3600.0;

/// Parameters of a benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Number of concurrent workers
    pub threads: usize,
    /// Number of store partitions
    pub shards: usize,
    /// Warmup phase length in seconds
    pub warmup_s: f64,
    /// Measurement phase length in seconds
    pub duration_s: f64,
    /// Seed the workload was generated from, reported only
    pub seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            shards: DEFAULT_SHARDS,
            warmup_s: DEFAULT_WARMUP_S,
            duration_s: DEFAULT_DURATION_S,
            seed: 0,
        }
    }
}

impl BenchConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worker count
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set the shard count
    pub fn shards(mut self, shards: usize) -> Self {
        self.shards = shards;
        self
    }

    /// Set the warmup length in seconds
    pub fn warmup_s(mut self, secs: f64) -> Self {
        self.warmup_s = secs;
        self
    }

    /// Set the measurement length in seconds
    pub fn duration_s(mut self, secs: f64) -> Self {
        self.duration_s = secs;
        self
    }

    /// Set the reported seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse a config from TOML text
    ///
    /// Missing fields take their defaults; unknown fields are rejected.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::config(format!("bad config file: {}", e)))
    }

    /// Read and parse a TOML config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Warmup length as a [`Duration`]
    ///
    /// Only meaningful after [`validate`](Self::validate) succeeded.
    pub fn warmup(&self) -> Duration {
        Duration::try_from_secs_f64(self.warmup_s).unwrap_or_default()
    }

    /// Measurement length as a [`Duration`]
    ///
    /// Only meaningful after [`validate`](Self::validate) succeeded.
    pub fn measure(&self) -> Duration {
        Duration::try_from_secs_f64(self.duration_s).unwrap_or_default()
    }

    /// Check the config against a trace of `op_count` operations
    ///
    /// Rejects zero workers, zero shards, more workers than operations, and
    /// durations that are negative, non-finite, longer than [`MAX_PHASE_S`],
    /// or (for measurement) zero.
    pub fn validate(&self, op_count: usize) -> Result<()> {
        if self.threads == 0 {
            return Err(Error::config("thread count must be at least 1"));
        }
        if self.shards == 0 {
            return Err(Error::config("shard count must be at least 1"));
        }
        if self.threads > op_count {
            return Err(Error::config(format!(
                "{} workers but only {} operations; every worker needs a non-empty slice",
                self.threads, op_count
            )));
        }
        if !(0.0..=MAX_PHASE_S).contains(&self.warmup_s) {
            return Err(Error::config(format!(
                "warmup_s must be between 0 and {} seconds, got {}",
                MAX_PHASE_S, self.warmup_s
            )));
        }
        if !(self.duration_s <= MAX_PHASE_S && !self.measure().is_zero()) {
            return Err(Error::config(format!(
                "duration_s must be positive and at most {} seconds, got {}",
                MAX_PHASE_S, self.duration_s
            )));
        }
        Ok(())
    }
}
