//! Benchmark entry point.
//!
//! [`Benchmark`] ties the pieces together: it validates the configuration,
//! loads the dataset into a [`ShardedStore`], hands the trace to the
//! [`Driver`] and turns the driver's summary into a [`RunReport`].
//!
//! Configuration errors surface from [`BenchmarkBuilder::build`], before
//! the store is populated or any worker is launched.

use crate::error::Result;
use crate::report::{HostMeta, Metrics, ReportConfig, RunReport};
use shardbench_core::{BenchConfig, Entry, Op};
use shardbench_engine::Driver;
use shardbench_storage::ShardedStore;
use shardbench_workload::{load_dataset, load_trace, TraceStats};
use std::path::Path;
use std::sync::Arc;

/// A prepared benchmark run.
///
/// # Example
///
/// ```ignore
/// use shardbench::prelude::*;
///
/// let bench = Benchmark::builder()
///     .config(BenchConfig::new().threads(4).shards(8))
///     .dataset(entries)
///     .ops(ops)
///     .build()?;
/// let report = bench.run()?;
/// ```
#[derive(Debug)]
pub struct Benchmark {
    driver: Driver<ShardedStore>,
    store: Arc<ShardedStore>,
    n_initial: usize,
    ops_file: String,
    stats: TraceStats,
}

impl Benchmark {
    /// Create a builder for a run.
    pub fn builder() -> BenchmarkBuilder {
        BenchmarkBuilder::new()
    }

    /// The store the run mutates.
    pub fn store(&self) -> &Arc<ShardedStore> {
        &self.store
    }

    /// Statistics of the trace that will be replayed.
    pub fn trace_stats(&self) -> &TraceStats {
        &self.stats
    }

    /// Number of entries in the store after loading the dataset.
    pub fn n_initial(&self) -> usize {
        self.n_initial
    }

    /// Execute warmup and measurement and build the report.
    pub fn run(&self) -> Result<RunReport> {
        let summary = self.driver.run()?;
        let config = ReportConfig::new(
            self.driver.config(),
            self.n_initial,
            self.ops_file.clone(),
            self.stats.read_pct,
            self.stats.dist.to_string(),
        );
        Ok(RunReport {
            meta: HostMeta::collect(),
            config,
            metrics: Metrics::from_summary(&summary, Metrics::current_rss()),
        })
    }
}

/// Builder for [`Benchmark`].
#[derive(Debug, Default)]
pub struct BenchmarkBuilder {
    config: BenchConfig,
    dataset: Vec<Entry>,
    ops: Vec<Op>,
    ops_file: Option<String>,
}

impl BenchmarkBuilder {
    /// Create a builder with default configuration and no workload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the run configuration.
    pub fn config(mut self, config: BenchConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an in-memory dataset.
    pub fn dataset(mut self, dataset: Vec<Entry>) -> Self {
        self.dataset = dataset;
        self
    }

    /// Use an in-memory trace.
    pub fn ops(mut self, ops: Vec<Op>) -> Self {
        self.ops = ops;
        self
    }

    /// Load the dataset from a `key<TAB>value` file.
    pub fn dataset_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        self.dataset = load_dataset(path)?;
        Ok(self)
    }

    /// Load the trace from a `G key` / `S key value` file.
    pub fn trace_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        self.ops = load_trace(path)?;
        self.ops_file = Some(path.display().to_string());
        Ok(self)
    }

    /// Validate the configuration, populate the store and prepare workers.
    pub fn build(self) -> Result<Benchmark> {
        self.config.validate(self.ops.len())?;

        let store = Arc::new(ShardedStore::from_entries(self.config.shards, self.dataset)?);
        let n_initial = store.total_entries();
        let stats = TraceStats::from_ops(&self.ops);
        tracing::info!(
            n_initial,
            ops = stats.ops,
            read_pct = stats.read_pct,
            dist = %stats.dist,
            "benchmark prepared"
        );

        let ops: Arc<[Op]> = self.ops.into();
        let driver = Driver::new(Arc::clone(&store), ops, self.config)?;
        Ok(Benchmark {
            driver,
            store,
            n_initial,
            ops_file: self.ops_file.unwrap_or_else(|| "<memory>".to_string()),
            stats,
        })
    }
}
