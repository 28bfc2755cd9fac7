//! Benchmark driver
//!
//! Partitions the trace, launches one thread per worker, waits for all of
//! them, then merges their histograms and derives throughput and latency
//! percentiles.
//!
//! Configuration is validated in [`Driver::new`]; a driver that was built
//! successfully always runs to completion. There is no early abort: both
//! phases run to their wall-clock deadlines.

use crate::histogram::Histogram;
use crate::partition::partition;
use crate::worker::{Worker, WorkerReport};
use shardbench_core::{BenchConfig, Error, KvStore, Op, Result};
use std::io;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Aggregate result of a run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Measured operations across all workers
    pub ops_total: u64,
    /// `ops_total / duration_s`
    pub ops_per_sec: f64,
    /// Median latency, µs
    pub latency_us_p50: u64,
    /// 95th percentile latency, µs
    pub latency_us_p95: u64,
    /// 99th percentile latency, µs
    pub latency_us_p99: u64,
    /// Measured operations per worker, by worker index
    pub per_worker_ops: Vec<u64>,
    /// Merged latency histogram
    pub histogram: Histogram,
}

/// Runs the warmup/measurement protocol against a store
pub struct Driver<S: KvStore + 'static> {
    store: Arc<S>,
    ops: Arc<[Op]>,
    config: BenchConfig,
    slices: Vec<Range<usize>>,
}

impl<S: KvStore + 'static> std::fmt::Debug for Driver<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("ops", &self.ops.len())
            .field("config", &self.config)
            .field("slices", &self.slices)
            .finish()
    }
}

impl<S: KvStore + 'static> Driver<S> {
    /// Validate `config` against the trace and prepare the worker slices
    ///
    /// Fails with [`Error::InvalidConfig`] on zero workers, zero shards,
    /// more workers than operations, unusable durations, or a shard count
    /// that differs from the store's. Nothing is started on failure.
    pub fn new(store: Arc<S>, ops: Arc<[Op]>, config: BenchConfig) -> Result<Self> {
        config.validate(ops.len())?;
        if config.shards != store.shard_count() {
            return Err(Error::config(format!(
                "config has {} shards but the store has {}",
                config.shards,
                store.shard_count()
            )));
        }
        let slices = partition(ops.len(), config.threads)?;
        tracing::debug!(
            threads = config.threads,
            ops = ops.len(),
            chunk = slices[0].len(),
            last = slices[slices.len() - 1].len(),
            "partitioned trace"
        );
        Ok(Self {
            store,
            ops,
            config,
            slices,
        })
    }

    /// Slices assigned to each worker
    pub fn slices(&self) -> &[Range<usize>] {
        &self.slices
    }

    /// Run configuration
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Launch every worker, wait for all of them and aggregate
    ///
    /// If a worker thread cannot be spawned, the workers already started
    /// are joined before the error is returned.
    pub fn run(&self) -> Result<RunSummary> {
        let warmup = self.config.warmup();
        let measure = self.config.measure();
        let counter = Arc::new(AtomicU64::new(0));

        // Build every worker before spawning so a bad slice starts nothing
        let workers = self
            .slices
            .iter()
            .enumerate()
            .map(|(id, slice)| {
                Worker::new(id, Arc::clone(&self.store), Arc::clone(&self.ops), slice.clone())
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(
            threads = self.config.threads,
            shards = self.config.shards,
            ops = self.ops.len(),
            warmup_s = self.config.warmup_s,
            duration_s = self.config.duration_s,
            "starting run"
        );

        let handles = spawn_all(workers, |id, worker| {
            let counter = Arc::clone(&counter);
            thread::Builder::new()
                .name(format!("bench-worker-{}", id))
                .spawn(move || worker.run(warmup, measure, &counter))
        })?;

        let mut reports: Vec<WorkerReport> = Vec::with_capacity(handles.len());
        let mut failed = None;
        for (id, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(report) => reports.push(report),
                Err(_) => {
                    tracing::error!(worker = id, "worker thread panicked");
                    failed.get_or_insert(id);
                }
            }
        }
        if let Some(worker) = failed {
            return Err(Error::WorkerPanicked { worker });
        }

        Ok(self.summarize(&reports, counter.load(Ordering::Relaxed)))
    }

    fn summarize(&self, reports: &[WorkerReport], ops_total: u64) -> RunSummary {
        let histogram = Histogram::merged(reports.iter().map(|r| &r.histogram));
        let ops_per_sec = ops_total as f64 / self.config.duration_s;

        let summary = RunSummary {
            ops_total,
            ops_per_sec,
            latency_us_p50: histogram.percentile(50.0),
            latency_us_p95: histogram.percentile(95.0),
            latency_us_p99: histogram.percentile(99.0),
            per_worker_ops: reports.iter().map(|r| r.measured_ops).collect(),
            histogram,
        };
        tracing::info!(
            ops_total = summary.ops_total,
            ops_per_sec = summary.ops_per_sec,
            p50_us = summary.latency_us_p50,
            p95_us = summary.latency_us_p95,
            p99_us = summary.latency_us_p99,
            "run finished"
        );
        summary
    }
}

/// Spawn one thread per job; on the first failure join every thread
/// already started and return the spawn error
fn spawn_all<J, T>(
    jobs: Vec<J>,
    mut spawn: impl FnMut(usize, J) -> io::Result<JoinHandle<T>>,
) -> io::Result<Vec<JoinHandle<T>>> {
    let mut handles = Vec::with_capacity(jobs.len());
    for (id, job) in jobs.into_iter().enumerate() {
        match spawn(id, job) {
            Ok(handle) => handles.push(handle),
            Err(e) => {
                tracing::error!(worker = id, error = %e, "spawn failed, joining started workers");
                for handle in handles {
                    let _ = handle.join();
                }
                return Err(e);
            }
        }
    }
    Ok(handles)
}
