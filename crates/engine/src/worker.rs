//! Benchmark worker
//!
//! A worker replays its slice of the trace against the shared store in two
//! wall-clock boxed phases:
//!
//! ```text
//! Idle -> Warmup -> Measuring -> Done
//! ```
//!
//! Warmup operations mutate the store but are not timed. During measurement
//! every operation is timed individually and recorded into the worker's own
//! histogram. Both phases wrap around to the start of the slice when it is
//! exhausted, and check their deadline once per operation.

use crate::histogram::Histogram;
use shardbench_core::{Error, KvStore, Op, Result};
use std::hint::black_box;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Lifecycle of a worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerPhase {
    /// Created, not started
    Idle,
    /// Replaying without timing
    Warmup,
    /// Replaying with per-operation timing
    Measuring,
    /// Finished; counts published
    Done,
}

/// What a worker hands back to the driver
#[derive(Debug)]
pub struct WorkerReport {
    /// Worker index
    pub id: usize,
    /// Operations performed during warmup
    pub warmup_ops: u64,
    /// Operations performed and timed during measurement
    pub measured_ops: u64,
    /// Latency of every measured operation
    pub histogram: Histogram,
}

/// Replays one slice of a trace against a store
pub struct Worker<S: KvStore> {
    id: usize,
    store: Arc<S>,
    ops: Arc<[Op]>,
    slice: Range<usize>,
    phase: WorkerPhase,
}

impl<S: KvStore> Worker<S> {
    /// Create a worker over `ops[slice]`
    ///
    /// An empty or out-of-bounds slice is a configuration error: the replay
    /// loop would have nothing to run.
    pub fn new(id: usize, store: Arc<S>, ops: Arc<[Op]>, slice: Range<usize>) -> Result<Self> {
        if slice.is_empty() {
            return Err(Error::config(format!("worker {} has an empty slice", id)));
        }
        if slice.end > ops.len() {
            return Err(Error::config(format!(
                "worker {} slice {:?} exceeds trace of {} operations",
                id,
                slice,
                ops.len()
            )));
        }
        Ok(Self {
            id,
            store,
            ops,
            slice,
            phase: WorkerPhase::Idle,
        })
    }

    /// Current phase
    pub fn phase(&self) -> WorkerPhase {
        self.phase
    }

    /// Run warmup then measurement, publish the count, return the report
    ///
    /// `ops_counter` is bumped once, by the number of measured operations,
    /// when the measurement phase ends.
    pub fn run(mut self, warmup: Duration, measure: Duration, ops_counter: &AtomicU64) -> WorkerReport {
        self.enter(WorkerPhase::Warmup);
        let warmup_ops = self.warmup(warmup);

        self.enter(WorkerPhase::Measuring);
        let mut histogram = Histogram::new();
        let measured_ops = self.measure(measure, &mut histogram);

        ops_counter.fetch_add(measured_ops, Ordering::Relaxed);
        self.enter(WorkerPhase::Done);
        tracing::debug!(
            worker = self.id,
            warmup_ops,
            measured_ops,
            p50_us = histogram.percentile(50.0),
            "worker finished"
        );

        WorkerReport {
            id: self.id,
            warmup_ops,
            measured_ops,
            histogram,
        }
    }

    fn enter(&mut self, next: WorkerPhase) {
        debug_assert!(
            matches!(
                (self.phase, next),
                (WorkerPhase::Idle, WorkerPhase::Warmup)
                    | (WorkerPhase::Warmup, WorkerPhase::Measuring)
                    | (WorkerPhase::Measuring, WorkerPhase::Done)
            ),
            "illegal transition {:?} -> {:?}",
            self.phase,
            next
        );
        tracing::debug!(worker = self.id, from = ?self.phase, to = ?next, "phase change");
        self.phase = next;
    }

    fn warmup(&self, length: Duration) -> u64 {
        let deadline = Instant::now() + length;
        let mut idx = self.slice.start;
        let mut done = 0u64;
        while Instant::now() < deadline {
            execute(&*self.store, &self.ops[idx]);
            done += 1;
            idx = self.next(idx);
        }
        done
    }

    fn measure(&self, length: Duration, histogram: &mut Histogram) -> u64 {
        let mut now = Instant::now();
        let deadline = now + length;
        let mut idx = self.slice.start;
        let mut done = 0u64;
        while now < deadline {
            let before = Instant::now();
            execute(&*self.store, &self.ops[idx]);
            let after = Instant::now();
            histogram.record_duration(after - before);
            done += 1;
            idx = self.next(idx);
            now = after;
        }
        done
    }

    #[inline]
    fn next(&self, idx: usize) -> usize {
        let idx = idx + 1;
        if idx >= self.slice.end {
            self.slice.start
        } else {
            idx
        }
    }
}

#[inline]
fn execute<S: KvStore + ?Sized>(store: &S, op: &Op) {
    match op {
        Op::Get(key) => {
            black_box(store.get(key));
        }
        Op::Set(key, value) => store.set(key.clone(), value.clone()),
    }
}
