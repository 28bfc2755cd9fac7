//! Full runs through `Benchmark`.

use crate::{mixed_trace, small_dataset};
use shardbench::prelude::*;

fn quick_config(threads: usize, shards: usize) -> BenchConfig {
    BenchConfig::new()
        .threads(threads)
        .shards(shards)
        .warmup_s(0.1)
        .duration_s(0.3)
}

#[test]
fn test_small_run_reports_consistent_metrics() {
    // 10 entries, 100 ops (95 gets, 5 sets), 4 workers over 8 shards
    let bench = Benchmark::builder()
        .config(BenchConfig::new().threads(4).shards(8).warmup_s(1.0).duration_s(1.0))
        .dataset(small_dataset(10))
        .ops(mixed_trace(100, 10, 20))
        .build()
        .unwrap();

    assert_eq!(bench.n_initial(), 10);
    assert_eq!(bench.trace_stats().reads, 95);
    assert_eq!(bench.trace_stats().writes, 5);

    let report = bench.run().unwrap();
    let m = &report.metrics;
    assert!(m.ops_total > 0);
    assert_eq!(m.ops_per_sec, m.ops_total as f64 / 1.0);
    assert!(m.latency_us_p50 <= m.latency_us_p95);
    assert!(m.latency_us_p95 <= m.latency_us_p99);

    assert_eq!(report.config.threads, 4);
    assert_eq!(report.config.shards, 8);
    assert_eq!(report.config.n_initial, 10);
    assert_eq!(report.config.read_pct, 95);
}

#[test]
fn test_single_worker_run() {
    let report = Benchmark::builder()
        .config(quick_config(1, 1))
        .dataset(small_dataset(4))
        .ops(mixed_trace(16, 4, 0))
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert!(report.metrics.ops_total > 0);
    assert_eq!(report.config.read_pct, 100);
}

#[test]
fn test_writes_are_visible_after_run() {
    let ops = vec![Op::Set("fresh".to_string(), "value".to_string())];
    let bench = Benchmark::builder()
        .config(quick_config(1, 4))
        .dataset(small_dataset(2))
        .ops(ops)
        .build()
        .unwrap();
    bench.run().unwrap();

    assert_eq!(bench.store().get("fresh"), Some("value".to_string()));
    assert_eq!(bench.store().total_entries(), 3);
}

#[test]
fn test_more_workers_than_ops_is_config_error() {
    let err = Benchmark::builder()
        .config(quick_config(8, 4))
        .dataset(small_dataset(2))
        .ops(mixed_trace(4, 2, 0))
        .build()
        .unwrap_err();
    assert!(err.is_config_error());
}

#[test]
fn test_zero_shards_is_config_error() {
    let err = Benchmark::builder()
        .config(quick_config(1, 0))
        .ops(mixed_trace(4, 2, 0))
        .build()
        .unwrap_err();
    assert!(err.is_config_error());
}

#[test]
fn test_empty_trace_is_config_error() {
    let err = Benchmark::builder()
        .config(quick_config(1, 4))
        .build()
        .unwrap_err();
    assert!(err.is_config_error());
}
