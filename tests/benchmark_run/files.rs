//! Workload and report files on disk.

use crate::{mixed_trace, small_dataset};
use shardbench::prelude::*;
use shardbench::shardbench_workload::{generate, write_dataset, write_trace};
use shardbench::CSV_HEADER;
use std::fs::{self, File};
use tempfile::TempDir;

fn write_workload(dir: &TempDir, dataset: &[Entry], ops: &[Op]) -> (String, String) {
    let initial = dir.path().join("initial.tsv");
    let trace = dir.path().join("ops.txt");
    write_dataset(File::create(&initial).unwrap(), dataset).unwrap();
    write_trace(File::create(&trace).unwrap(), ops).unwrap();
    (
        initial.to_string_lossy().to_string(),
        trace.to_string_lossy().to_string(),
    )
}

#[test]
fn test_run_from_files_and_write_reports() {
    let dir = TempDir::new().unwrap();
    let (initial, trace) = write_workload(&dir, &small_dataset(10), &mixed_trace(40, 10, 10));

    let report = Benchmark::builder()
        .config(BenchConfig::new().threads(2).shards(4).warmup_s(0.1).duration_s(0.2))
        .dataset_file(&initial)
        .unwrap()
        .trace_file(&trace)
        .unwrap()
        .build()
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(report.config.ops_file, trace);
    assert_eq!(report.config.read_pct, 90);

    let json_path = dir.path().join("results.json");
    report.write_json(&json_path).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["config"]["threads"], 2);
    assert_eq!(json["config"]["language"], "rust");
    assert!(json["metrics"]["ops_total"].as_u64().unwrap() > 0);

    let csv_path = dir.path().join("results").join("results.csv");
    report.append_csv(&csv_path).unwrap();
    report.append_csv(&csv_path).unwrap();
    let csv = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], CSV_HEADER);
}

#[test]
fn test_generated_workload_runs() {
    let spec = WorkloadSpec {
        n_initial: 50,
        n_ops: 200,
        read_pct: 80,
        dist: KeyDistribution::Hot,
        seed: 7,
    };
    let workload = generate(&spec).unwrap();
    let dir = TempDir::new().unwrap();
    let (initial, trace) = write_workload(&dir, &workload.dataset, &workload.ops);

    let bench = Benchmark::builder()
        .config(BenchConfig::new().threads(3).shards(16).warmup_s(0.05).duration_s(0.1))
        .dataset_file(initial)
        .unwrap()
        .trace_file(trace)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(bench.n_initial(), 50);
    assert_eq!(bench.trace_stats().ops, 200);
    assert!(bench.run().unwrap().metrics.ops_total > 0);
}

#[test]
fn test_malformed_trace_reports_line() {
    let dir = TempDir::new().unwrap();
    let trace = dir.path().join("ops.txt");
    fs::write(&trace, "G a\nX b\n").unwrap();

    let err = Benchmark::builder().trace_file(&trace).unwrap_err();
    assert!(matches!(err, Error::Parse { line: 2, .. }), "{:?}", err);
}

#[test]
fn test_missing_dataset_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Benchmark::builder()
        .dataset_file(dir.path().join("absent.tsv"))
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)), "{:?}", err);
}
