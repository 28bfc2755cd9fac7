//! Run report: what a finished run hands to the outside world.
//!
//! A report is serialised as pretty JSON and can also be appended as one
//! row of a CSV file shared across runs.

use crate::environment;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use shardbench_core::BenchConfig;
use shardbench_engine::RunSummary;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Column order of the CSV output.
pub const CSV_HEADER: &str = "timestamp_utc,language,language_version,git_commit,os,arch,cpu_cores,n_initial,read_pct,dist,threads,shards,seed,warmup_s,duration_s,ops_total,ops_per_sec,latency_us_p50,latency_us_p95,latency_us_p99,rss_bytes";

/// Full report of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Machine the run executed on
    pub meta: HostMeta,
    /// What was run
    pub config: ReportConfig,
    /// What was measured
    pub metrics: Metrics,
}

/// Host facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostMeta {
    /// RFC 3339 UTC timestamp of report creation
    pub timestamp_utc: String,
    /// Operating system
    pub os: String,
    /// CPU architecture
    pub arch: String,
    /// Logical CPUs
    pub cpu_cores: usize,
    /// Host name, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

impl HostMeta {
    /// Collect facts about the current host.
    pub fn collect() -> Self {
        Self {
            timestamp_utc: chrono::Utc::now().to_rfc3339(),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            cpu_cores: environment::cpu_cores(),
            hostname: environment::hostname(),
        }
    }
}

/// Run parameters and workload description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Implementation language
    pub language: String,
    /// Compiler version
    pub language_version: String,
    /// Source revision
    pub git_commit: String,
    /// Dataset size loaded before the run
    pub n_initial: usize,
    /// Where the trace came from
    pub ops_file: String,
    /// Reads as a percentage of the replayed trace
    pub read_pct: u8,
    /// Key distribution inferred from the replayed trace
    pub dist: String,
    /// Worker count
    pub threads: usize,
    /// Shard count
    pub shards: usize,
    /// Workload seed
    pub seed: u64,
    /// Warmup length, seconds
    pub warmup_s: f64,
    /// Measurement length, seconds
    pub duration_s: f64,
}

impl ReportConfig {
    /// Describe a run of `config` over a workload.
    pub fn new(
        config: &BenchConfig,
        n_initial: usize,
        ops_file: impl Into<String>,
        read_pct: u8,
        dist: impl Into<String>,
    ) -> Self {
        Self {
            language: "rust".to_string(),
            language_version: environment::rustc_version(),
            git_commit: environment::git_commit(),
            n_initial,
            ops_file: ops_file.into(),
            read_pct,
            dist: dist.into(),
            threads: config.threads,
            shards: config.shards,
            seed: config.seed,
            warmup_s: config.warmup_s,
            duration_s: config.duration_s,
        }
    }
}

/// Measured results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Measured operations across all workers
    pub ops_total: u64,
    /// Throughput over the measurement phase
    pub ops_per_sec: f64,
    /// Median latency, µs
    pub latency_us_p50: f64,
    /// 95th percentile latency, µs
    pub latency_us_p95: f64,
    /// 99th percentile latency, µs
    pub latency_us_p99: f64,
    /// Resident memory after the run, when available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rss_bytes: Option<u64>,
}

impl Metrics {
    /// Extract metrics from a driver summary.
    pub fn from_summary(summary: &RunSummary, rss_bytes: Option<u64>) -> Self {
        Self {
            ops_total: summary.ops_total,
            ops_per_sec: summary.ops_per_sec,
            latency_us_p50: summary.latency_us_p50 as f64,
            latency_us_p95: summary.latency_us_p95 as f64,
            latency_us_p99: summary.latency_us_p99 as f64,
            rss_bytes,
        }
    }

    /// Sample the process's resident memory now.
    pub fn current_rss() -> Option<u64> {
        environment::rss_bytes()
    }
}

impl RunReport {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as JSON, replacing any existing file.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        tracing::info!(path = %path.display(), "wrote report");
        Ok(())
    }

    /// One CSV row in [`CSV_HEADER`] order, without the trailing newline.
    pub fn csv_row(&self) -> String {
        let m = &self.meta;
        let c = &self.config;
        let r = &self.metrics;
        let fields = [
            csv_field(&m.timestamp_utc),
            csv_field(&c.language),
            csv_field(&c.language_version),
            csv_field(&c.git_commit),
            csv_field(&m.os),
            csv_field(&m.arch),
            m.cpu_cores.to_string(),
            c.n_initial.to_string(),
            c.read_pct.to_string(),
            csv_field(&c.dist),
            c.threads.to_string(),
            c.shards.to_string(),
            c.seed.to_string(),
            c.warmup_s.to_string(),
            c.duration_s.to_string(),
            r.ops_total.to_string(),
            format!("{:.2}", r.ops_per_sec),
            format!("{:.2}", r.latency_us_p50),
            format!("{:.2}", r.latency_us_p95),
            format!("{:.2}", r.latency_us_p99),
            r.rss_bytes.map(|v| v.to_string()).unwrap_or_default(),
        ];
        fields.join(",")
    }

    /// Append this report to a CSV file, writing the header if the file is
    /// new or empty. Parent directories are created as needed.
    pub fn append_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        if file.metadata()?.len() == 0 {
            writeln!(file, "{}", CSV_HEADER)?;
        }
        writeln!(file, "{}", self.csv_row())?;
        tracing::info!(path = %path.display(), "appended csv row");
        Ok(())
    }
}

/// Quote a CSV field if it contains a delimiter, quote or newline.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
