//! shardbench CLI — run the key-value store benchmark or generate workloads.
//!
//! - `shardbench run [flags]`: load, warm up, measure, write the report
//! - `shardbench generate [flags]`: write a deterministic dataset and trace

mod commands;
mod parse;

use std::fs::{self, File};
use std::process;

use shardbench::shardbench_workload::{generate, write_dataset, write_trace};
use shardbench::Benchmark;
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use parse::{matches_to_action, CliAction, GenerateArgs, RunArgs};

fn main() {
    let matches = build_cli().get_matches();
    init_logging(matches.get_one::<String>("log-level").map(String::as_str));

    let result = match matches_to_action(&matches) {
        Ok(CliAction::Run(args)) => run(args),
        Ok(CliAction::Generate(args)) => run_generate(args),
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: RunArgs) -> Result<(), String> {
    let bench = Benchmark::builder()
        .config(args.config)
        .dataset_file(&args.initial)
        .map_err(|e| format!("{}: {}", args.initial.display(), e))?
        .trace_file(&args.ops)
        .map_err(|e| format!("{}: {}", args.ops.display(), e))?
        .build()
        .map_err(|e| e.to_string())?;

    let report = bench.run().map_err(|e| e.to_string())?;
    let m = &report.metrics;
    println!(
        "ops_total={} ops_per_sec={:.2} p50_us={:.0} p95_us={:.0} p99_us={:.0}",
        m.ops_total, m.ops_per_sec, m.latency_us_p50, m.latency_us_p95, m.latency_us_p99
    );

    report.write_json(&args.out).map_err(|e| e.to_string())?;
    if let Some(csv) = &args.csv {
        report.append_csv(csv).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let workload = generate(&args.spec).map_err(|e| e.to_string())?;
    fs::create_dir_all(&args.out_dir).map_err(|e| e.to_string())?;

    let initial = args.out_dir.join("initial.tsv");
    let ops = args.out_dir.join("ops.txt");
    let write = || -> shardbench::shardbench_core::Result<()> {
        write_dataset(File::create(&initial)?, &workload.dataset)?;
        write_trace(File::create(&ops)?, &workload.ops)?;
        Ok(())
    };
    write().map_err(|e| e.to_string())?;
    tracing::info!(
        entries = workload.dataset.len(),
        ops = workload.ops.len(),
        dir = %args.out_dir.display(),
        "workload written"
    );

    if !args.quiet {
        println!("{}", initial.display());
        println!("{}", ops.display());
    }
    Ok(())
}
