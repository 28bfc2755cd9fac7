//! Clap command tree for the `shardbench` binary.

use clap::{value_parser, Arg, ArgAction, Command};

/// Build the top-level command.
pub fn build_cli() -> Command {
    Command::new("shardbench")
        .about("Throughput and latency benchmark for a sharded in-memory key-value store")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("Log filter (overrides RUST_LOG), e.g. info or shardbench_engine=debug"),
        )
        .subcommand(run_command())
        .subcommand(generate_command())
}

fn run_command() -> Command {
    Command::new("run")
        .about("Load a dataset, replay a trace and report throughput and latency")
        .arg(
            Arg::new("initial")
                .long("initial")
                .default_value("data/initial.tsv")
                .help("Dataset file, one key<TAB>value per line"),
        )
        .arg(
            Arg::new("ops")
                .long("ops")
                .default_value("data/ops.txt")
                .help("Trace file, one 'G key' or 'S key value' per line"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML file with threads, shards, warmup_s, duration_s, seed"),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .value_parser(value_parser!(usize))
                .help("Worker threads [default: 1]"),
        )
        .arg(
            Arg::new("shards")
                .long("shards")
                .value_parser(value_parser!(usize))
                .help("Store shards [default: 128]"),
        )
        .arg(
            Arg::new("warmup_s")
                .long("warmup_s")
                .value_parser(value_parser!(f64))
                .help("Warmup seconds [default: 2.0]"),
        )
        .arg(
            Arg::new("duration_s")
                .long("duration_s")
                .value_parser(value_parser!(f64))
                .help("Measurement seconds [default: 10.0]"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_parser(value_parser!(u64))
                .help("Seed the workload was generated with, recorded in the report"),
        )
        .arg(
            Arg::new("out")
                .long("out")
                .default_value("results.json")
                .help("JSON report path"),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .help("Also append a row to this CSV file"),
        )
}

fn generate_command() -> Command {
    Command::new("generate")
        .about("Write a deterministic dataset and trace")
        .arg(
            Arg::new("n_initial")
                .long("n_initial")
                .value_parser(value_parser!(usize))
                .default_value("100000"),
        )
        .arg(
            Arg::new("n_ops")
                .long("n_ops")
                .value_parser(value_parser!(usize))
                .default_value("5000000"),
        )
        .arg(
            Arg::new("read_pct")
                .long("read_pct")
                .value_parser(value_parser!(u8).range(0..=100))
                .default_value("95"),
        )
        .arg(
            Arg::new("dist")
                .long("dist")
                .value_parser(["uniform", "hot"])
                .default_value("uniform"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_parser(value_parser!(u64))
                .default_value("12345"),
        )
        .arg(
            Arg::new("out_dir")
                .long("out_dir")
                .default_value("data"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Do not print file paths"),
        )
}
