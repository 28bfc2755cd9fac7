//! ArgMatches → CliAction conversion.
//!
//! Run configuration is layered: [`BenchConfig`] defaults, then the
//! `--config` TOML file if given, then any flag set on the command line.

use clap::ArgMatches;
use shardbench::shardbench_workload::{KeyDistribution, WorkloadSpec};
use shardbench::BenchConfig;
use std::path::PathBuf;

/// The result of parsing the command line.
pub enum CliAction {
    /// Run a benchmark.
    Run(RunArgs),
    /// Generate a workload.
    Generate(GenerateArgs),
}

/// Inputs of `shardbench run`.
pub struct RunArgs {
    pub initial: PathBuf,
    pub ops: PathBuf,
    pub config: BenchConfig,
    pub out: PathBuf,
    pub csv: Option<PathBuf>,
}

/// Inputs of `shardbench generate`.
pub struct GenerateArgs {
    pub spec: WorkloadSpec,
    pub out_dir: PathBuf,
    pub quiet: bool,
}

/// Convert clap ArgMatches into a CliAction.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let (sub_name, sub_matches) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    match sub_name {
        "run" => parse_run(sub_matches).map(CliAction::Run),
        "generate" => parse_generate(sub_matches).map(CliAction::Generate),
        other => Err(format!("Unknown command: {}", other)),
    }
}

fn parse_run(m: &ArgMatches) -> Result<RunArgs, String> {
    let mut config = match m.get_one::<String>("config") {
        Some(path) => BenchConfig::from_file(path).map_err(|e| format!("{}: {}", path, e))?,
        None => BenchConfig::default(),
    };
    if let Some(&threads) = m.get_one::<usize>("threads") {
        config.threads = threads;
    }
    if let Some(&shards) = m.get_one::<usize>("shards") {
        config.shards = shards;
    }
    if let Some(&warmup_s) = m.get_one::<f64>("warmup_s") {
        config.warmup_s = warmup_s;
    }
    if let Some(&duration_s) = m.get_one::<f64>("duration_s") {
        config.duration_s = duration_s;
    }
    if let Some(&seed) = m.get_one::<u64>("seed") {
        config.seed = seed;
    }

    Ok(RunArgs {
        initial: path_arg(m, "initial")?,
        ops: path_arg(m, "ops")?,
        config,
        out: path_arg(m, "out")?,
        csv: m.get_one::<String>("csv").map(PathBuf::from),
    })
}

fn parse_generate(m: &ArgMatches) -> Result<GenerateArgs, String> {
    let dist: KeyDistribution = m
        .get_one::<String>("dist")
        .ok_or("Missing --dist")?
        .parse()
        .map_err(|e: shardbench::shardbench_core::Error| e.to_string())?;

    let spec = WorkloadSpec {
        n_initial: *m.get_one::<usize>("n_initial").ok_or("Missing --n_initial")?,
        n_ops: *m.get_one::<usize>("n_ops").ok_or("Missing --n_ops")?,
        read_pct: *m.get_one::<u8>("read_pct").ok_or("Missing --read_pct")?,
        dist,
        seed: *m.get_one::<u64>("seed").ok_or("Missing --seed")?,
    };

    Ok(GenerateArgs {
        spec,
        out_dir: path_arg(m, "out_dir")?,
        quiet: m.get_flag("quiet"),
    })
}

fn path_arg(m: &ArgMatches, name: &str) -> Result<PathBuf, String> {
    m.get_one::<String>(name)
        .map(PathBuf::from)
        .ok_or_else(|| format!("Missing --{}", name))
}
