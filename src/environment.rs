//! Best-effort facts about the machine and toolchain a run executed on.
//!
//! None of these may fail a run: anything that cannot be determined is
//! reported as `"unknown"` or left out.

use std::process::Command;

const UNKNOWN: &str = "unknown";

/// Logical CPUs available to the process
pub(crate) fn cpu_cores() -> usize {
    num_cpus::get()
}

/// Host name as reported by the OS, if it is valid UTF-8
pub(crate) fn hostname() -> Option<String> {
    hostname::get().ok().and_then(|h| h.into_string().ok())
}

/// `rustc --version`
pub(crate) fn rustc_version() -> String {
    command_output("rustc", &["--version"])
}

/// Short hash of the checked-out commit
pub(crate) fn git_commit() -> String {
    command_output("git", &["rev-parse", "--short=12", "HEAD"])
}

fn command_output(program: &str, args: &[&str]) -> String {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| {
            tracing::debug!(program, "could not query, reporting unknown");
            UNKNOWN.to_string()
        })
}

/// Resident set size of this process in bytes
#[cfg(target_os = "linux")]
pub(crate) fn rss_bytes() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    parse_vm_rss(&status)
}

/// Resident set size of this process in bytes
#[cfg(not(target_os = "linux"))]
pub(crate) fn rss_bytes() -> Option<u64> {
    None
}

/// Extract `VmRSS` (reported in kB) from `/proc/<pid>/status` text
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_vm_rss(status: &str) -> Option<u64> {
    let line = status.lines().find(|l| l.starts_with("VmRSS:"))?;
    let kb: u64 = line
        .trim_start_matches("VmRSS:")
        .split_whitespace()
        .next()?
        .parse()
        .ok()?;
    Some(kb * 1024)
}
