//! Trace statistics
//!
//! The read share and key distribution reported for a run are derived from
//! the trace that was actually replayed, not taken from how the trace was
//! supposedly generated.

use crate::generator::KeyDistribution;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use shardbench_core::Op;

/// Share of distinct read keys treated as the hot set
const HOT_SET_FRACTION: usize = 5;
/// Share of reads the hot set must absorb for the trace to count as skewed
const HOT_READ_SHARE: f64 = 0.6;
/// Below this many distinct read keys skew is not classified
const MIN_KEYS_FOR_SKEW: usize = 5;

/// Summary of a trace's operation mix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceStats {
    /// Number of operations
    pub ops: usize,
    /// Number of reads
    pub reads: usize,
    /// Number of writes
    pub writes: usize,
    /// Distinct keys touched by any operation
    pub distinct_keys: usize,
    /// Reads as a whole percentage, rounded
    pub read_pct: u8,
    /// Inferred read key distribution
    pub dist: KeyDistribution,
}

impl TraceStats {
    /// Compute statistics over a trace
    ///
    /// The distribution is [`KeyDistribution::Hot`] when the most-read fifth
    /// of the distinct read keys receives at least 60% of all reads.
    pub fn from_ops(ops: &[Op]) -> Self {
        let mut read_counts: FxHashMap<&str, usize> = FxHashMap::default();
        let mut keys: FxHashSet<&str> = FxHashSet::default();
        let mut reads = 0;

        for op in ops {
            keys.insert(op.key());
            if let Op::Get(key) = op {
                reads += 1;
                *read_counts.entry(key.as_str()).or_insert(0) += 1;
            }
        }

        let read_pct = if ops.is_empty() {
            0
        } else {
            ((reads as f64 * 100.0 / ops.len() as f64).round()) as u8
        };

        Self {
            ops: ops.len(),
            reads,
            writes: ops.len() - reads,
            distinct_keys: keys.len(),
            read_pct,
            dist: classify(read_counts.into_values().collect(), reads),
        }
    }
}

fn classify(mut counts: Vec<usize>, reads: usize) -> KeyDistribution {
    if counts.len() < MIN_KEYS_FOR_SKEW || reads == 0 {
        return KeyDistribution::Uniform;
    }
    counts.sort_unstable_by(|a, b| b.cmp(a));
    let hot_keys = (counts.len() / HOT_SET_FRACTION).max(1);
    let hot_reads: usize = counts[..hot_keys].iter().sum();
    if hot_reads as f64 / reads as f64 >= HOT_READ_SHARE {
        KeyDistribution::Hot
    } else {
        KeyDistribution::Uniform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate, WorkloadSpec};

    fn get(k: &str) -> Op {
        Op::Get(k.to_string())
    }

    #[test]
    fn test_empty_trace() {
        let s = TraceStats::from_ops(&[]);
        assert_eq!(s.ops, 0);
        assert_eq!(s.read_pct, 0);
        assert_eq!(s.dist, KeyDistribution::Uniform);
    }

    #[test]
    fn test_counts() {
        let ops = vec![
            get("a"),
            get("b"),
            get("a"),
            Op::Set("c".to_string(), "v".to_string()),
        ];
        let s = TraceStats::from_ops(&ops);
        assert_eq!(s.reads, 3);
        assert_eq!(s.writes, 1);
        assert_eq!(s.distinct_keys, 3);
        assert_eq!(s.read_pct, 75);
    }

    #[test]
    fn test_read_pct_rounds() {
        // 2 of 3 is 66.7%
        let ops = vec![get("a"), get("b"), Op::Set("c".to_string(), "v".to_string())];
        assert_eq!(TraceStats::from_ops(&ops).read_pct, 67);
    }

    #[test]
    fn test_generated_workloads_are_recognised() {
        let base = WorkloadSpec {
            n_initial: 500,
            n_ops: 20_000,
            read_pct: 95,
            seed: 1,
            ..WorkloadSpec::default()
        };
        let uniform = generate(&base).unwrap();
        let s = TraceStats::from_ops(&uniform.ops);
        assert_eq!(s.read_pct, 95);
        assert_eq!(s.dist, KeyDistribution::Uniform);

        let hot = generate(&WorkloadSpec {
            dist: KeyDistribution::Hot,
            ..base
        })
        .unwrap();
        assert_eq!(TraceStats::from_ops(&hot.ops).dist, KeyDistribution::Hot);
    }
}
