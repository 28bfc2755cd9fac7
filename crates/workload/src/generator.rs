//! Deterministic workload generation
//!
//! Produces the initial dataset and the operation trace from a seed. The
//! same [`WorkloadSpec`] always yields byte-identical output, so independent
//! implementations can be benchmarked against the same files.
//!
//! - Keys are 8-character base62 tokens of a counter
//! - Values are printable ASCII strings of 30..=120 characters
//! - Reads pick dataset keys; writes insert fresh keys past the dataset
//! - The trace is shuffled so reads and writes interleave

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use shardbench_core::{Entry, Error, Op, Result};

const BASE62: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const VALUE_CHARS: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Key length of generated keys
pub const KEY_LEN: usize = 8;
/// Shortest generated value
pub const MIN_VALUE_LEN: usize = 30;
/// Longest generated value
pub const MAX_VALUE_LEN: usize = 120;

/// How reads pick their keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyDistribution {
    /// Every dataset key equally likely
    Uniform,
    /// 80% of reads hit the first 20% of keys
    Hot,
}

impl std::fmt::Display for KeyDistribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyDistribution::Uniform => write!(f, "uniform"),
            KeyDistribution::Hot => write!(f, "hot"),
        }
    }
}

impl std::str::FromStr for KeyDistribution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "uniform" => Ok(KeyDistribution::Uniform),
            "hot" => Ok(KeyDistribution::Hot),
            other => Err(Error::config(format!(
                "unknown distribution {:?}, expected uniform or hot",
                other
            ))),
        }
    }
}

/// Parameters of a generated workload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadSpec {
    /// Dataset size
    pub n_initial: usize,
    /// Trace length
    pub n_ops: usize,
    /// Share of reads in the trace, 0..=100
    pub read_pct: u8,
    /// Read key distribution
    pub dist: KeyDistribution,
    /// Seed; the dataset uses `seed`, the trace `seed + 1`
    pub seed: u64,
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        Self {
            n_initial: 100_000,
            n_ops: 5_000_000,
            read_pct: 95,
            dist: KeyDistribution::Uniform,
            seed: 12_345,
        }
    }
}

/// A generated dataset and trace
#[derive(Debug, Clone)]
pub struct Workload {
    /// Initial dataset
    pub dataset: Vec<Entry>,
    /// Operation trace
    pub ops: Vec<Op>,
}

/// Encode `n` as a fixed-length base62 token
///
/// Short encodings are left-padded with `'0'`; long ones keep their leading
/// `length` digits.
///
/// # Examples
///
/// ```
/// use shardbench_workload::base62_encode;
///
/// assert_eq!(base62_encode(0, 8), "00000000");
/// assert_eq!(base62_encode(1, 8), "0000000b");
/// assert_eq!(base62_encode(62, 8), "000000ba");
/// ```
pub fn base62_encode(mut n: u64, length: usize) -> String {
    if n == 0 {
        return "0".repeat(length);
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE62[(n % 62) as usize]);
        n /= 62;
    }
    while digits.len() < length {
        digits.push(b'0');
    }
    digits.reverse();
    digits.truncate(length);
    digits.into_iter().map(char::from).collect()
}

fn random_value(rng: &mut StdRng) -> String {
    let len = rng.gen_range(MIN_VALUE_LEN..=MAX_VALUE_LEN);
    (0..len)
        .map(|_| char::from(VALUE_CHARS[rng.gen_range(0..VALUE_CHARS.len())]))
        .collect()
}

/// Generate a dataset and trace
///
/// Fails if `read_pct` exceeds 100, or if the trace contains reads but the
/// dataset is empty.
pub fn generate(spec: &WorkloadSpec) -> Result<Workload> {
    if spec.read_pct > 100 {
        return Err(Error::config(format!(
            "read_pct must be within 0..=100, got {}",
            spec.read_pct
        )));
    }
    let n_reads = spec.n_ops * spec.read_pct as usize / 100;
    let n_writes = spec.n_ops - n_reads;
    if n_reads > 0 && spec.n_initial == 0 {
        return Err(Error::config("reads need a non-empty dataset"));
    }

    let dataset = generate_dataset(spec.n_initial, spec.seed);

    let mut rng = StdRng::seed_from_u64(spec.seed.wrapping_add(1));
    let keys: Vec<&str> = dataset.iter().map(|e| e.key.as_str()).collect();
    let mut ops = Vec::with_capacity(spec.n_ops);

    match spec.dist {
        KeyDistribution::Uniform => {
            for _ in 0..n_reads {
                ops.push(Op::Get(pick(&mut rng, &keys)));
            }
        }
        KeyDistribution::Hot => {
            let hot_size = (keys.len() / 5).max(1);
            let (hot, cold) = keys.split_at(hot_size.min(keys.len()));
            let cold = if cold.is_empty() { &keys[..] } else { cold };
            let hot_reads = n_reads * 4 / 5;
            for _ in 0..hot_reads {
                ops.push(Op::Get(pick(&mut rng, hot)));
            }
            for _ in hot_reads..n_reads {
                ops.push(Op::Get(pick(&mut rng, cold)));
            }
        }
    }

    for i in 0..n_writes {
        let key = base62_encode((spec.n_initial + i) as u64, KEY_LEN);
        ops.push(Op::Set(key, random_value(&mut rng)));
    }
    ops.shuffle(&mut rng);

    tracing::info!(
        n_initial = dataset.len(),
        n_ops = ops.len(),
        n_reads,
        n_writes,
        dist = %spec.dist,
        seed = spec.seed,
        "generated workload"
    );
    Ok(Workload { dataset, ops })
}

fn generate_dataset(n: usize, seed: u64) -> Vec<Entry> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| Entry::new(base62_encode(i as u64, KEY_LEN), random_value(&mut rng)))
        .collect()
}

fn pick(rng: &mut StdRng, keys: &[&str]) -> String {
    keys[rng.gen_range(0..keys.len())].to_string()
}
