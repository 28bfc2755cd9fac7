//! Static partitioning of a trace across workers
//!
//! Worker `i` of `n` gets `[i * chunk, (i + 1) * chunk)` with
//! `chunk = len / n`; the last worker also takes the remainder.

use shardbench_core::{Error, Result};
use std::ops::Range;

/// Split `len` operations into `workers` contiguous, disjoint slices
///
/// Every index in `0..len` is covered exactly once. Fails if `workers` is
/// zero or larger than `len`, since a worker with an empty slice could
/// never make progress.
pub fn partition(len: usize, workers: usize) -> Result<Vec<Range<usize>>> {
    if workers == 0 {
        return Err(Error::config("thread count must be at least 1"));
    }
    if workers > len {
        return Err(Error::config(format!(
            "cannot split {} operations across {} workers",
            len, workers
        )));
    }

    let chunk = len / workers;
    let slices = (0..workers)
        .map(|i| {
            let start = i * chunk;
            let end = if i == workers - 1 { len } else { start + chunk };
            start..end
        })
        .collect();
    Ok(slices)
}
