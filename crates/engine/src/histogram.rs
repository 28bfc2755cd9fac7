//! Two-resolution latency histogram
//!
//! Memory is fixed regardless of how many samples are recorded:
//!
//! ```text
//! fine:   [0, 10_000) µs          1 µs per bucket      10_000 buckets, exact
//! coarse: [10_000, 1_000_000) µs  1_000 µs per bucket     990 buckets, midpoint
//! beyond: >= 1_000_000 µs         saturates into the last coarse bucket
//! ```
//!
//! Histograms are single-writer: each worker owns one and the driver merges
//! them after the workers have finished, so the hot path takes no lock.

use std::time::Duration;

/// Upper bound (exclusive) of the fine range, in µs
pub const FINE_LIMIT_US: u64 = 10_000;
/// Width of one coarse bucket, in µs
pub const COARSE_WIDTH_US: u64 = 1_000;
/// Outer ceiling, in µs. Samples at or above it saturate.
pub const CEILING_US: u64 = 1_000_000;

/// Number of fine buckets
pub const FINE_BUCKETS: usize = FINE_LIMIT_US as usize;
/// Number of coarse buckets
pub const COARSE_BUCKETS: usize = ((CEILING_US - FINE_LIMIT_US) / COARSE_WIDTH_US) as usize;

/// Latency histogram with exact small values and bounded large ones
///
/// Invariant: `total` equals the sum of every bucket. Buckets only grow.
#[derive(Clone, PartialEq, Eq)]
pub struct Histogram {
    fine: Box<[u64]>,
    coarse: Box<[u64]>,
    total: u64,
}

impl Histogram {
    /// Create an empty histogram
    pub fn new() -> Self {
        Self {
            fine: vec![0; FINE_BUCKETS].into_boxed_slice(),
            coarse: vec![0; COARSE_BUCKETS].into_boxed_slice(),
            total: 0,
        }
    }

    /// Record one sample, in µs
    ///
    /// O(1). Samples at or beyond [`CEILING_US`] land in the last coarse
    /// bucket.
    #[inline]
    pub fn record(&mut self, us: u64) {
        if us < FINE_LIMIT_US {
            self.fine[us as usize] += 1;
        } else {
            let idx = ((us - FINE_LIMIT_US) / COARSE_WIDTH_US) as usize;
            self.coarse[idx.min(COARSE_BUCKETS - 1)] += 1;
        }
        self.total += 1;
    }

    /// Record an elapsed duration, rounded half-up to whole µs
    #[inline]
    pub fn record_duration(&mut self, elapsed: Duration) {
        self.record(round_to_micros(elapsed));
    }

    /// Add every bucket of `other` into `self`
    ///
    /// Bucket-wise addition, so any merge order gives the same result.
    pub fn merge(&mut self, other: &Histogram) {
        for (a, b) in self.fine.iter_mut().zip(other.fine.iter()) {
            *a += b;
        }
        for (a, b) in self.coarse.iter_mut().zip(other.coarse.iter()) {
            *a += b;
        }
        self.total += other.total;
    }

    /// Merge a set of histograms into a new one
    pub fn merged<'a, I>(histograms: I) -> Histogram
    where
        I: IntoIterator<Item = &'a Histogram>,
    {
        let mut out = Histogram::new();
        for h in histograms {
            out.merge(h);
        }
        out
    }

    /// Total number of samples
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Check if no sample was recorded
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Count in the fine bucket for exactly `us` µs
    pub fn fine_count(&self, us: usize) -> Option<u64> {
        self.fine.get(us).copied()
    }

    /// Count in coarse bucket `index`
    pub fn coarse_count(&self, index: usize) -> Option<u64> {
        self.coarse.get(index).copied()
    }

    /// Representative value of coarse bucket `index`: its midpoint
    #[inline]
    pub fn coarse_midpoint(index: usize) -> u64 {
        FINE_LIMIT_US + index as u64 * COARSE_WIDTH_US + COARSE_WIDTH_US / 2
    }

    /// Latency at percentile `p`, in µs
    ///
    /// Nearest rank over binned data: the target rank is
    /// `max(1, ceil(total * p / 100))` with `p` clamped to `[0, 100]`, and the
    /// result is the first bucket whose cumulative count reaches it. Fine
    /// buckets report their exact value, coarse buckets their midpoint.
    /// An empty histogram reports 0.
    pub fn percentile(&self, p: f64) -> u64 {
        if self.total == 0 {
            return 0;
        }
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 100.0) };
        let target = ((self.total as f64 * p / 100.0).ceil() as u64).max(1);

        let mut seen = 0u64;
        for (us, &count) in self.fine.iter().enumerate() {
            seen += count;
            if seen >= target {
                return us as u64;
            }
        }
        for (i, &count) in self.coarse.iter().enumerate() {
            seen += count;
            if seen >= target {
                return Self::coarse_midpoint(i);
            }
        }
        // Unreachable while the total invariant holds
        CEILING_US
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Histogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Histogram")
            .field("total", &self.total)
            .field("p50", &self.percentile(50.0))
            .field("p99", &self.percentile(99.0))
            .finish()
    }
}

/// Round a duration to whole µs, halves rounding up
#[inline]
pub fn round_to_micros(d: Duration) -> u64 {
    let us = (d.as_nanos() + 500) / 1_000;
    u64::try_from(us).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn from_samples(samples: &[u64]) -> Histogram {
        let mut h = Histogram::new();
        for &s in samples {
            h.record(s);
        }
        h
    }

    #[test]
    fn test_layout() {
        assert_eq!(FINE_BUCKETS, 10_000);
        assert_eq!(COARSE_BUCKETS, 990);
        assert_eq!(Histogram::coarse_midpoint(0), 10_500);
        assert_eq!(Histogram::coarse_midpoint(COARSE_BUCKETS - 1), 999_500);
    }

    #[test]
    fn test_empty_percentile_is_zero() {
        let h = Histogram::new();
        assert!(h.is_empty());
        for p in [0.0, 50.0, 99.0, 100.0] {
            assert_eq!(h.percentile(p), 0);
        }
    }

    #[test]
    fn test_fine_record_is_exact() {
        let h = from_samples(&[0, 7, 7, 9_999]);
        assert_eq!(h.total(), 4);
        assert_eq!(h.fine_count(7), Some(2));
        assert_eq!(h.fine_count(9_999), Some(1));
        assert_eq!(h.fine_count(10_000), None);
    }

    #[test]
    fn test_coarse_boundaries() {
        let h = from_samples(&[10_000, 10_999, 11_000, 999_999]);
        assert_eq!(h.coarse_count(0), Some(2));
        assert_eq!(h.coarse_count(1), Some(1));
        assert_eq!(h.coarse_count(COARSE_BUCKETS - 1), Some(1));
    }

    #[test]
    fn test_mixed_samples() {
        let h = from_samples(&[1, 1, 2, 500, 1_500, 20_000]);
        assert_eq!(h.total(), 6);

        let p50 = h.percentile(50.0);
        assert!(p50 < FINE_LIMIT_US);
        assert!([1, 2, 500, 1_500].contains(&p50));
        assert_eq!(p50, 2);

        // 20_000 sits in coarse bucket 10, midpoint 20_500
        assert_eq!(h.percentile(99.0), 20_500);
        assert_eq!(h.percentile(100.0), 20_500);
        assert_eq!(h.percentile(0.0), 1);
    }

    #[test]
    fn test_saturation() {
        let mut h = Histogram::new();
        h.record(2_000_000);
        assert_eq!(h.total(), 1);
        assert_eq!(h.coarse_count(COARSE_BUCKETS - 1), Some(1));
        assert_eq!(h.coarse_count(COARSE_BUCKETS), None);

        h.record(u64::MAX);
        assert_eq!(h.total(), 2);
        assert_eq!(h.coarse_count(COARSE_BUCKETS - 1), Some(2));
        assert_eq!(h.percentile(100.0), 999_500);
    }

    #[test]
    fn test_identical_samples() {
        let fine = from_samples(&[42; 17]);
        let coarse = from_samples(&[123_456; 17]);
        for p in 1..=100 {
            assert_eq!(fine.percentile(p as f64), 42);
            assert_eq!(coarse.percentile(p as f64), 123_500);
        }
    }

    #[test]
    fn test_single_sample_every_percentile() {
        let h = from_samples(&[3]);
        assert_eq!(h.percentile(1.0), 3);
        assert_eq!(h.percentile(100.0), 3);
    }

    #[test]
    fn test_out_of_range_p_is_clamped() {
        let h = from_samples(&[5, 10, 15]);
        assert_eq!(h.percentile(-20.0), 5);
        assert_eq!(h.percentile(250.0), 15);
        assert_eq!(h.percentile(f64::NAN), 5);
    }

    #[test]
    fn test_ties_round_down_to_first_crossing() {
        // Ten samples, p50 is rank 5: the last of the 4s
        let h = from_samples(&[1, 2, 3, 4, 4, 6, 7, 8, 9, 10]);
        assert_eq!(h.percentile(50.0), 4);
        assert_eq!(h.percentile(51.0), 6);
    }

    #[test]
    fn test_merge_adds_buckets() {
        let mut a = from_samples(&[1, 50_000]);
        let b = from_samples(&[1, 2, 3_000_000]);
        a.merge(&b);
        assert_eq!(a.total(), 5);
        assert_eq!(a.fine_count(1), Some(2));
        assert_eq!(a.fine_count(2), Some(1));
        assert_eq!(a.coarse_count(40), Some(1));
        assert_eq!(a.coarse_count(COARSE_BUCKETS - 1), Some(1));
    }

    #[test]
    fn test_merge_empty_is_identity() {
        let a = from_samples(&[9, 99, 99_999]);
        let mut b = a.clone();
        b.merge(&Histogram::new());
        assert_eq!(a, b);
    }

    #[test]
    fn test_merged() {
        let parts = vec![from_samples(&[1]), from_samples(&[2]), from_samples(&[3])];
        let all = Histogram::merged(&parts);
        assert_eq!(all, from_samples(&[1, 2, 3]));
    }

    #[test]
    fn test_round_to_micros() {
        assert_eq!(round_to_micros(Duration::from_nanos(0)), 0);
        assert_eq!(round_to_micros(Duration::from_nanos(499)), 0);
        assert_eq!(round_to_micros(Duration::from_nanos(500)), 1);
        assert_eq!(round_to_micros(Duration::from_nanos(1_499)), 1);
        assert_eq!(round_to_micros(Duration::from_nanos(1_500)), 2);
        assert_eq!(round_to_micros(Duration::from_millis(3)), 3_000);
    }

    #[test]
    fn test_record_duration() {
        let mut h = Histogram::new();
        h.record_duration(Duration::from_nanos(2_600));
        assert_eq!(h.fine_count(3), Some(1));
    }

    fn samples() -> impl Strategy<Value = Vec<u64>> {
        proptest::collection::vec(
            prop_oneof![0u64..FINE_LIMIT_US, FINE_LIMIT_US..CEILING_US, CEILING_US..u64::MAX],
            0..64,
        )
    }

    proptest! {
        #[test]
        fn prop_merge_commutative_associative(a in samples(), b in samples(), c in samples()) {
            let (ha, hb, hc) = (from_samples(&a), from_samples(&b), from_samples(&c));

            // merge(A, merge(B, C))
            let mut bc = hb.clone();
            bc.merge(&hc);
            let mut left = ha.clone();
            left.merge(&bc);

            // merge(merge(A, B), C)
            let mut right = ha.clone();
            right.merge(&hb);
            right.merge(&hc);

            // merge(B, merge(A, C))
            let mut ac = ha.clone();
            ac.merge(&hc);
            let mut swapped = hb.clone();
            swapped.merge(&ac);

            prop_assert_eq!(&left, &right);
            prop_assert_eq!(&left, &swapped);
            prop_assert_eq!(left.total(), (a.len() + b.len() + c.len()) as u64);
        }

        #[test]
        fn prop_percentile_monotonic(s in samples()) {
            let h = from_samples(&s);
            let mut prev = 0;
            for p in 0..=100 {
                let v = h.percentile(p as f64);
                prop_assert!(v >= prev);
                prev = v;
            }
        }
    }
}
