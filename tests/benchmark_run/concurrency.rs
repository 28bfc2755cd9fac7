//! The store and driver under real threads.

use crate::{mixed_trace, small_dataset};
use shardbench::shardbench_engine::{partition, Driver};
use shardbench::{BenchConfig, Op, ShardedStore};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_partition_covers_trace_once() {
    for (len, workers) in [(100, 4), (101, 4), (7, 7), (1_000, 3)] {
        let slices = partition(len, workers).unwrap();
        assert_eq!(slices.len(), workers);
        assert_eq!(slices[0].start, 0);
        assert_eq!(slices[workers - 1].end, len);
        for pair in slices.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }
}

#[test]
fn test_set_before_join_is_visible() {
    let store = Arc::new(ShardedStore::new(8).unwrap());
    let barrier = Arc::new(Barrier::new(4));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..250 {
                    store.set(format!("t{}-{}", t, i), i.to_string());
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(store.total_entries(), 1_000);
    assert_eq!(store.get("t3-249"), Some("249".to_string()));
}

#[test]
fn test_driver_counts_every_worker() {
    let store = Arc::new(ShardedStore::from_entries(4, small_dataset(8)).unwrap());
    let ops: Arc<[Op]> = mixed_trace(64, 8, 4).into();
    let config = BenchConfig::new().threads(4).shards(4).warmup_s(0.05).duration_s(0.2);

    let summary = Driver::new(store, ops, config).unwrap().run().unwrap();
    assert_eq!(summary.per_worker_ops.len(), 4);
    assert!(summary.per_worker_ops.iter().all(|&n| n > 0));
    assert_eq!(summary.per_worker_ops.iter().sum::<u64>(), summary.ops_total);
    assert_eq!(summary.histogram.total(), summary.ops_total);
}
