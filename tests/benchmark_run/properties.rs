//! Property tests over the public API.

use proptest::prelude::*;
use shardbench::shardbench_core::fnv1a64;
use shardbench::shardbench_engine::{partition, Histogram};
use shardbench::ShardedStore;

proptest! {
    #[test]
    fn prop_partition_covers_every_op_once(len in 1usize..5_000, workers in 1usize..64) {
        prop_assume!(workers <= len);
        let slices = partition(len, workers).unwrap();

        prop_assert_eq!(slices.len(), workers);
        let mut next = 0;
        for slice in &slices {
            prop_assert!(!slice.is_empty());
            prop_assert_eq!(slice.start, next);
            next = slice.end;
        }
        prop_assert_eq!(next, len);

        let chunk = len / workers;
        for slice in &slices[..workers - 1] {
            prop_assert_eq!(slice.len(), chunk);
        }
    }

    #[test]
    fn prop_store_places_keys_by_hash(keys in prop::collection::vec("[a-zA-Z0-9]{1,12}", 1..50), shards in 1usize..32) {
        let store = ShardedStore::new(shards).unwrap();
        for key in &keys {
            store.set(key.clone(), key.clone());
            let shard = (fnv1a64(key) % shards as u64) as usize;
            prop_assert_eq!(store.shard_of(key), shard);
            prop_assert_eq!(store.get(key), Some(key.clone()));
        }
    }

    #[test]
    fn prop_percentiles_are_ordered(samples in prop::collection::vec(0u64..2_000_000, 1..500)) {
        let mut h = Histogram::new();
        for &s in &samples {
            h.record(s);
        }
        prop_assert!(h.percentile(50.0) <= h.percentile(95.0));
        prop_assert!(h.percentile(95.0) <= h.percentile(99.0));
    }
}
