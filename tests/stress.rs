//! Large randomized workloads. These run in release-sized volumes, so prefer
//! `cargo test --release` when running them locally.

use std::collections::BTreeSet;

use osrb_tree::{Error, OSRBTreeMap};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const MILLION: usize = 1_000_000;

fn distinct_keys(rng: &mut StdRng, count: usize) -> Vec<u64> {
    let mut seen = BTreeSet::new();
    while seen.len() < count {
        seen.insert(rng.r#gen::<u64>());
    }
    let mut keys: Vec<u64> = seen.into_iter().collect();
    keys.shuffle(rng);
    keys
}

#[test]
fn million_random_keys_select_in_order() {
    let mut rng = StdRng::seed_from_u64(0x05b7_2ee1);
    let keys = distinct_keys(&mut rng, MILLION);

    let mut map = OSRBTreeMap::new();
    for (i, &k) in keys.iter().enumerate() {
        assert_eq!(map.insert(k, i), None);
    }
    assert_eq!(map.len(), MILLION);

    let mut sorted = keys;
    sorted.sort_unstable();
    for (rank, key) in sorted.iter().enumerate() {
        assert_eq!(map.select_key_by_rank(rank), Ok(key));
    }
    assert_eq!(
        map.select_key_by_rank(MILLION),
        Err(Error::RankOutOfBounds {
            rank: MILLION,
            len: MILLION
        })
    );
}

#[test]
fn interleaved_churn_keeps_ranks_exact() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut map = OSRBTreeMap::new();
    let mut mirror = BTreeSet::new();

    for round in 0..200_000u32 {
        let key = rng.gen_range(0..50_000u32);
        if rng.gen_bool(0.6) {
            map.insert(key, round);
            mirror.insert(key);
        } else {
            assert_eq!(map.remove(&key).is_some(), mirror.remove(&key));
        }

        if round % 20_000 == 0 {
            assert!(map.keys().eq(mirror.iter()));
        }
        if !mirror.is_empty() {
            let rank = rng.gen_range(0..mirror.len());
            let key = *map.select_key_by_rank(rank).unwrap();
            assert!(mirror.contains(&key));
            assert_eq!(mirror.range(..key).count(), rank);
            assert_eq!(map.rank_of(&key), Some(rank));
        }
    }
    assert_eq!(map.len(), mirror.len());
}

#[test]
fn sorted_build_of_a_million_entries() {
    let map = OSRBTreeMap::from_sorted_iter((0..MILLION).map(|k| (k, k * 2))).unwrap();

    assert_eq!(map.len(), MILLION);
    for rank in (0..MILLION).step_by(997) {
        assert_eq!(map.get_by_rank(rank), Some((&rank, &(rank * 2))));
    }
    assert_eq!(map.rank_of(&(MILLION - 1)), Some(MILLION - 1));
}
