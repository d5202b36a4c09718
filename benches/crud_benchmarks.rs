use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use osrb_tree::{OSRBTreeMap, Rank};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

const N: usize = 10_000;

// ─── Key sequences ──────────────────────────────────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(12345);
    (0..n).map(|_| rng.gen_range(0..i64::MAX)).collect()
}

fn shuffled_ranks(n: usize) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(54321);
    let mut ranks: Vec<usize> = (0..n).collect();
    ranks.shuffle(&mut rng);
    ranks
}

// ─── Insertion ──────────────────────────────────────────────────────────────

fn bench_insert_ordered(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_ordered");

    group.bench_function(BenchmarkId::new("OSRBTreeMap", N), |b| {
        b.iter(|| {
            let mut map = OSRBTreeMap::new();
            for i in 0..N as i64 {
                map.insert(i, i);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for i in 0..N as i64 {
                map.insert(i, i);
            }
            map
        });
    });

    group.finish();
}

fn bench_insert_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("insert_random");

    group.bench_function(BenchmarkId::new("OSRBTreeMap", N), |b| {
        b.iter(|| {
            let mut map = OSRBTreeMap::new();
            for &k in &keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &k in &keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.finish();
}

fn bench_bulk_build(c: &mut Criterion) {
    let keys = ordered_keys(N);
    let mut group = c.benchmark_group("bulk_build_sorted");

    group.bench_function(BenchmarkId::new("OSRBTreeMap::from_sorted_iter", N), |b| {
        b.iter(|| OSRBTreeMap::from_sorted_iter(keys.iter().map(|&k| (k, k))));
    });

    group.bench_function(BenchmarkId::new("OSRBTreeMap::collect", N), |b| {
        b.iter(|| keys.iter().map(|&k| (k, k)).collect::<OSRBTreeMap<i64, i64>>());
    });

    group.bench_function(BenchmarkId::new("BTreeMap::collect", N), |b| {
        b.iter(|| keys.iter().map(|&k| (k, k)).collect::<BTreeMap<i64, i64>>());
    });

    group.finish();
}

// ─── Lookup ─────────────────────────────────────────────────────────────────

fn bench_get_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let os_map: OSRBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("get_random");

    group.bench_function(BenchmarkId::new("OSRBTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &keys {
                if let Some(&v) = os_map.get(&k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &keys {
                if let Some(&v) = bt_map.get(&k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.finish();
}

// ─── Removal ────────────────────────────────────────────────────────────────

fn bench_remove_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("remove_random");

    group.bench_function(BenchmarkId::new("OSRBTreeMap", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<OSRBTreeMap<i64, i64>>(),
            |mut map| {
                for &k in &keys {
                    map.remove(&k);
                }
                map
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<BTreeMap<i64, i64>>(),
            |mut map| {
                for &k in &keys {
                    map.remove(&k);
                }
                map
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Order statistics ───────────────────────────────────────────────────────

// BTreeMap has no positional index, so the baseline walks the iterator.
fn bench_select_by_rank(c: &mut Criterion) {
    let os_map: OSRBTreeMap<i64, i64> = ordered_keys(N).into_iter().map(|k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = ordered_keys(N).into_iter().map(|k| (k, k)).collect();
    let ranks = shuffled_ranks(N);
    let lookups = &ranks[..N / 100];

    let mut group = c.benchmark_group("select_by_rank");

    group.bench_function(BenchmarkId::new("OSRBTreeMap::select_key_by_rank", lookups.len()), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &rank in lookups {
                if let Ok(&k) = os_map.select_key_by_rank(rank) {
                    sum = sum.wrapping_add(k);
                }
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("OSRBTreeMap::index", lookups.len()), |b| {
        b.iter(|| lookups.iter().fold(0i64, |sum, &rank| sum.wrapping_add(os_map[Rank(rank)])));
    });

    group.bench_function(BenchmarkId::new("BTreeMap::iter().nth", lookups.len()), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &rank in lookups {
                if let Some((&k, _)) = bt_map.iter().nth(rank) {
                    sum = sum.wrapping_add(k);
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_rank_of(c: &mut Criterion) {
    let keys = random_keys(N);
    let os_map: OSRBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let lookups = &keys[..N / 100];

    let mut group = c.benchmark_group("rank_of");

    group.bench_function(BenchmarkId::new("OSRBTreeMap", lookups.len()), |b| {
        b.iter(|| lookups.iter().filter_map(|k| os_map.rank_of(k)).sum::<usize>());
    });

    group.bench_function(BenchmarkId::new("BTreeMap::range().count", lookups.len()), |b| {
        b.iter(|| lookups.iter().map(|k| bt_map.range(..k).count()).sum::<usize>());
    });

    group.finish();
}

fn bench_rank_under_churn(c: &mut Criterion) {
    let keys = random_keys(N);
    let ranks = shuffled_ranks(N);

    c.bench_function("insert_remove_select_churn", |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<OSRBTreeMap<i64, i64>>(),
            |mut map| {
                for (&k, &rank) in keys.iter().zip(&ranks).take(N / 10) {
                    map.remove(&k);
                    map.insert(k.wrapping_neg(), k);
                    black_box(map.get_by_rank(rank % map.len()));
                }
                map
            },
            BatchSize::SmallInput,
        );
    });
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(insert_benches, bench_insert_ordered, bench_insert_random, bench_bulk_build,);

criterion_group!(lookup_benches, bench_get_random, bench_remove_random,);

criterion_group!(rank_benches, bench_select_by_rank, bench_rank_of, bench_rank_under_churn,);

criterion_main!(insert_benches, lookup_benches, rank_benches);
