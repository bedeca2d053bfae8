//! Cross-structure cost comparison: build, search, and min/max for every
//! index structure plus a `BTreeMap` reference.

use std::collections::BTreeMap;

use criterion::measurement::WallTime;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ordidx::{AvlTree, HashIndex, Lat, RadixTrie, SkipList, SortedArray};

const KEY_RANGE: u64 = 10_000_000;

/// LAT configuration sized so the bench key range stays inside capacity
/// (64^4 > 10^7): no digit-path aliasing during the runs.
const LAT_RADIX: u64 = 64;
const LAT_HEIGHT: usize = 4;

fn generate_pairs(n: usize, seed: u64) -> (Vec<u64>, Vec<u64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let keys: Vec<u64> = (0..n).map(|_| rng.gen_range(0..KEY_RANGE)).collect();
    let values: Vec<u64> = keys.iter().map(|k| k.wrapping_mul(31)).collect();
    (keys, values)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for size in [1_000, 10_000, 100_000] {
        let (keys, values) = generate_pairs(size, 42);

        group.bench_with_input(BenchmarkId::new("AvlTree", size), &size, |b, _| {
            b.iter(|| black_box(AvlTree::from_pairs(&keys, values.clone()).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("SkipList", size), &size, |b, _| {
            b.iter(|| black_box(SkipList::from_pairs(&keys, values.clone()).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("Lat", size), &size, |b, _| {
            b.iter(|| {
                black_box(Lat::with_config(&keys, values.clone(), LAT_RADIX, LAT_HEIGHT).unwrap())
            });
        });
        group.bench_with_input(BenchmarkId::new("RadixTrie", size), &size, |b, _| {
            b.iter(|| black_box(RadixTrie::from_pairs(&keys, values.clone()).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("SortedArray", size), &size, |b, _| {
            b.iter(|| black_box(SortedArray::from_pairs(&keys, values.clone()).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("HashIndex", size), &size, |b, _| {
            b.iter(|| black_box(HashIndex::from_pairs(&keys, values.clone()).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |b, _| {
            b.iter(|| {
                let mut map: BTreeMap<u64, u64> = BTreeMap::new();
                for (&key, &value) in keys.iter().zip(&values) {
                    map.entry(key).or_insert(value);
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

/// Time a full sweep of lookups, summing hits so nothing is optimized away.
fn probe<F>(
    group: &mut BenchmarkGroup<'_, WallTime>,
    name: &str,
    size: usize,
    keys: &[u64],
    lookup: F,
) where
    F: Fn(u64) -> Option<u64>,
{
    group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
        b.iter(|| {
            let mut sum = 0u64;
            for &key in keys {
                if let Some(v) = lookup(key) {
                    sum = sum.wrapping_add(v);
                }
            }
            black_box(sum)
        });
    });
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [1_000, 10_000, 100_000] {
        let (keys, values) = generate_pairs(size, 42);

        let avl = AvlTree::from_pairs(&keys, values.clone()).unwrap();
        let skip = SkipList::from_pairs(&keys, values.clone()).unwrap();
        let lat = Lat::with_config(&keys, values.clone(), LAT_RADIX, LAT_HEIGHT).unwrap();
        let radix = RadixTrie::from_pairs(&keys, values.clone()).unwrap();
        let array = SortedArray::from_pairs(&keys, values.clone()).unwrap();
        let mut btree: BTreeMap<u64, u64> = BTreeMap::new();
        for (&key, &value) in keys.iter().zip(&values) {
            btree.entry(key).or_insert(value);
        }

        probe(&mut group, "AvlTree", size, &keys, |k| avl.search(k).copied());
        probe(&mut group, "SkipList", size, &keys, |k| skip.search(k).copied());
        probe(&mut group, "Lat", size, &keys, |k| lat.search(k).copied());
        probe(&mut group, "RadixTrie", size, &keys, |k| {
            radix.search(k).copied()
        });
        probe(&mut group, "SortedArray", size, &keys, |k| {
            array.search(k).copied()
        });
        probe(&mut group, "BTreeMap", size, &keys, |k| btree.get(&k).copied());
    }

    group.finish();
}

fn bench_min_max(c: &mut Criterion) {
    let mut group = c.benchmark_group("min_max");

    let size = 100_000;
    let (keys, values) = generate_pairs(size, 42);

    let avl = AvlTree::from_pairs(&keys, values.clone()).unwrap();
    let skip = SkipList::from_pairs(&keys, values.clone()).unwrap();
    let lat = Lat::with_config(&keys, values.clone(), LAT_RADIX, LAT_HEIGHT).unwrap();
    let radix = RadixTrie::from_pairs(&keys, values.clone()).unwrap();
    let array = SortedArray::from_pairs(&keys, values).unwrap();

    group.bench_function("AvlTree", |b| {
        b.iter(|| black_box((avl.min_key().unwrap(), avl.max_key().unwrap())))
    });
    group.bench_function("SkipList", |b| {
        b.iter(|| black_box((skip.min_key().unwrap(), skip.max_key().unwrap())))
    });
    group.bench_function("Lat", |b| {
        b.iter(|| black_box((lat.min_key().unwrap(), lat.max_key().unwrap())))
    });
    group.bench_function("RadixTrie", |b| {
        b.iter(|| black_box((radix.min_key().unwrap(), radix.max_key().unwrap())))
    });
    group.bench_function("SortedArray", |b| {
        b.iter(|| black_box((array.min_key().unwrap(), array.max_key().unwrap())))
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_search, bench_min_max);
criterion_main!(benches);
