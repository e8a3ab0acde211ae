//! Benchmark for Bimap vs a pair of standard BTreeMaps.
//!
//! The BTreeMap baseline keeps one map per direction and stores every key
//! twice, which is what a bidirectional map replaces.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::hint::black_box;
use treap_bimap::treap::Seed;
use treap_bimap::{Bimap, BimapConfig};

const SIZES: [usize; 3] = [100, 1000, 10000];

fn random_pairs(size: usize) -> Vec<(u64, u64)> {
    let mut rng = StdRng::seed_from_u64(1_488_228);
    (0..size).map(|_| (rng.random(), rng.random())).collect()
}

fn seeded() -> Bimap<u64, u64> {
    Bimap::with_config(BimapConfig::default().with_seed(Seed::Fixed(7)))
}

struct TwoMaps {
    left: BTreeMap<u64, u64>,
    right: BTreeMap<u64, u64>,
}

impl TwoMaps {
    const fn new() -> Self {
        Self {
            left: BTreeMap::new(),
            right: BTreeMap::new(),
        }
    }

    fn insert(&mut self, left: u64, right: u64) -> bool {
        if self.left.contains_key(&left) || self.right.contains_key(&right) {
            return false;
        }
        self.left.insert(left, right);
        self.right.insert(right, left);
        true
    }

    fn remove_left(&mut self, left: &u64) -> Option<u64> {
        let right = self.left.remove(left)?;
        self.right.remove(&right);
        Some(right)
    }
}

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert");

    for size in SIZES {
        let pairs = random_pairs(size);

        group.bench_with_input(BenchmarkId::new("Bimap", size), &pairs, |bencher, pairs| {
            bencher.iter(|| {
                let mut map = seeded();
                for &(left, right) in pairs {
                    map.insert(black_box(left), black_box(right));
                }
                black_box(map)
            });
        });

        group.bench_with_input(BenchmarkId::new("TwoBTreeMaps", size), &pairs, |bencher, pairs| {
            bencher.iter(|| {
                let mut maps = TwoMaps::new();
                for &(left, right) in pairs {
                    maps.insert(black_box(left), black_box(right));
                }
                black_box(maps.left.len())
            });
        });
    }

    group.finish();
}

// =============================================================================
// lookup Benchmark
// =============================================================================

fn benchmark_lookup(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("lookup_both_sides");

    for size in SIZES {
        let pairs = random_pairs(size);
        let map: Bimap<u64, u64> = pairs.iter().copied().collect();
        let mut maps = TwoMaps::new();
        for &(left, right) in &pairs {
            maps.insert(left, right);
        }

        group.bench_with_input(BenchmarkId::new("Bimap", size), &pairs, |bencher, pairs| {
            bencher.iter(|| {
                let mut sum = 0u64;
                for (left, right) in pairs {
                    if let Some(&partner) = map.get_left(black_box(left)) {
                        sum = sum.wrapping_add(partner);
                    }
                    if let Some(&partner) = map.get_right(black_box(right)) {
                        sum = sum.wrapping_add(partner);
                    }
                }
                black_box(sum)
            });
        });

        group.bench_with_input(BenchmarkId::new("TwoBTreeMaps", size), &pairs, |bencher, pairs| {
            bencher.iter(|| {
                let mut sum = 0u64;
                for (left, right) in pairs {
                    if let Some(&partner) = maps.left.get(black_box(left)) {
                        sum = sum.wrapping_add(partner);
                    }
                    if let Some(&partner) = maps.right.get(black_box(right)) {
                        sum = sum.wrapping_add(partner);
                    }
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// erase Benchmark
// =============================================================================

fn benchmark_erase(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("erase_by_left_key");

    for size in SIZES {
        let pairs = random_pairs(size);
        let map: Bimap<u64, u64> = pairs.iter().copied().collect();
        let mut maps = TwoMaps::new();
        for &(left, right) in &pairs {
            maps.insert(left, right);
        }

        group.bench_with_input(BenchmarkId::new("Bimap", size), &pairs, |bencher, pairs| {
            bencher.iter_batched(
                || map.clone(),
                |mut map| {
                    for (left, _) in pairs {
                        map.erase_left_key(black_box(left));
                    }
                    black_box(map.len())
                },
                criterion::BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("TwoBTreeMaps", size), &pairs, |bencher, pairs| {
            bencher.iter_batched(
                || TwoMaps {
                    left: maps.left.clone(),
                    right: maps.right.clone(),
                },
                |mut maps| {
                    for (left, _) in pairs {
                        maps.remove_left(black_box(left));
                    }
                    black_box(maps.left.len())
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// iteration Benchmark
// =============================================================================

fn benchmark_iteration(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("iterate_right");

    for size in SIZES {
        let map: Bimap<u64, u64> = random_pairs(size).into_iter().collect();
        let right: BTreeMap<u64, u64> = map.iter_right().map(|(r, l)| (*r, *l)).collect();

        group.bench_with_input(BenchmarkId::new("Bimap", size), &size, |bencher, _| {
            bencher.iter(|| black_box(map.iter_right().fold(0u64, |sum, (r, _)| sum ^ r)));
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, _| {
            bencher.iter(|| black_box(right.iter().fold(0u64, |sum, (r, _)| sum ^ r)));
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_lookup,
    benchmark_erase,
    benchmark_iteration
);

criterion_main!(benches);
