use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use osavl_tree::OSAvlMultiset;
use std::collections::BTreeMap;

const N: usize = 10_000;

// ─── Helper functions to generate value sequences ────────────────────────────

fn random_values(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut values = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        values.push((x >> 33) as i64);
    }
    values
}

/// Random values squeezed into a tiny range, so most inserts coalesce.
fn duplicate_heavy_values(n: usize) -> Vec<i64> {
    random_values(n).into_iter().map(|v| v % 256).collect()
}

/// The values sorted ascending with duplicates kept, for rank oracles.
fn sorted_expansion(values: &[i64]) -> Vec<i64> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    sorted
}

// ─── Insert Benchmarks ──────────────────────────────────────────────────────

fn bench_insert_ordered(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiset_insert_ordered");

    group.bench_function(BenchmarkId::new("OSAvlMultiset", N), |b| {
        b.iter(|| {
            let mut set = OSAvlMultiset::new();
            for i in 0..N as i64 {
                set.insert(i);
            }
            set
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
            for i in 0..N as i64 {
                *counts.entry(i).or_insert(0) += 1;
            }
            counts
        });
    });

    group.finish();
}

fn bench_insert_reverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiset_insert_reverse");

    group.bench_function(BenchmarkId::new("OSAvlMultiset", N), |b| {
        b.iter(|| {
            let mut set = OSAvlMultiset::new();
            for i in (0..N as i64).rev() {
                set.insert(i);
            }
            set
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
            for i in (0..N as i64).rev() {
                *counts.entry(i).or_insert(0) += 1;
            }
            counts
        });
    });

    group.finish();
}

fn bench_insert_random(c: &mut Criterion) {
    let values = random_values(N);
    let mut group = c.benchmark_group("multiset_insert_random");

    group.bench_function(BenchmarkId::new("OSAvlMultiset", N), |b| {
        b.iter(|| {
            let mut set = OSAvlMultiset::new();
            for &v in &values {
                set.insert(v);
            }
            set
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
            for &v in &values {
                *counts.entry(v).or_insert(0) += 1;
            }
            counts
        });
    });

    group.finish();
}

fn bench_insert_duplicate_heavy(c: &mut Criterion) {
    let values = duplicate_heavy_values(N);
    let mut group = c.benchmark_group("multiset_insert_duplicate_heavy");

    group.bench_function(BenchmarkId::new("OSAvlMultiset", N), |b| {
        b.iter(|| {
            let mut set = OSAvlMultiset::new();
            for &v in &values {
                set.insert(v);
            }
            set
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
            for &v in &values {
                *counts.entry(v).or_insert(0) += 1;
            }
            counts
        });
    });

    group.finish();
}

// ─── Lookup Benchmarks ──────────────────────────────────────────────────────

fn bench_count_random(c: &mut Criterion) {
    let values = random_values(N);
    let set: OSAvlMultiset<i64> = values.iter().copied().collect();
    let counts: BTreeMap<i64, usize> = values.iter().fold(BTreeMap::new(), |mut map, &v| {
        *map.entry(v).or_insert(0) += 1;
        map
    });

    let mut group = c.benchmark_group("multiset_count_random");

    group.bench_function(BenchmarkId::new("OSAvlMultiset", N), |b| {
        b.iter(|| {
            let mut sum = 0usize;
            for v in &values {
                sum = sum.wrapping_add(set.count(v));
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0usize;
            for v in &values {
                sum = sum.wrapping_add(counts.get(v).copied().unwrap_or(0));
            }
            sum
        });
    });

    group.finish();
}

// ─── Order-statistic Benchmarks ─────────────────────────────────────────────

fn bench_kth(c: &mut Criterion) {
    let values = duplicate_heavy_values(N);
    let set: OSAvlMultiset<i64> = values.iter().copied().collect();
    let sorted = sorted_expansion(&values);

    let mut group = c.benchmark_group("multiset_kth");

    group.bench_function(BenchmarkId::new("OSAvlMultiset", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for rank in 1..=N {
                if let Some(&v) = set.kth(rank) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("SortedVec", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for rank in 1..=N {
                sum = sum.wrapping_add(sorted[rank - 1]);
            }
            sum
        });
    });

    group.finish();
}

fn bench_rank_of(c: &mut Criterion) {
    let values = duplicate_heavy_values(N);
    let set: OSAvlMultiset<i64> = values.iter().copied().collect();
    let sorted = sorted_expansion(&values);

    let mut group = c.benchmark_group("multiset_rank_of");

    group.bench_function(BenchmarkId::new("OSAvlMultiset", N), |b| {
        b.iter(|| {
            let mut sum = 0usize;
            for v in &values {
                if let Some(rank) = set.rank_of(v) {
                    sum = sum.wrapping_add(rank);
                }
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("SortedVec", N), |b| {
        b.iter(|| {
            let mut sum = 0usize;
            for &v in &values {
                sum = sum.wrapping_add(sorted.partition_point(|&x| x <= v));
            }
            sum
        });
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(
    insert_benches,
    bench_insert_ordered,
    bench_insert_reverse,
    bench_insert_random,
    bench_insert_duplicate_heavy,
);

criterion_group!(lookup_benches, bench_count_random,);

criterion_group!(order_statistic_benches, bench_kth, bench_rank_of,);

criterion_main!(insert_benches, lookup_benches, order_statistic_benches,);
