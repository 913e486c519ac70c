//! Criterion benchmark of `IndexSet::solve` over synthetic relations of
//! growing arity / pattern count.
//!
//! Run with:
//!   cargo bench --bench matching
//!
//! One `benchmark_group` per scaling dimension, `BenchmarkId` per parameter
//! value.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use ram_index_select::{config::InMemoryConfig, mask::SearchMask, storage::StorageKind, IndexSet};

/// All non-empty, non-full subsets of `{0..arity}`, ordered to exercise a
/// mix of chains and antichains (the worst case for the matching graph is
/// dense poset structure, which a power-set-minus-extremes generates).
fn all_proper_subsets(arity: u32) -> Vec<SearchMask> {
    let full = (1u64 << arity) - 1;
    (1..full).map(SearchMask::from_bits).collect()
}

fn bench_solve_power_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_set_solve_power_set");
    for &arity in &[4u32, 6, 8, 10] {
        let patterns = all_proper_subsets(arity);
        group.bench_with_input(BenchmarkId::new("arity", arity), &patterns, |b, patterns| {
            b.iter(|| {
                let mut set = IndexSet::new(arity, StorageKind::BTree);
                for &p in patterns {
                    set.add_search(p).unwrap();
                }
                let config = InMemoryConfig::default();
                set.solve(&config).unwrap();
            })
        });
    }
    group.finish();
}

fn bench_solve_single_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_set_solve_single_chain");
    for &arity in &[8u32, 16, 24, 32] {
        let patterns: Vec<SearchMask> = (1..=arity)
            .map(|k| SearchMask::from_bits((1u64 << k) - 1))
            .collect();
        group.bench_with_input(BenchmarkId::new("arity", arity), &patterns, |b, patterns| {
            b.iter(|| {
                let mut set = IndexSet::new(arity, StorageKind::BTree);
                for &p in patterns {
                    set.add_search(p).unwrap();
                }
                let config = InMemoryConfig::default();
                set.solve(&config).unwrap();
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_solve_power_set, bench_solve_single_chain);
criterion_main!(benches);
