//! Benchmarks for the weighted tree.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use weighted_grove::{TreeConfig, WeightedTree};

fn shuffled_keys(n: u32) -> Vec<u32> {
    let mut keys: Vec<u32> = (0..n).collect();
    keys.shuffle(&mut StdRng::seed_from_u64(n as u64));
    keys
}

fn build_tree(keys: &[u32]) -> WeightedTree<u32> {
    let config = TreeConfig::default()
        .with_seed(1)
        .with_initial_capacity(keys.len());
    let mut tree = WeightedTree::with_config(config);
    for &key in keys {
        tree.add_weighted(key, key % 16);
    }
    tree
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("weighted_tree_add");
    for n in [1_000u32, 100_000] {
        let keys = shuffled_keys(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &keys, |b, keys| {
            b.iter(|| black_box(build_tree(keys)));
        });
    }
    group.finish();
}

fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("weighted_tree_sample");
    for n in [1_000u32, 100_000] {
        let mut tree = build_tree(&shuffled_keys(n));
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| black_box(tree.sample().copied()));
        });
    }
    group.finish();
}

fn bench_remove_and_readd(c: &mut Criterion) {
    let keys = shuffled_keys(100_000);
    let mut tree = build_tree(&keys);
    c.bench_function("weighted_tree_remove_readd_1000", |b| {
        b.iter(|| {
            for &key in &keys[..1000] {
                let weight = tree.weight(&key).unwrap_or(1);
                tree.remove(&key);
                tree.add_weighted(key, weight);
            }
        });
    });
}

fn bench_set_weight(c: &mut Criterion) {
    let keys = shuffled_keys(100_000);
    let mut tree = build_tree(&keys);
    c.bench_function("weighted_tree_set_weight_1000", |b| {
        b.iter(|| {
            for (i, &key) in keys[..1000].iter().enumerate() {
                black_box(tree.set_weight(&key, i as u32));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_add,
    bench_sample,
    bench_remove_and_readd,
    bench_set_weight,
);
criterion_main!(benches);
