//! Criterion micro-benchmarks for array-mode allocation and teardown.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use uniq::UniqueArray;

/// Benchmark: move a 1K-element vector into an array block and tear it down.
fn bench_from_vec_1k(c: &mut Criterion) {
    c.bench_function("array_from_vec_1k", |b| {
        b.iter(|| {
            let v: Vec<u64> = (0..1_000).collect();
            let a = UniqueArray::from_vec(black_box(v));
            black_box(&a);
        });
    });
}

/// Benchmark: value-initialized allocation of 1K elements.
fn bench_new_1k(c: &mut Criterion) {
    c.bench_function("array_new_1k", |b| {
        b.iter(|| {
            let a: UniqueArray<u64> = UniqueArray::new(black_box(1_000));
            black_box(&a);
        });
    });
}

/// Benchmark: collect a 1K iterator straight into an array block.
fn bench_collect_1k(c: &mut Criterion) {
    c.bench_function("array_collect_1k", |b| {
        b.iter(|| {
            let a: UniqueArray<u64> = (0..black_box(1_000_u64)).collect();
            black_box(&a);
        });
    });
}

/// Benchmark: handle churn via swap on two live blocks.
fn bench_swap(c: &mut Criterion) {
    c.bench_function("array_swap", |b| {
        let mut x = UniqueArray::from_vec(vec![1_u64; 64]);
        let mut y = UniqueArray::from_vec(vec![2_u64; 64]);
        b.iter(|| {
            x.swap(&mut y);
            black_box(x.get());
        });
    });
}

criterion_group!(
    benches,
    bench_from_vec_1k,
    bench_new_1k,
    bench_collect_1k,
    bench_swap
);
criterion_main!(benches);
