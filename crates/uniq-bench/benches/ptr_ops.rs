//! Criterion micro-benchmarks for single-pointer ownership operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use uniq::UniquePtr;
use uniq_bench::{op_sequence, run_ops};

/// Benchmark: allocate, wrap, and drop one pointer per iteration.
fn bench_wrap_drop(c: &mut Criterion) {
    c.bench_function("ptr_wrap_drop", |b| {
        b.iter(|| {
            let p = UniquePtr::new(black_box(42_u64));
            black_box(&p);
        });
    });
}

/// Benchmark: reassignment churn — each iteration releases the previous
/// resource and adopts a fresh one.
fn bench_replace_churn(c: &mut Criterion) {
    c.bench_function("ptr_replace_churn", |b| {
        let mut p = UniquePtr::new(0_u64);
        let mut i = 0_u64;
        b.iter(|| {
            i = i.wrapping_add(1);
            p = UniquePtr::new(black_box(i));
            black_box(p.get());
        });
    });
}

/// Benchmark: move the resource out and back without touching the heap.
fn bench_take_swap(c: &mut Criterion) {
    c.bench_function("ptr_take_swap", |b| {
        let mut p = UniquePtr::new(7_u64);
        b.iter(|| {
            let mut q = p.take();
            q.swap(&mut p);
            black_box(p.get());
        });
    });
}

/// Benchmark: deterministic 1K-op mixed workload (wrap/read/bounce/swap/clear).
fn bench_mixed_ops(c: &mut Criterion) {
    let ops = op_sequence(42, 1_000);
    c.bench_function("ptr_mixed_ops_1k", |b| {
        b.iter(|| black_box(run_ops(black_box(&ops))));
    });
}

criterion_group!(
    benches,
    bench_wrap_drop,
    bench_replace_churn,
    bench_take_swap,
    bench_mixed_ops
);
criterion_main!(benches);
