//! Criterion micro-benchmarks for the allocation engine.
//!
//! Covers the O(capacity) best-fit scan on empty and fragmented
//! layouts, plus the three resize paths.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fen_bench::{empty_heap, fragmented_heap};

fn bench_allocate_release(c: &mut Criterion) {
    c.bench_function("allocate_release_16", |b| {
        let mut heap = empty_heap();
        b.iter(|| {
            let block = heap.allocate(black_box(16));
            heap.release(block);
        });
    });
}

fn bench_best_fit_fragmented(c: &mut Criterion) {
    c.bench_function("allocate_release_fragmented_8", |b| {
        let (mut heap, _survivors) = fragmented_heap();
        b.iter(|| {
            let block = heap.allocate(black_box(8));
            heap.release(block);
        });
    });
}

fn bench_resize_in_place(c: &mut Criterion) {
    c.bench_function("resize_shrink_grow_cycle", |b| {
        let mut heap = empty_heap();
        let mut block = heap.allocate(32);
        b.iter(|| {
            block = heap.resize(block, black_box(16));
            block = heap.resize(block, black_box(32));
        });
    });
}

fn bench_resize_relocate(c: &mut Criterion) {
    c.bench_function("resize_move_cycle", |b| {
        let mut heap = empty_heap();
        b.iter(|| {
            let first = heap.allocate(20);
            let second = heap.allocate(50);
            let third = heap.allocate(1);
            let moved = heap.resize(first, black_box(21));
            heap.release(moved);
            heap.release(second);
            heap.release(third);
        });
    });
}

criterion_group!(
    benches,
    bench_allocate_release,
    bench_best_fit_fragmented,
    bench_resize_in_place,
    bench_resize_relocate,
);
criterion_main!(benches);
