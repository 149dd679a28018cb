//! Criterion micro-benchmarks for stream persistence.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use weft_array::DynamicArray;
use weft_bench::{filled_array, filled_list};
use weft_codec::Persist;
use weft_linked::LinkedSequence;

/// Benchmark: encode 100K u64 elements from each container kind.
fn bench_persist(c: &mut Criterion) {
    let array = filled_array(100_000);
    let list = filled_list(100_000);

    c.bench_function("codec_persist_array_100k", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(800_008);
            array.persist(&mut buf).unwrap();
            black_box(&buf);
        });
    });
    c.bench_function("codec_persist_linked_100k", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(800_008);
            list.persist(&mut buf).unwrap();
            black_box(&buf);
        });
    });
}

/// Benchmark: restore the same stream into each container kind.
fn bench_restore(c: &mut Criterion) {
    let encoded = filled_array(100_000).to_bytes().unwrap();

    c.bench_function("codec_restore_array_100k", |b| {
        b.iter(|| {
            let restored = DynamicArray::<u64>::from_bytes(&encoded).unwrap();
            black_box(restored.len());
        });
    });
    c.bench_function("codec_restore_linked_100k", |b| {
        b.iter(|| {
            let restored = LinkedSequence::<u64>::from_bytes(&encoded).unwrap();
            black_box(restored.len());
        });
    });
}

criterion_group!(benches, bench_persist, bench_restore);
criterion_main!(benches);
