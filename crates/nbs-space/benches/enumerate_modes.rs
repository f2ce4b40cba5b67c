use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nbs_core::rng::RngHandle;
use nbs_space::{enumerate_with_loose_ends, enumerate_without_loose_ends, ConstraintTable};

fn enumerate_bench(c: &mut Criterion) {
    let table = ConstraintTable::default();

    c.bench_function("enumerate_with_loose_ends", |b| {
        b.iter(|| black_box(enumerate_with_loose_ends(&table).count()));
    });

    c.bench_function("enumerate_without_loose_ends", |b| {
        b.iter(|| black_box(enumerate_without_loose_ends(&table).count()));
    });

    let mut rng = RngHandle::from_seed(7);
    c.bench_function("sample_with_loose_ends", |b| {
        b.iter(|| black_box(nbs_space::sample_with_loose_ends(&table, &mut rng)));
    });
}

criterion_group!(benches, enumerate_bench);
criterion_main!(benches);
