use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use fnv::FnvBuildHasher;
use heavy_hitters::CountMinSketch;
use rand::{thread_rng, Rng};
use rustc_hash::FxHasher;
use std::hash::{BuildHasher, BuildHasherDefault};

const CASES: usize = 1_000_000;

fn keys() -> Vec<u64> {
    let mut rng = thread_rng();
    black_box(
        (0..CASES)
            .map(|i| {
                if i % 2 == 0 {
                    rng.gen::<u64>() % 16384
                } else {
                    rng.gen::<u64>() % 32768
                }
            })
            .collect(),
    )
}

fn bench_with_hasher<S: BuildHasher + Clone>(c: &mut Criterion, name: &str, hasher: S) {
    c.bench_function(name, move |b| {
        b.iter_batched(
            || {
                let cms = CountMinSketch::with_hasher(0.001, 0.001, hasher.clone()).unwrap();
                (cms, keys())
            },
            |(mut cms, keys)| {
                keys.iter().for_each(|k| {
                    cms.add(k, 1);
                });
                keys.iter().for_each(|k| {
                    black_box(cms.estimate(k));
                });
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_count_min_sketch_default_hasher(c: &mut Criterion) {
    bench_with_hasher(
        c,
        "Test CountMinSketch add/estimate default hasher",
        heavy_hitters::DefaultHashBuilder::default(),
    );
}

fn bench_count_min_sketch_fx_hasher(c: &mut Criterion) {
    bench_with_hasher(
        c,
        "Test CountMinSketch add/estimate FX hasher",
        BuildHasherDefault::<FxHasher>::default(),
    );
}

fn bench_count_min_sketch_fnv_hasher(c: &mut Criterion) {
    bench_with_hasher(
        c,
        "Test CountMinSketch add/estimate FNV hasher",
        FnvBuildHasher::default(),
    );
}

criterion_group!(
    count_min_sketch,
    bench_count_min_sketch_default_hasher,
    bench_count_min_sketch_fx_hasher,
    bench_count_min_sketch_fnv_hasher
);

criterion_main!(count_min_sketch);
