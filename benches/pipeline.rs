//! Pipeline benchmarks.
//!
//! - Single-record prediction through encode → assemble → forest
//! - Training on synthetic corpora of increasing size
//! - Artifact encode/decode

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use price_boost::persist;
use price_boost::testing::{scenario_query, synthetic_records};
use price_boost::{ModelArtifact, TrainConfig};

fn bench_config(n_threads: usize) -> TrainConfig {
    TrainConfig::builder()
        .n_trees(50)
        .n_threads(n_threads)
        .build()
        .unwrap_or_default()
}

// =============================================================================
// Prediction
// =============================================================================

fn bench_predict(c: &mut Criterion) {
    let artifact = ModelArtifact::train(&synthetic_records(2_000, 42), &bench_config(0)).unwrap();
    let query = scenario_query();
    let features = artifact.assemble(&query);

    let mut group = c.benchmark_group("predict");
    group.bench_function("record", |b| b.iter(|| artifact.predict(black_box(&query))));
    group.bench_function("features", |b| {
        b.iter(|| artifact.predict_features(black_box(&features)))
    });
    group.finish();
}

// =============================================================================
// Training
// =============================================================================

fn bench_train(c: &mut Criterion) {
    let mut group = c.benchmark_group("train");
    group.sample_size(10);

    for n_rows in [500, 2_000, 10_000] {
        let records = synthetic_records(n_rows, 7);
        group.throughput(Throughput::Elements(n_rows as u64));
        for (name, threads) in [("sequential", 1), ("parallel", 0)] {
            let config = bench_config(threads);
            group.bench_with_input(BenchmarkId::new(name, n_rows), &records, |b, records| {
                b.iter(|| ModelArtifact::train(black_box(records), &config).unwrap())
            });
        }
    }
    group.finish();
}

// =============================================================================
// Persistence
// =============================================================================

fn bench_persist(c: &mut Criterion) {
    let artifact = ModelArtifact::train(&synthetic_records(2_000, 3), &bench_config(0)).unwrap();
    let bytes = persist::to_bytes(&artifact).unwrap();

    let mut group = c.benchmark_group("persist");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("encode", |b| b.iter(|| persist::to_bytes(black_box(&artifact)).unwrap()));
    group.bench_function("decode", |b| b.iter(|| persist::from_bytes(black_box(&bytes)).unwrap()));
    group.finish();
}

criterion_group!(benches, bench_predict, bench_train, bench_persist);
criterion_main!(benches);
