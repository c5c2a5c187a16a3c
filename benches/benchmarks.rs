//! Benchmarks for streamhist
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use streamhist::histogram::Histogram;
use streamhist::traits::{QuantileSketch, Sketch};

/// Deterministic pseudo-random stream spread over [0, 1000)
fn stream(i: u64) -> f64 {
    (i.wrapping_mul(2_654_435_761) % 1_000_000) as f64 / 1000.0
}

fn filled(max_bins: usize, alpha: f64) -> Histogram {
    let mut hist = Histogram::with_decay(max_bins, alpha);
    for i in 0..100_000u64 {
        hist.add(stream(i));
    }
    hist
}

// ============================================================================
// Insertion Benchmarks
// ============================================================================

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram_insert");
    group.throughput(Throughput::Elements(1));

    for max_bins in [20, 80, 320] {
        group.bench_function(format!("plain_b{}", max_bins), |b| {
            let mut hist = Histogram::new(max_bins);
            let mut i = 0u64;
            b.iter(|| {
                hist.add(black_box(stream(i)));
                i = i.wrapping_add(1);
            });
        });

        group.bench_function(format!("decayed_b{}", max_bins), |b| {
            let mut hist = Histogram::with_decay(max_bins, 0.99);
            let mut i = 0u64;
            b.iter(|| {
                hist.add(black_box(stream(i)));
                i = i.wrapping_add(1);
            });
        });
    }

    group.finish();
}

// ============================================================================
// Query Benchmarks
// ============================================================================

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram_query");

    let hist = filled(80, 1.0);

    group.bench_function("quantile_p99", |b| {
        b.iter(|| black_box(hist.quantile(black_box(0.99))));
    });

    group.bench_function("cdf", |b| {
        b.iter(|| black_box(hist.cdf(black_box(&500.0))));
    });

    group.bench_function("variance", |b| {
        b.iter(|| black_box(hist.variance()));
    });

    group.bench_function("modes_5", |b| {
        b.iter(|| black_box(hist.modes(5)));
    });

    group.finish();
}

// ============================================================================
// Merge / Export Benchmarks
// ============================================================================

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram_merge");

    let h1 = filled(80, 1.0);
    let mut h2 = Histogram::new(80);
    for i in 0..100_000u64 {
        h2.add(stream(i) + 500.0);
    }

    group.bench_function("merge", |b| {
        b.iter(|| {
            let mut h = h1.clone();
            h.merge(black_box(&h2)).unwrap();
        });
    });

    group.bench_function("export_import", |b| {
        b.iter(|| {
            let state = black_box(&h1).to_state();
            black_box(Histogram::from_state(state).unwrap());
        });
    });

    group.finish();
}

// ============================================================================
// Main
// ============================================================================

criterion_group!(benches, bench_insert, bench_queries, bench_merge);

criterion_main!(benches);
