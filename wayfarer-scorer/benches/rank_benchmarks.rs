//! Criterion benchmarks for batch ranking.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package wayfarer-scorer
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use wayfarer_core::{Preference, PreferenceSet};
use wayfarer_scorer::rank;

mod bench_support;

use bench_support::{BENCHMARK_SEED, generate_batch};

/// Batch sizes to benchmark.
const BATCH_SIZES: &[usize] = &[3, 10, 100];

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    let preferences: PreferenceSet = [Preference::Fastest, Preference::AvoidToll]
        .into_iter()
        .collect();

    for &size in BATCH_SIZES {
        let batch = generate_batch(size, BENCHMARK_SEED);
        let throughput_size = u64::try_from(size).unwrap_or(u64::MAX);
        group.throughput(Throughput::Elements(throughput_size));
        group.bench_with_input(BenchmarkId::new("candidates", size), &batch, |b, batch| {
            b.iter_batched(
                || batch.clone(),
                |input| rank(input, &preferences),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rank);
criterion_main!(benches);
