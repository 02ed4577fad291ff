//! Algorithm Throughput Benchmarks
//!
//! Runs every practical algorithm on unpaced buffers so that the numbers reflect
//! the cost of the algorithms plus the buffer's bookkeeping, not the pacing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Duration;

use sortlab::{DataOrdering, ObservableBuffer, Sorter, SortingAlgorithm};

#[cfg(not(feature = "full-benchmarks"))]
const SIZES: [usize; 2] = [256, 1024];
#[cfg(feature = "full-benchmarks")]
const SIZES: [usize; 4] = [256, 1024, 4096, 16384];

/// Quadratic algorithms are only measured on the smallest size
fn is_quadratic(algorithm: SortingAlgorithm) -> bool {
    matches!(
        algorithm,
        SortingAlgorithm::Selection
            | SortingAlgorithm::Bubble
            | SortingAlgorithm::Shaker
            | SortingAlgorithm::ShakerDuplicates
            | SortingAlgorithm::Insertion
    )
}

fn generate(ordering: DataOrdering, size: usize) -> Vec<i32> {
    let mut rng = SmallRng::seed_from_u64(0xBEEF);
    ordering
        .generate(size, 1 << 20, &mut rng)
        .expect("benchmark sizes are positive")
}

fn run(algorithm: SortingAlgorithm, values: Vec<i32>) -> ObservableBuffer {
    let buffer = ObservableBuffer::unpaced(values);
    algorithm
        .new_seeded_instance(1)
        .sort(&buffer)
        .expect("unpaced runs are never cancelled");
    buffer
}

fn random_input_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_input");
    group.measurement_time(Duration::from_secs(5));

    for size in SIZES {
        let input = generate(DataOrdering::Random, size);
        group.throughput(Throughput::Elements(size as u64));

        for algorithm in SortingAlgorithm::ALL {
            if algorithm.is_impractical() || (is_quadratic(algorithm) && size > SIZES[0]) {
                continue;
            }
            group.bench_with_input(
                BenchmarkId::new(algorithm.identifier(), size),
                &input,
                |b, input| {
                    b.iter(|| black_box(run(algorithm, input.clone())));
                },
            );
        }
    }

    group.finish();
}

/// Adaptive algorithms against their non-adaptive counterparts on presorted data
fn presorted_input_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("presorted_input");
    let size = SIZES[SIZES.len() - 1];
    group.throughput(Throughput::Elements(size as u64));

    for ordering in [DataOrdering::AlmostSorted, DataOrdering::SawTeeth] {
        let input = generate(ordering, size);
        for algorithm in [
            SortingAlgorithm::Heap,
            SortingAlgorithm::Smooth,
            SortingAlgorithm::Merge,
            SortingAlgorithm::NaturalMerge,
            SortingAlgorithm::RunStackMerge,
            SortingAlgorithm::ExtendedRunsMerge,
        ] {
            group.bench_with_input(
                BenchmarkId::new(algorithm.identifier(), ordering.identifier()),
                &input,
                |b, input| {
                    b.iter(|| black_box(run(algorithm, input.clone())));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, random_input_benchmark, presorted_input_benchmark);
criterion_main!(benches);
