//! Pacing Overhead Benchmarks
//!
//! Measures the cost of a single elementary operation under the different
//! pacing strategies with a zero delay, and the cost of starting and joining a
//! session run.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use std::time::Duration;

use sortlab::{
    CancelToken, DialPacing, EngineConfig, FixedPacing, NoPacing, ObservableBuffer,
    PacingControl, PacingStrategy, SortSession, SortingAlgorithm,
};

const VALUES: usize = 1024;

fn buffer_with(pacing: Arc<dyn PacingStrategy>) -> ObservableBuffer {
    ObservableBuffer::new((0..VALUES as i32).rev().collect(), pacing, CancelToken::new())
}

fn operation_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("elementary_operation");

    let strategies: [(&str, Arc<dyn PacingStrategy>); 3] = [
        ("none", Arc::new(NoPacing::new())),
        ("fixed_zero", Arc::new(FixedPacing::new(Duration::ZERO))),
        ("dial_zero", Arc::new(DialPacing::new(Arc::new(PacingControl::new(0, 50))))),
    ];

    for (name, pacing) in strategies {
        let buffer = buffer_with(pacing);
        group.bench_function(BenchmarkId::new("compare", name), |b| {
            let mut i = 0;
            b.iter(|| {
                i = (i + 1) % (VALUES - 1);
                black_box(buffer.compare(i, i + 1).expect("never cancelled"))
            });
        });
        group.bench_function(BenchmarkId::new("swap", name), |b| {
            let mut i = 0;
            b.iter(|| {
                i = (i + 1) % (VALUES - 1);
                buffer.swap(i, i + 1).expect("never cancelled");
            });
        });
    }

    group.finish();
}

fn session_benchmark(c: &mut Criterion) {
    let mut config = EngineConfig::default();
    config.pacing.delay = 0;
    let mut session = SortSession::new(config).expect("default config is valid");

    c.bench_function("session_start_and_wait", |b| {
        b.iter(|| {
            session
                .start(SortingAlgorithm::Heap, (0..256).rev().collect())
                .expect("worker spawns");
            black_box(session.wait())
        });
    });
}

criterion_group!(benches, operation_benchmark, session_benchmark);
criterion_main!(benches);
