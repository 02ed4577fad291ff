#![allow(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]

//! Integration tests for the algorithm registry
//!
//! These tests run every registered algorithm through the public API against
//! generated data and check the bookkeeping a renderer relies on.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use sortlab::engine::algorithms::natural_runs;
use sortlab::{
    is_sorted, ArrayId, BufferStats, DataOrdering, EngineError, ObservableBuffer,
    SortingAlgorithm,
};

fn sort(algorithm: SortingAlgorithm, values: Vec<i32>) -> (Vec<i32>, BufferStats) {
    let buffer = ObservableBuffer::unpaced(values);
    algorithm
        .new_seeded_instance(42)
        .sort(&buffer)
        .unwrap_or_else(|e| panic!("{algorithm} failed: {e}"));
    assert_eq!(buffer.range_depth(), 0, "{algorithm} left ranges behind");
    assert!(!buffer.has_auxiliary(), "{algorithm} left its auxiliary array");
    let stats = buffer.stats();
    (buffer.into_values(), stats)
}

fn practical() -> impl Iterator<Item = SortingAlgorithm> {
    SortingAlgorithm::ALL
        .into_iter()
        .filter(|algorithm| !algorithm.is_impractical())
}

#[test]
fn test_every_algorithm_sorts_every_ordering() {
    let mut rng = SmallRng::seed_from_u64(2024);
    for ordering in DataOrdering::ALL {
        for count in [1, 2, 17, 256, 1000] {
            let values = ordering.generate(count, 500, &mut rng).unwrap();
            let mut expected = values.clone();
            expected.sort_unstable();

            for algorithm in practical() {
                let (output, stats) = sort(algorithm, values.clone());
                assert_eq!(output, expected, "{algorithm} on {ordering} ({count} values)");
                assert!(stats.ranges_balanced(), "{algorithm}: {stats:?}");
                assert!(stats.auxiliary_balanced(), "{algorithm}: {stats:?}");
            }
        }
    }
}

#[test]
fn test_impractical_algorithms_on_tiny_inputs() {
    for algorithm in [SortingAlgorithm::Slow, SortingAlgorithm::Bogo] {
        assert_eq!(sort(algorithm, vec![5, 3, 1, 4, 2]).0, vec![1, 2, 3, 4, 5]);
        assert_eq!(sort(algorithm, vec![]).0, Vec::<i32>::new());
        assert_eq!(sort(algorithm, vec![2, 2, 2]).0, vec![2, 2, 2]);
    }
}

#[test]
fn test_reference_examples() {
    for algorithm in SortingAlgorithm::ALL {
        assert_eq!(
            sort(algorithm, vec![5, 3, 1, 4, 2]).0,
            vec![1, 2, 3, 4, 5],
            "{algorithm}"
        );
        assert!(sort(algorithm, vec![]).0.is_empty(), "{algorithm}");
        assert_eq!(sort(algorithm, vec![9]).0, vec![9], "{algorithm}");
    }
}

#[test]
fn test_equal_values_are_left_alone_by_short_circuiting_algorithms() {
    for algorithm in [
        SortingAlgorithm::Selection,
        SortingAlgorithm::Bubble,
        SortingAlgorithm::Shaker,
        SortingAlgorithm::ShakerDuplicates,
        SortingAlgorithm::Comb,
        SortingAlgorithm::Insertion,
        SortingAlgorithm::Shell,
        SortingAlgorithm::NaturalMerge,
        SortingAlgorithm::RunStackMerge,
        SortingAlgorithm::RadixMsd,
        SortingAlgorithm::RadixLsd,
        SortingAlgorithm::Slow,
        SortingAlgorithm::Bogo,
    ] {
        let (output, stats) = sort(algorithm, vec![2, 2, 2]);
        assert_eq!(output, vec![2, 2, 2]);
        assert_eq!(stats.swaps, 0, "{algorithm}");
        assert_eq!(stats.writes, 0, "{algorithm}");
    }
}

#[test]
fn test_radix_sorts_agree_with_comparison_sorts() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut values = DataOrdering::Random
        .generate(2000, i32::MAX, &mut rng)
        .unwrap();
    // Mix in negative values and the extremes
    for (i, value) in values.iter_mut().enumerate().step_by(3) {
        *value = -*value;
        if i % 300 == 0 {
            *value = i32::MIN;
        }
    }
    values.push(i32::MAX);

    let (reference, _) = sort(SortingAlgorithm::Heap, values.clone());
    assert!(is_sorted(&reference));

    let (lsd, lsd_stats) = sort(SortingAlgorithm::RadixLsd, values.clone());
    let (msd, _) = sort(SortingAlgorithm::RadixMsd, values);
    assert_eq!(lsd, reference);
    assert_eq!(msd, reference);
    assert_eq!(lsd_stats.comparisons, 0);
}

#[test]
fn test_auxiliary_algorithms_create_exactly_what_they_destroy() {
    let mut rng = SmallRng::seed_from_u64(99);
    let values = DataOrdering::SawTeeth.generate(500, 1000, &mut rng).unwrap();
    for algorithm in SortingAlgorithm::ALL
        .into_iter()
        .filter(|algorithm| algorithm.uses_auxiliary())
    {
        let (_, stats) = sort(algorithm, values.clone());
        assert!(stats.auxiliary_created >= 1, "{algorithm}");
        assert_eq!(stats.auxiliary_created, stats.auxiliary_destroyed, "{algorithm}");
    }
}

#[test]
fn test_buffer_rejects_auxiliary_misuse() {
    let buffer = ObservableBuffer::unpaced(vec![3, 1, 2]);
    assert!(matches!(
        buffer.destroy_auxiliary(),
        Err(EngineError::InvalidState(_))
    ));

    assert_eq!(buffer.create_auxiliary().unwrap(), ArrayId::Auxiliary);
    assert!(matches!(
        buffer.create_auxiliary(),
        Err(EngineError::InvalidState(_))
    ));
    buffer.destroy_auxiliary().unwrap();
    assert!(matches!(buffer.pop_range(), Err(EngineError::InvalidState(_))));
}

#[test]
fn test_natural_runs_of_reference_input() {
    let runs = natural_runs(&[1, 3, 5, 2, 4, 6]);
    assert_eq!(runs.len(), 2);
}

#[test]
fn test_registry_lookup() {
    assert_eq!(SortingAlgorithm::ALL.len(), 23);
    for algorithm in SortingAlgorithm::ALL {
        assert_eq!(algorithm.identifier().parse::<SortingAlgorithm>(), Ok(algorithm));
        assert_eq!(algorithm.name().parse::<SortingAlgorithm>(), Ok(algorithm));
    }
    assert!("timsort".parse::<SortingAlgorithm>().is_err());
}
