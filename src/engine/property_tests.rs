//! Property-based tests for the sorting engine
//!
//! These tests use proptest to verify properties that should hold for all inputs

use crate::engine::algorithms::{natural_runs, HeapForest};
use crate::engine::{is_sorted, ObservableBuffer, SortingAlgorithm};
use proptest::prelude::*;

/// Sort `values` with a fresh seeded instance on an unpaced buffer
fn sort_with(algorithm: SortingAlgorithm, values: Vec<i32>) -> ObservableBuffer {
    let buffer = ObservableBuffer::unpaced(values);
    algorithm
        .new_seeded_instance(0xC0FFEE)
        .sort(&buffer)
        .expect("unpaced run cannot be cancelled");
    buffer
}

fn practical_algorithm() -> impl Strategy<Value = SortingAlgorithm> {
    let practical: Vec<SortingAlgorithm> = SortingAlgorithm::ALL
        .into_iter()
        .filter(|algorithm| !algorithm.is_impractical())
        .collect();
    prop::sample::select(practical)
}

fn impractical_algorithm() -> impl Strategy<Value = SortingAlgorithm> {
    prop::sample::select(vec![SortingAlgorithm::Slow, SortingAlgorithm::Bogo])
}

/// Property tests for sorting correctness
mod sorting_properties {
    use super::*;

    proptest! {
        #[test]
        fn output_is_sorted_permutation(
            algorithm in practical_algorithm(),
            values in prop::collection::vec(any::<i32>(), 0..300),
        ) {
            let mut expected = values.clone();
            expected.sort_unstable();

            let buffer = sort_with(algorithm, values);
            prop_assert_eq!(buffer.to_vec(), expected);
        }

        #[test]
        fn few_distinct_values_are_sorted(
            algorithm in practical_algorithm(),
            values in prop::collection::vec(0i32..4, 0..200),
        ) {
            let buffer = sort_with(algorithm, values);
            prop_assert!(is_sorted(&buffer.to_vec()));
        }

        #[test]
        fn bookkeeping_is_balanced(
            algorithm in practical_algorithm(),
            values in prop::collection::vec(-1000i32..1000, 0..200),
        ) {
            let buffer = sort_with(algorithm, values);
            let stats = buffer.stats();
            prop_assert!(stats.ranges_balanced(), "{algorithm}: {stats:?}");
            prop_assert!(stats.auxiliary_balanced(), "{algorithm}: {stats:?}");
            prop_assert_eq!(buffer.range_depth(), 0);
            prop_assert!(!buffer.has_auxiliary());
        }

        #[test]
        fn in_place_algorithms_never_allocate(
            algorithm in practical_algorithm(),
            values in prop::collection::vec(any::<i32>(), 0..100),
        ) {
            prop_assume!(!algorithm.uses_auxiliary());
            let buffer = sort_with(algorithm, values);
            prop_assert_eq!(buffer.stats().auxiliary_created, 0);
        }

        #[test]
        fn sorted_input_needs_no_swaps_for_adaptive_algorithms(
            values in prop::collection::vec(any::<i32>(), 0..200),
        ) {
            let mut sorted = values;
            sorted.sort_unstable();
            for algorithm in [
                SortingAlgorithm::Bubble,
                SortingAlgorithm::Shaker,
                SortingAlgorithm::Insertion,
                SortingAlgorithm::NaturalMerge,
                SortingAlgorithm::RunStackMerge,
            ] {
                let buffer = sort_with(algorithm, sorted.clone());
                prop_assert_eq!(buffer.stats().swaps, 0, "{}", algorithm);
                prop_assert_eq!(buffer.stats().writes, 0, "{}", algorithm);
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn impractical_algorithms_sort_small_inputs(
            algorithm in impractical_algorithm(),
            values in prop::collection::vec(-20i32..20, 0..6),
        ) {
            let mut expected = values.clone();
            expected.sort_unstable();
            let buffer = sort_with(algorithm, values);
            prop_assert_eq!(buffer.to_vec(), expected);
        }
    }
}

/// Property tests for run detection
mod run_properties {
    use super::*;

    proptest! {
        #[test]
        fn runs_tile_the_input(values in prop::collection::vec(-50i32..50, 0..200)) {
            let runs = natural_runs(&values);
            let mut next = 0;
            for run in &runs {
                prop_assert_eq!(run.start, next);
                prop_assert!(!run.is_empty());
                let slice = &values[run.range()];
                if run.descending {
                    prop_assert!(slice.windows(2).all(|w| w[0] > w[1]));
                } else {
                    prop_assert!(is_sorted(slice));
                }
                next = run.end;
            }
            prop_assert_eq!(next, values.len());
        }

        #[test]
        fn sorted_input_is_one_run(values in prop::collection::vec(any::<i32>(), 1..200)) {
            let mut sorted = values;
            sorted.sort_unstable();
            prop_assert_eq!(natural_runs(&sorted).len(), 1);
        }
    }
}

/// Property tests for the Leonardo heap forest
mod forest_properties {
    use super::*;
    use crate::engine::algorithms::smooth::LEONARDO;

    proptest! {
        #[test]
        fn forest_tracks_its_orders(orders in prop::collection::btree_set(0u32..40, 0..12)) {
            let mut forest = HeapForest::new();
            for &order in &orders {
                forest.insert(order);
            }

            prop_assert_eq!(forest.heap_count() as usize, orders.len());
            prop_assert_eq!(forest.is_empty(), orders.is_empty());
            prop_assert_eq!(forest.lowest(), orders.iter().next().copied());
            let expected_len: u64 = orders.iter().map(|&order| LEONARDO[order as usize]).sum();
            prop_assert_eq!(forest.total_len(), expected_len);

            let mut walked = Vec::new();
            let mut current = forest.lowest();
            while let Some(order) = current {
                walked.push(order);
                current = forest.next_above(order);
            }
            prop_assert_eq!(walked, orders.into_iter().collect::<Vec<_>>());
        }
    }
}
