//! Sorting Algorithm Registry
//!
//! This module provides the `SortingAlgorithm` enum, the closed set of
//! algorithms a front end can offer. Each entry carries a display name, a flag
//! marking the last entry of a group of related algorithms (used to draw
//! separators in menus) and a factory producing a fresh sorter per run.

use crate::engine::algorithms::{
    BogoSort, BubbleSort, CombSort, DuplicateShakerSort, ExtendedRunsMergeSort, HeapSort,
    InsertionSort, MergeSort, NaturalMergeSort, QuickSort, RadixSortLsd, RadixSortMsd,
    RunStackMergeSort, SelectionSort, ShakerSort, ShellSort, SlowSort, SmoothSort,
};
use crate::engine::Sorter;
use serde::{Deserialize, Serialize};

/// The available sorting algorithms, in menu order
///
/// # Examples
/// ```
/// use sortlab::engine::SortingAlgorithm;
///
/// let algorithm: SortingAlgorithm = "quick_median_of_three".parse().unwrap();
/// assert_eq!(algorithm.name(), "Quick Sort (median of 3)");
/// assert_eq!(algorithm, "Quick Sort (median of 3)".parse().unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortingAlgorithm {
    Selection,
    Bubble,
    Shaker,
    /// Shaker sort moving blocks of equal values at once
    ShakerDuplicates,
    Comb,
    #[default]
    Insertion,
    Shell,
    /// First element as pivot, naive partition
    QuickNaive,
    /// Iterative driver with logarithmic stack depth
    QuickLogSpace,
    QuickRandom,
    QuickMedianOfThree,
    QuickInsertion,
    QuickMedianOfMedians,
    Merge,
    NaturalMerge,
    RunStackMerge,
    ExtendedRunsMerge,
    Heap,
    Smooth,
    RadixMsd,
    RadixLsd,
    Slow,
    Bogo,
}

impl SortingAlgorithm {
    /// All algorithms in menu order
    pub const ALL: [SortingAlgorithm; 23] = [
        SortingAlgorithm::Selection,
        SortingAlgorithm::Bubble,
        SortingAlgorithm::Shaker,
        SortingAlgorithm::ShakerDuplicates,
        SortingAlgorithm::Comb,
        SortingAlgorithm::Insertion,
        SortingAlgorithm::Shell,
        SortingAlgorithm::QuickNaive,
        SortingAlgorithm::QuickLogSpace,
        SortingAlgorithm::QuickRandom,
        SortingAlgorithm::QuickMedianOfThree,
        SortingAlgorithm::QuickInsertion,
        SortingAlgorithm::QuickMedianOfMedians,
        SortingAlgorithm::Merge,
        SortingAlgorithm::NaturalMerge,
        SortingAlgorithm::RunStackMerge,
        SortingAlgorithm::ExtendedRunsMerge,
        SortingAlgorithm::Heap,
        SortingAlgorithm::Smooth,
        SortingAlgorithm::RadixMsd,
        SortingAlgorithm::RadixLsd,
        SortingAlgorithm::Slow,
        SortingAlgorithm::Bogo,
    ];

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            SortingAlgorithm::Selection => "Selection Sort",
            SortingAlgorithm::Bubble => "Bubble Sort",
            SortingAlgorithm::Shaker => "Shaker Sort",
            SortingAlgorithm::ShakerDuplicates => "Shaker Sort (opt. for duplicates)",
            SortingAlgorithm::Comb => "Comb Sort",
            SortingAlgorithm::Insertion => "Insertion Sort",
            SortingAlgorithm::Shell => "Shell Sort",
            SortingAlgorithm::QuickNaive => "Quick Sort",
            SortingAlgorithm::QuickLogSpace => "Quick Sort (log space)",
            SortingAlgorithm::QuickRandom => "Quick Sort (random pivot)",
            SortingAlgorithm::QuickMedianOfThree => "Quick Sort (median of 3)",
            SortingAlgorithm::QuickInsertion => "Quick Sort (falls back to insertion)",
            SortingAlgorithm::QuickMedianOfMedians => "Quick Sort (median of medians)",
            SortingAlgorithm::Merge => "Merge Sort",
            SortingAlgorithm::NaturalMerge => "Natural Merge Sort (up/down)",
            SortingAlgorithm::RunStackMerge => "Run Stack Merge Sort",
            SortingAlgorithm::ExtendedRunsMerge => "Natural Merge Sort (extends runs)",
            SortingAlgorithm::Heap => "Heap Sort",
            SortingAlgorithm::Smooth => "Smooth Sort",
            SortingAlgorithm::RadixMsd => "Radix Sort",
            SortingAlgorithm::RadixLsd => "Radix Sort (least significant bit)",
            SortingAlgorithm::Slow => "Slow Sort",
            SortingAlgorithm::Bogo => "Bogo Sort",
        }
    }

    /// Snake case identifier, as used in configuration files
    pub fn identifier(&self) -> &'static str {
        match self {
            SortingAlgorithm::Selection => "selection",
            SortingAlgorithm::Bubble => "bubble",
            SortingAlgorithm::Shaker => "shaker",
            SortingAlgorithm::ShakerDuplicates => "shaker_duplicates",
            SortingAlgorithm::Comb => "comb",
            SortingAlgorithm::Insertion => "insertion",
            SortingAlgorithm::Shell => "shell",
            SortingAlgorithm::QuickNaive => "quick_naive",
            SortingAlgorithm::QuickLogSpace => "quick_log_space",
            SortingAlgorithm::QuickRandom => "quick_random",
            SortingAlgorithm::QuickMedianOfThree => "quick_median_of_three",
            SortingAlgorithm::QuickInsertion => "quick_insertion",
            SortingAlgorithm::QuickMedianOfMedians => "quick_median_of_medians",
            SortingAlgorithm::Merge => "merge",
            SortingAlgorithm::NaturalMerge => "natural_merge",
            SortingAlgorithm::RunStackMerge => "run_stack_merge",
            SortingAlgorithm::ExtendedRunsMerge => "extended_runs_merge",
            SortingAlgorithm::Heap => "heap",
            SortingAlgorithm::Smooth => "smooth",
            SortingAlgorithm::RadixMsd => "radix_msd",
            SortingAlgorithm::RadixLsd => "radix_lsd",
            SortingAlgorithm::Slow => "slow",
            SortingAlgorithm::Bogo => "bogo",
        }
    }

    /// Returns true if this is the last algorithm of a group of related ones
    pub fn is_end_of_group(&self) -> bool {
        matches!(
            self,
            SortingAlgorithm::Selection
                | SortingAlgorithm::Comb
                | SortingAlgorithm::Shell
                | SortingAlgorithm::QuickMedianOfMedians
                | SortingAlgorithm::ExtendedRunsMerge
                | SortingAlgorithm::Smooth
                | SortingAlgorithm::RadixLsd
                | SortingAlgorithm::Bogo
        )
    }

    /// Returns true if the algorithm creates the auxiliary array
    pub fn uses_auxiliary(&self) -> bool {
        matches!(
            self,
            SortingAlgorithm::Merge
                | SortingAlgorithm::NaturalMerge
                | SortingAlgorithm::RunStackMerge
                | SortingAlgorithm::ExtendedRunsMerge
                | SortingAlgorithm::RadixLsd
        )
    }

    /// Returns true if the algorithm orders values only by comparing them
    pub fn is_comparison_based(&self) -> bool {
        !matches!(self, SortingAlgorithm::RadixMsd | SortingAlgorithm::RadixLsd)
    }

    /// Returns true if the running time makes the algorithm unusable beyond a
    /// few dozen values
    pub fn is_impractical(&self) -> bool {
        matches!(self, SortingAlgorithm::Slow | SortingAlgorithm::Bogo)
    }

    /// Create a fresh sorter for one run
    pub fn new_instance(&self) -> Box<dyn Sorter> {
        match self {
            SortingAlgorithm::Selection => Box::new(SelectionSort::new()),
            SortingAlgorithm::Bubble => Box::new(BubbleSort::new()),
            SortingAlgorithm::Shaker => Box::new(ShakerSort::new()),
            SortingAlgorithm::ShakerDuplicates => Box::new(DuplicateShakerSort::new()),
            SortingAlgorithm::Comb => Box::new(CombSort::new()),
            SortingAlgorithm::Insertion => Box::new(InsertionSort::new()),
            SortingAlgorithm::Shell => Box::new(ShellSort::new()),
            SortingAlgorithm::QuickNaive => Box::new(QuickSort::naive()),
            SortingAlgorithm::QuickLogSpace => Box::new(QuickSort::log_space()),
            SortingAlgorithm::QuickRandom => Box::new(QuickSort::random_pivot()),
            SortingAlgorithm::QuickMedianOfThree => Box::new(QuickSort::median_of_three()),
            SortingAlgorithm::QuickInsertion => Box::new(QuickSort::insertion_fallback()),
            SortingAlgorithm::QuickMedianOfMedians => Box::new(QuickSort::median_of_medians()),
            SortingAlgorithm::Merge => Box::new(MergeSort::new()),
            SortingAlgorithm::NaturalMerge => Box::new(NaturalMergeSort::new()),
            SortingAlgorithm::RunStackMerge => Box::new(RunStackMergeSort::new()),
            SortingAlgorithm::ExtendedRunsMerge => Box::new(ExtendedRunsMergeSort::new()),
            SortingAlgorithm::Heap => Box::new(HeapSort::new()),
            SortingAlgorithm::Smooth => Box::new(SmoothSort::new()),
            SortingAlgorithm::RadixMsd => Box::new(RadixSortMsd::new()),
            SortingAlgorithm::RadixLsd => Box::new(RadixSortLsd::new()),
            SortingAlgorithm::Slow => Box::new(SlowSort::new()),
            SortingAlgorithm::Bogo => Box::new(BogoSort::new()),
        }
    }

    /// Create a fresh sorter whose random choices are derived from `seed`
    ///
    /// Only the randomized algorithms are affected; all others behave exactly
    /// like [`SortingAlgorithm::new_instance`].
    pub fn new_seeded_instance(&self, seed: u64) -> Box<dyn Sorter> {
        match self {
            SortingAlgorithm::QuickRandom => Box::new(QuickSort::random_pivot().with_seed(seed)),
            SortingAlgorithm::Bogo => Box::new(BogoSort::with_seed(seed)),
            other => other.new_instance(),
        }
    }
}

impl std::fmt::Display for SortingAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for SortingAlgorithm {
    type Err = String;

    /// Parse an algorithm from its identifier or its display name, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SortingAlgorithm::ALL
            .into_iter()
            .find(|algorithm| {
                algorithm.identifier() == wanted || algorithm.name().to_lowercase() == wanted
            })
            .ok_or_else(|| format!("Unknown sorting algorithm: '{s}'"))
    }
}
