//! Quicksort assembled from pluggable strategies

use crate::engine::algorithms::insertion::insertion_sort_range;
use crate::engine::strategy::{PartitionStrategy, PivotStrategy, RecursionEnd};
use crate::engine::{ObservableBuffer, Result, Sorter};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// How the two partitions of a range are processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Driver {
    /// Recurse into both partitions
    Recursive,
    /// Recurse into the smaller partition and loop on the larger one,
    /// bounding the recursion depth logarithmically
    Iterative,
}

/// Quicksort parameterized by its recursion end, pivot and partition strategies
#[derive(Debug, Clone)]
pub struct QuickSort {
    end: RecursionEnd,
    pivot: PivotStrategy,
    partition: PartitionStrategy,
    driver: Driver,
    rng: SmallRng,
}

impl QuickSort {
    /// Create a new quicksort from its strategies
    ///
    /// The random pivot strategy draws from a generator seeded by the OS.
    pub fn new(
        end: RecursionEnd,
        pivot: PivotStrategy,
        partition: PartitionStrategy,
        driver: Driver,
    ) -> Self {
        Self {
            end,
            pivot,
            partition,
            driver,
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Replace the random generator with a seeded one for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// First element as pivot, naive partition
    pub fn naive() -> Self {
        Self::new(
            RecursionEnd::AtMostOne,
            PivotStrategy::First,
            PartitionStrategy::Naive,
            Driver::Recursive,
        )
    }

    /// Iterative driver using logarithmic stack space
    pub fn log_space() -> Self {
        Self::new(
            RecursionEnd::InsertionFallback,
            PivotStrategy::MedianOfThree,
            PartitionStrategy::PivotsLeft,
            Driver::Iterative,
        )
    }

    pub fn random_pivot() -> Self {
        Self::new(
            RecursionEnd::AtMostOne,
            PivotStrategy::Random,
            PartitionStrategy::PivotsLeft,
            Driver::Recursive,
        )
    }

    pub fn median_of_three() -> Self {
        Self::new(
            RecursionEnd::AtMostOne,
            PivotStrategy::MedianOfThree,
            PartitionStrategy::PivotsMid,
            Driver::Recursive,
        )
    }

    pub fn insertion_fallback() -> Self {
        Self::new(
            RecursionEnd::InsertionFallback,
            PivotStrategy::MedianOfThree,
            PartitionStrategy::PivotsLeft,
            Driver::Recursive,
        )
    }

    /// Median-of-medians pivot, guaranteeing O(n log n) comparisons
    pub fn median_of_medians() -> Self {
        Self::new(
            RecursionEnd::InsertionFallback,
            PivotStrategy::MedianOfMedians,
            PartitionStrategy::PivotsLeft,
            Driver::Recursive,
        )
    }

    pub fn driver(&self) -> Driver {
        self.driver
    }

    /// Move the chosen pivot to `start` and partition around it
    fn split(
        &mut self,
        buffer: &ObservableBuffer,
        start: usize,
        end: usize,
    ) -> Result<(usize, usize)> {
        let pivot = self.pivot.pivot_position(&mut self.rng, buffer, start, end)?;
        buffer.swap(start, pivot)?;
        self.partition.partition(buffer, start, end)
    }

    fn sort_recursive(
        &mut self,
        buffer: &ObservableBuffer,
        start: usize,
        end: usize,
    ) -> Result<()> {
        if self.end.finish(buffer, start, end)? {
            return Ok(());
        }
        buffer.push_range(start, end);
        let (left_end, right_start) = self.split(buffer, start, end)?;
        self.sort_recursive(buffer, start, left_end)?;
        self.sort_recursive(buffer, right_start, end)?;
        buffer.pop_range()
    }

    fn sort_iterative(
        &mut self,
        buffer: &ObservableBuffer,
        start: usize,
        end: usize,
    ) -> Result<()> {
        buffer.push_range(start, end);
        let mut from = start;
        let mut to = end;
        while !self.end.finish(buffer, from, to)? {
            let (left_end, right_start) = self.split(buffer, from, to)?;
            if left_end - from <= to - right_start {
                self.sort_iterative(buffer, from, left_end)?;
                from = right_start;
            } else {
                self.sort_iterative(buffer, right_start, to)?;
                to = left_end;
            }
            buffer.modify_range(0, from, to)?;
        }
        buffer.pop_range()?;
        insertion_sort_range(buffer, from, to)
    }
}

impl Sorter for QuickSort {
    fn sort(&mut self, buffer: &ObservableBuffer) -> Result<()> {
        match self.driver {
            Driver::Recursive => self.sort_recursive(buffer, 0, buffer.len()),
            Driver::Iterative => self.sort_iterative(buffer, 0, buffer.len()),
        }
    }
}
