//! Quicksort Strategy Implementation
//!
//! This module provides the three independent policies a [`QuickSort`] is
//! assembled from: when to stop recursing, how to choose the pivot and how to
//! partition around it. Each policy is a plain enum with one method, so any
//! combination of them forms a valid sorter.
//!
//! [`QuickSort`]: crate::engine::algorithms::QuickSort

use crate::engine::algorithms::insertion::insertion_sort_range;
use crate::engine::{ObservableBuffer, Result};
use rand::rngs::SmallRng;
use rand::Rng;
use std::cmp::Ordering;

/// Length up to which a range counts as small
///
/// Small ranges are finished by insertion sort, and median-of-medians groups
/// values into blocks of this size.
pub const SMALL_LIMIT: usize = 7;

/// Policy deciding when the recursive descent stops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecursionEnd {
    /// Stop on ranges with fewer than two values
    AtMostOne,
    /// Insertion-sort ranges of at most [`SMALL_LIMIT`] values and stop
    InsertionFallback,
}

impl RecursionEnd {
    /// Decide whether `[start, end)` needs no further partitioning
    ///
    /// # Returns
    /// True if the range is sorted after this call and recursion should stop
    ///
    /// # Errors
    /// Propagates cancellation from the insertion sort fallback
    pub fn finish(&self, buffer: &ObservableBuffer, start: usize, end: usize) -> Result<bool> {
        match self {
            RecursionEnd::AtMostOne => Ok(end - start < 2),
            RecursionEnd::InsertionFallback => {
                if end - start <= SMALL_LIMIT {
                    insertion_sort_range(buffer, start, end)?;
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
        }
    }
}

/// Policy choosing the pivot of a range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PivotStrategy {
    /// The first value of the range
    First,
    /// A uniformly random value of the range
    Random,
    /// The median of the first, middle and last value
    MedianOfThree,
    /// The median of the medians of blocks of [`SMALL_LIMIT`] values, recursively
    ///
    /// Reorders the range: the block medians are gathered at its front.
    MedianOfMedians,
}

impl PivotStrategy {
    /// Choose the position of the pivot in the non-empty range `[start, end)`
    ///
    /// # Arguments
    /// * `rng` - Random source, only used by [`PivotStrategy::Random`]
    /// * `buffer` - The buffer being sorted
    /// * `start` - First index of the range
    /// * `end` - One past the last index of the range
    ///
    /// # Errors
    /// Propagates cancellation from the comparisons and swaps performed
    pub fn pivot_position(
        &self,
        rng: &mut SmallRng,
        buffer: &ObservableBuffer,
        start: usize,
        end: usize,
    ) -> Result<usize> {
        match self {
            PivotStrategy::First => Ok(start),
            PivotStrategy::Random => Ok(rng.random_range(start..end)),
            PivotStrategy::MedianOfThree => median_of_three(buffer, start, end),
            PivotStrategy::MedianOfMedians => median_of_medians(buffer, start, end),
        }
    }
}

fn median_of_three(buffer: &ObservableBuffer, start: usize, end: usize) -> Result<usize> {
    let a = start;
    let b = start + (end - start) / 2;
    let c = end - 1;
    let pos = if buffer.compare(a, b)? == Ordering::Less {
        if buffer.compare(b, c)? == Ordering::Less {
            b
        } else if buffer.compare(c, a)? == Ordering::Less {
            a
        } else {
            c
        }
    } else if buffer.compare(b, c)? == Ordering::Greater {
        b
    } else if buffer.compare(c, a)? == Ordering::Greater {
        a
    } else {
        c
    };
    Ok(pos)
}

fn median_of_medians(buffer: &ObservableBuffer, start: usize, end: usize) -> Result<usize> {
    let n = end - start;
    if n <= SMALL_LIMIT {
        insertion_sort_range(buffer, start, end)?;
        let mid = start + n / 2;
        buffer.set_special(Some(mid));
        return Ok(mid);
    }

    buffer.push_range(0, 0);
    buffer.push_range(0, 0);
    let parts = (n + SMALL_LIMIT - 1) / SMALL_LIMIT;
    for i in 0..parts {
        let offset = start + SMALL_LIMIT * i;
        let block = SMALL_LIMIT.min(end - offset);
        buffer.modify_range(0, offset, offset + block)?;
        let pos = median_of_medians(buffer, offset, offset + block)?;
        buffer.modify_range(1, start, start + i + 1)?;
        buffer.swap(start + i, pos)?;
    }
    buffer.pop_range()?;
    buffer.modify_range(0, start, start + parts)?;
    let median = median_of_medians(buffer, start, start + parts)?;
    buffer.set_special(Some(median));
    buffer.pop_range()?;
    Ok(median)
}

/// Policy partitioning a range around the pivot stored at its start
///
/// Every strategy returns `(left_end, right_start)`: `[start, left_end)` holds
/// the values on the pivot's left, `[right_start, end)` the values greater than
/// the pivot, and everything in between equals the pivot and is in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartitionStrategy {
    /// Hoare-style partition treating values equal to the pivot as smaller
    ///
    /// Only the pivot itself ends up between the two parts.
    Naive,
    /// Three-way partition keeping the pivot block in the middle while scanning
    PivotsMid,
    /// Three-way partition gathering values equal to the pivot at the left end,
    /// then rotating them into the middle
    PivotsLeft,
}

impl PartitionStrategy {
    /// Partition `[start, end)` around `values[start]`
    ///
    /// # Errors
    /// Propagates cancellation and highlight stack errors
    pub fn partition(
        &self,
        buffer: &ObservableBuffer,
        start: usize,
        end: usize,
    ) -> Result<(usize, usize)> {
        buffer.set_special(Some(start));
        let bounds = match self {
            PartitionStrategy::Naive => partition_naive(buffer, start, end)?,
            PartitionStrategy::PivotsMid => partition_pivots_mid(buffer, start, end)?,
            PartitionStrategy::PivotsLeft => partition_pivots_left(buffer, start, end)?,
        };
        buffer.set_special(None);
        Ok(bounds)
    }
}

fn partition_naive(buffer: &ObservableBuffer, start: usize, end: usize) -> Result<(usize, usize)> {
    let mut l = start + 1;
    let mut r = end - 1;
    buffer.push_range(l, r + 1);
    loop {
        while l <= r && buffer.compare(l, start)? != Ordering::Greater {
            l += 1;
            buffer.modify_range(0, l, r + 1)?;
        }
        while l <= r && buffer.compare(r, start)? == Ordering::Greater {
            r -= 1;
            buffer.modify_range(0, l, r + 1)?;
        }
        if l > r {
            break;
        }
        buffer.swap(l, r)?;
        l += 1;
        r -= 1;
        buffer.modify_range(0, l, r + 1)?;
    }
    buffer.swap(start, r)?;
    buffer.pop_range()?;
    Ok((r, l))
}

fn partition_pivots_mid(
    buffer: &ObservableBuffer,
    start: usize,
    end: usize,
) -> Result<(usize, usize)> {
    // [start, l) smaller, [l, m) equal, [m, r) unknown, [r, end) greater
    let mut l = start;
    let mut m = start + 1;
    let mut r = end;
    buffer.push_range(m, r);
    loop {
        while m < r && buffer.compare(r - 1, m - 1)? == Ordering::Greater {
            r -= 1;
            buffer.modify_range(0, m, r)?;
        }
        while m < r {
            match buffer.compare(m, m - 1)? {
                Ordering::Less => {
                    buffer.swap(l, m)?;
                    l += 1;
                    m += 1;
                }
                Ordering::Equal => m += 1,
                Ordering::Greater => break,
            }
            buffer.modify_range(0, m, r)?;
        }
        if m >= r {
            break;
        }
        r -= 1;
        buffer.swap(m, r)?;
        buffer.modify_range(0, m, r)?;
    }
    buffer.pop_range()?;
    Ok((l, r))
}

fn partition_pivots_left(
    buffer: &ObservableBuffer,
    start: usize,
    end: usize,
) -> Result<(usize, usize)> {
    // [start, pivots_end) equal, [pivots_end, less_end) smaller,
    // [less_end, greater_start) unknown, [greater_start, end) greater
    let mut pivots_end = start + 1;
    let mut less_end = pivots_end;
    let mut greater_start = end;
    buffer.push_range(pivots_end, greater_start);
    loop {
        while less_end < greater_start
            && buffer.compare(greater_start - 1, pivots_end - 1)? == Ordering::Greater
        {
            greater_start -= 1;
            buffer.modify_range(0, less_end, greater_start)?;
        }
        while less_end < greater_start {
            match buffer.compare(less_end, pivots_end - 1)? {
                Ordering::Equal => {
                    buffer.swap(pivots_end, less_end)?;
                    pivots_end += 1;
                    less_end += 1;
                }
                Ordering::Less => less_end += 1,
                Ordering::Greater => break,
            }
            buffer.modify_range(0, less_end, greater_start)?;
        }
        if less_end >= greater_start {
            break;
        }
        greater_start -= 1;
        buffer.swap(less_end, greater_start)?;
        buffer.modify_range(0, less_end, greater_start)?;
    }
    buffer.pop_range()?;

    // rotate the pivot block behind the smaller values
    let moved = (pivots_end - start).min(less_end - pivots_end);
    for i in 0..moved {
        buffer.swap(start + i, less_end - 1 - i)?;
    }
    Ok((start + less_end - pivots_end, greater_start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn check_partition(strategy: PartitionStrategy, input: Vec<i32>) {
        let pivot = input[0];
        let n = input.len();
        let buffer = ObservableBuffer::unpaced(input.clone());
        let (left_end, right_start) = strategy.partition(&buffer, 0, n).unwrap();
        let values = buffer.to_vec();

        assert!(left_end < right_start, "pivot block must not be empty");
        assert!(values[..left_end].iter().all(|&v| v <= pivot), "{strategy:?}: {values:?}");
        assert!(
            values[left_end..right_start].iter().all(|&v| v == pivot),
            "{strategy:?}: {values:?}"
        );
        assert!(values[right_start..].iter().all(|&v| v > pivot), "{strategy:?}: {values:?}");

        let mut sorted_in = input;
        let mut sorted_out = values;
        sorted_in.sort_unstable();
        sorted_out.sort_unstable();
        assert_eq!(sorted_in, sorted_out);
        assert_eq!(buffer.range_depth(), 0);
    }

    #[test]
    fn test_partitions_split_around_pivot() {
        let inputs = vec![
            vec![5, 3, 8, 5, 1, 9, 5, 2],
            vec![1, 2, 3, 4],
            vec![4, 3, 2, 1],
            vec![2, 2, 2, 2],
            vec![3, 7],
            vec![7, 3],
        ];
        for strategy in [
            PartitionStrategy::Naive,
            PartitionStrategy::PivotsMid,
            PartitionStrategy::PivotsLeft,
        ] {
            for input in &inputs {
                check_partition(strategy, input.clone());
            }
        }
    }

    #[test]
    fn test_three_way_partitions_group_equal_values() {
        for strategy in [PartitionStrategy::PivotsMid, PartitionStrategy::PivotsLeft] {
            let buffer = ObservableBuffer::unpaced(vec![5, 3, 8, 5, 1, 9, 5, 2]);
            let (left_end, right_start) = strategy.partition(&buffer, 0, 8).unwrap();
            assert_eq!((left_end, right_start), (3, 6), "{strategy:?}");
            let values = buffer.to_vec();
            assert!(values[..3].iter().all(|&v| v < 5));
        }
    }

    #[test]
    fn test_median_of_three() {
        let mut rng = SmallRng::seed_from_u64(1);
        for (input, median) in [
            (vec![1, 9, 9, 9, 5], 5),
            (vec![5, 0, 1, 0, 9], 5),
            (vec![9, 0, 0, 0, 1], 1),
        ] {
            let buffer = ObservableBuffer::unpaced(input);
            let pos = PivotStrategy::MedianOfThree
                .pivot_position(&mut rng, &buffer, 0, 5)
                .unwrap();
            assert_eq!(buffer.value(pos), median);
        }
    }

    #[test]
    fn test_median_of_medians_is_central() {
        let mut rng = SmallRng::seed_from_u64(7);
        let n = 343;
        let input: Vec<i32> = (0..n).map(|i| (i * 101) % n).collect();
        let buffer = ObservableBuffer::unpaced(input);
        let pos = PivotStrategy::MedianOfMedians
            .pivot_position(&mut rng, &buffer, 0, n as usize)
            .unwrap();
        let pivot = buffer.value(pos);
        // Two levels of block medians: at least 4 * 4 * 4 values on either side
        assert!(pivot >= 63 && pivot < n - 63, "pivot {pivot}");
        assert_eq!(buffer.range_depth(), 0);
    }

    #[test]
    fn test_random_pivot_stays_in_range() {
        let mut rng = SmallRng::seed_from_u64(3);
        let buffer = ObservableBuffer::unpaced(vec![0; 20]);
        for _ in 0..100 {
            let pos = PivotStrategy::Random
                .pivot_position(&mut rng, &buffer, 5, 12)
                .unwrap();
            assert!((5..12).contains(&pos));
        }
    }

    #[test]
    fn test_insertion_fallback_sorts_small_ranges() {
        let buffer = ObservableBuffer::unpaced(vec![9, 3, 2, 1, 0]);
        assert!(RecursionEnd::InsertionFallback.finish(&buffer, 1, 5).unwrap());
        assert_eq!(buffer.to_vec(), vec![9, 0, 1, 2, 3]);

        let buffer = ObservableBuffer::unpaced((0..20).rev().collect());
        assert!(!RecursionEnd::InsertionFallback.finish(&buffer, 0, 20).unwrap());
        assert!(!RecursionEnd::AtMostOne.finish(&buffer, 0, 2).unwrap());
        assert!(RecursionEnd::AtMostOne.finish(&buffer, 3, 4).unwrap());
    }
}
