//! Insertion sort, also used as the small-range fallback of other algorithms

use crate::engine::{ObservableBuffer, Result, Sorter};
use std::cmp::Ordering;

/// Insertion sort by adjacent swaps
#[derive(Debug, Default, Clone, Copy)]
pub struct InsertionSort;

impl InsertionSort {
    pub fn new() -> Self {
        Self
    }
}

impl Sorter for InsertionSort {
    fn sort(&mut self, buffer: &ObservableBuffer) -> Result<()> {
        insertion_sort_range(buffer, 0, buffer.len())
    }
}

/// Sort `[start, end)` by insertion
pub(crate) fn insertion_sort_range(
    buffer: &ObservableBuffer,
    start: usize,
    end: usize,
) -> Result<()> {
    buffer.push_range(start, end);
    for i in start + 1..end {
        buffer.modify_range(0, i, end)?;
        buffer.set_special(Some(i));
        let mut j = i;
        while j > start && buffer.compare(j - 1, j)? == Ordering::Greater {
            buffer.swap(j - 1, j)?;
            j -= 1;
        }
    }
    buffer.set_special(None);
    buffer.pop_range()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::algorithms::test_support::{assert_sorts_fixtures, run};

    #[test]
    fn test_sorts_fixtures() {
        assert_sorts_fixtures(&mut InsertionSort::new());
    }

    #[test]
    fn test_range_leaves_outside_untouched() {
        let buffer = ObservableBuffer::unpaced(vec![9, 4, 3, 2, 1, 0]);
        insertion_sort_range(&buffer, 1, 5).unwrap();
        assert_eq!(buffer.to_vec(), vec![9, 1, 2, 3, 4, 0]);
    }

    #[test]
    fn test_sorted_input_needs_no_swaps() {
        let (_, stats) = run(&mut InsertionSort::new(), (0..50).collect());
        assert_eq!(stats.swaps, 0);
        assert_eq!(stats.comparisons, 49);
    }
}
