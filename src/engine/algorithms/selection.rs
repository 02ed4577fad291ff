//! Selection sort

use crate::engine::{ObservableBuffer, Result, Sorter};
use std::cmp::Ordering;

/// Selection sort: repeatedly moves the minimum of the unsorted suffix to its front
#[derive(Debug, Default, Clone, Copy)]
pub struct SelectionSort;

impl SelectionSort {
    pub fn new() -> Self {
        Self
    }
}

impl Sorter for SelectionSort {
    fn sort(&mut self, buffer: &ObservableBuffer) -> Result<()> {
        let n = buffer.len();
        buffer.push_range(0, n);
        for i in 0..n.saturating_sub(1) {
            buffer.modify_range(0, i, n)?;
            let mut min_pos = i;
            buffer.set_special(Some(min_pos));
            buffer.push_range(i, n);
            for j in i + 1..n {
                buffer.modify_range(0, j - 1, n)?;
                if buffer.compare(j, min_pos)? == Ordering::Less {
                    buffer.set_special(Some(j));
                    min_pos = j;
                }
            }
            buffer.swap(i, min_pos)?;
            buffer.set_special(None);
            buffer.pop_range()?;
        }
        buffer.pop_range()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::algorithms::test_support::{assert_sorts_fixtures, run};

    #[test]
    fn test_sorts_fixtures() {
        assert_sorts_fixtures(&mut SelectionSort::new());
    }

    #[test]
    fn test_comparison_count_is_quadratic() {
        let (output, stats) = run(&mut SelectionSort::new(), vec![5, 3, 1, 4, 2]);
        assert_eq!(output, vec![1, 2, 3, 4, 5]);
        assert_eq!(stats.comparisons, 10);
    }

    #[test]
    fn test_equal_values_are_not_swapped() {
        let (_, stats) = run(&mut SelectionSort::new(), vec![2, 2, 2]);
        assert_eq!(stats.swaps, 0);
    }
}
