//! Bubble sort with last-swap shrinking of the active range

use crate::engine::{ObservableBuffer, Result, Sorter};
use std::cmp::Ordering;

/// Bubble sort
#[derive(Debug, Default, Clone, Copy)]
pub struct BubbleSort;

impl BubbleSort {
    pub fn new() -> Self {
        Self
    }
}

impl Sorter for BubbleSort {
    fn sort(&mut self, buffer: &ObservableBuffer) -> Result<()> {
        bubble_sort_range(buffer, 0, buffer.len())
    }
}

/// Bubble sort `[start, end)`
///
/// Everything behind the last swap of a pass is already in place, so the next
/// pass stops there.
pub(crate) fn bubble_sort_range(buffer: &ObservableBuffer, start: usize, end: usize) -> Result<()> {
    let mut right = end;
    while right > start + 1 {
        buffer.push_range(start, right);
        let mut last = start;
        for l in start + 1..right {
            buffer.set_special(Some(l - 1));
            if buffer.compare(l - 1, l)? == Ordering::Greater {
                last = l;
                buffer.swap(l - 1, l)?;
            }
            buffer.modify_range(0, l, right)?;
        }
        buffer.set_special(None);
        buffer.pop_range()?;
        right = last;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::algorithms::test_support::{assert_sorts_fixtures, run};

    #[test]
    fn test_sorts_fixtures() {
        assert_sorts_fixtures(&mut BubbleSort::new());
    }

    #[test]
    fn test_sorted_input_takes_one_pass() {
        let (_, stats) = run(&mut BubbleSort::new(), (0..20).collect());
        assert_eq!(stats.comparisons, 19);
        assert_eq!(stats.range_pushes, 1);
        assert_eq!(stats.swaps, 0);
    }

    #[test]
    fn test_shrinks_to_last_swap() {
        // One pass moves 9 to the end, the second pass finds nothing to do
        let (output, stats) = run(&mut BubbleSort::new(), vec![9, 1, 2, 3]);
        assert_eq!(output, vec![1, 2, 3, 9]);
        assert_eq!(stats.swaps, 3);
        assert_eq!(stats.range_pushes, 2);
    }
}
