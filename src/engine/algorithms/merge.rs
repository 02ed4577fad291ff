//! Top-down merge sort

use crate::engine::{ArrayId, ObservableBuffer, Result, Sorter};
use std::cmp::Ordering;

/// Top-down merge sort alternating between the values and the auxiliary array
///
/// A range sorted into one array is merged from the halves sorted into the
/// other, so no copying back is needed. Since the auxiliary array starts as a
/// copy of the values, single-element ranges are valid in both.
#[derive(Debug, Default, Clone, Copy)]
pub struct MergeSort;

impl MergeSort {
    pub fn new() -> Self {
        Self
    }

    fn sort_into(
        &self,
        buffer: &ObservableBuffer,
        target: ArrayId,
        start: usize,
        n: usize,
    ) -> Result<()> {
        if n < 2 {
            return Ok(());
        }

        let whole = n == buffer.len();
        if !whole {
            buffer.push_range(start, start + n);
        }
        let k = n / 2;
        let mid = start + k;
        let end = start + n;
        self.sort_into(buffer, target.other(), start, k)?;
        self.sort_into(buffer, target.other(), mid, n - k)?;

        let source = target.other();
        let mut i = start;
        let mut j = mid;
        buffer.push_range(j, end);
        buffer.push_range(i, mid);
        for o in start..end {
            let take_left = j >= end
                || (i < mid && buffer.compare_in(source, i, j)? != Ordering::Greater);
            let next = if take_left {
                i += 1;
                buffer.modify_range(0, i, mid)?;
                i - 1
            } else {
                j += 1;
                buffer.modify_range(1, j, end)?;
                j - 1
            };
            let value = buffer.value_in(source, next)?;
            buffer.set_special_value(Some(value));
            buffer.set_value(target, o, value)?;
        }
        buffer.pop_range()?;
        buffer.pop_range()?;
        buffer.set_special(None);
        if !whole {
            buffer.pop_range()?;
        }
        Ok(())
    }
}

impl Sorter for MergeSort {
    fn sort(&mut self, buffer: &ObservableBuffer) -> Result<()> {
        buffer.create_auxiliary()?;
        self.sort_into(buffer, ArrayId::Values, 0, buffer.len())?;
        buffer.destroy_auxiliary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::algorithms::test_support::{assert_sorts_fixtures, run};

    #[test]
    fn test_sorts_fixtures() {
        assert_sorts_fixtures(&mut MergeSort::new());
    }

    #[test]
    fn test_writes_n_log_n_values() {
        let (output, stats) = run(&mut MergeSort::new(), (0..64).rev().collect());
        assert_eq!(output, (0..64).collect::<Vec<_>>());
        // Six levels of merging, each writing every value once
        assert_eq!(stats.writes, 64 * 6);
        assert_eq!(stats.swaps, 0);
        assert_eq!(stats.auxiliary_created, 1);
    }

    #[test]
    fn test_odd_lengths_alternate_correctly() {
        for n in [3, 5, 9, 13, 33] {
            let input: Vec<i32> = (0..n).map(|i| (i * 7) % n).collect();
            let (output, _) = run(&mut MergeSort::new(), input);
            assert_eq!(output, (0..n).collect::<Vec<_>>());
        }
    }
}
