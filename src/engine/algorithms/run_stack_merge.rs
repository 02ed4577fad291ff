//! Single-pass natural merge sort with a run stack

use crate::engine::{ArrayId, ObservableBuffer, Result, Sorter};
use std::cmp::Ordering;

/// Minimum length of a run before it is pushed onto the stack
pub const MIN_RUN: usize = 10;

/// Natural merge sort in a single left-to-right pass
///
/// Runs are found in place (descending ones are reversed), padded to
/// [`MIN_RUN`] values by insertion and pushed onto a stack of pending runs. The
/// top of the stack is merged with each new run while it is less than twice as
/// long, and whatever remains is merged right to left at the end. The auxiliary
/// array mirrors the finished runs and is the source of every merge.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunStackMergeSort;

impl RunStackMergeSort {
    pub fn new() -> Self {
        Self
    }

    /// Find the run starting at `from` and extend it to at least [`MIN_RUN`] values
    fn next_run(buffer: &ObservableBuffer, from: usize) -> Result<usize> {
        let n = buffer.len();
        let mut to = from + 1;
        let descending = to < n && buffer.compare(to, from)? == Ordering::Less;
        if to < n {
            to += 1;
            buffer.modify_range(0, from, to)?;
        }
        while to < n && (buffer.compare(to, to - 1)? == Ordering::Less) == descending {
            buffer.set_special(Some(to));
            to += 1;
            buffer.modify_range(0, from, to)?;
        }

        if descending {
            for i in 0..(to - from) / 2 {
                buffer.set_special(Some(to - 1 - i));
                buffer.swap(from + i, to - 1 - i)?;
            }
        }

        while to < n && to - from < MIN_RUN {
            let mut curr = to;
            to += 1;
            buffer.modify_range(0, from, to)?;
            buffer.set_special(Some(curr));
            while curr > from && buffer.compare(curr, curr - 1)? == Ordering::Less {
                buffer.swap(curr - 1, curr)?;
                curr -= 1;
            }
        }
        buffer.set_special(None);
        Ok(to)
    }

    /// Merge `[start, mid)` and `[mid, end)` of the auxiliary array into the values
    fn merge(
        buffer: &ObservableBuffer,
        aux: ArrayId,
        start: usize,
        mid: usize,
        end: usize,
    ) -> Result<()> {
        buffer.push_range(start, mid);
        buffer.push_range(mid, end);
        let (mut i, mut j) = (start, mid);
        for o in start..end {
            let take_left =
                j == end || (i < mid && buffer.compare_in(aux, i, j)? != Ordering::Greater);
            let pos = if take_left {
                i += 1;
                i - 1
            } else {
                j += 1;
                j - 1
            };
            buffer.set_value(ArrayId::Values, o, buffer.value_in(aux, pos)?)?;
            buffer.set_special(Some(o));
            buffer.modify_range(1, i, mid)?;
            buffer.modify_range(0, j, end)?;
        }
        buffer.set_special(None);
        buffer.pop_range()?;
        buffer.pop_range()?;
        buffer.mirror_range(ArrayId::Values, aux, start..end)
    }
}

impl Sorter for RunStackMergeSort {
    fn sort(&mut self, buffer: &ObservableBuffer) -> Result<()> {
        let n = buffer.len();
        if n < 2 {
            return Ok(());
        }

        let aux = buffer.create_auxiliary()?;
        let mut sizes: Vec<usize> = Vec::new();
        let mut from = 0;
        while from < n {
            buffer.push_range(from, from + 1);
            let to = Self::next_run(buffer, from)?;
            buffer.mirror_range(ArrayId::Values, aux, from..to)?;

            let mut start = from;
            while let Some(&pending) = sizes.last() {
                if pending >= 2 * (to - start) {
                    break;
                }
                let offset = start - pending;
                buffer.modify_range(0, offset, to)?;
                Self::merge(buffer, aux, offset, start, to)?;
                sizes.pop();
                start = offset;
            }
            sizes.push(to - start);
            buffer.pop_range()?;
            from = to;
        }

        buffer.push_range(n, n);
        let mut mid = n;
        while let Some(size) = sizes.pop() {
            let offset = mid - size;
            buffer.modify_range(0, offset, n)?;
            if mid < n {
                Self::merge(buffer, aux, offset, mid, n)?;
            }
            mid = offset;
        }
        buffer.pop_range()?;
        buffer.destroy_auxiliary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::algorithms::test_support::{assert_sorts_fixtures, run};

    #[test]
    fn test_sorts_fixtures() {
        assert_sorts_fixtures(&mut RunStackMergeSort::new());
    }

    #[test]
    fn test_sorted_input_is_one_run() {
        let (_, stats) = run(&mut RunStackMergeSort::new(), (0..200).collect());
        assert_eq!(stats.writes, 0);
        assert_eq!(stats.swaps, 0);
        assert_eq!(stats.comparisons, 199);
    }

    #[test]
    fn test_descending_run_is_reversed_in_place() {
        let (output, stats) = run(&mut RunStackMergeSort::new(), (0..200).rev().collect());
        assert_eq!(output, (0..200).collect::<Vec<_>>());
        assert_eq!(stats.swaps, 100);
        assert_eq!(stats.writes, 0);
    }

    #[test]
    fn test_short_runs_are_padded() {
        // Alternating pairs would form many tiny runs without padding
        let input: Vec<i32> = (0..100).map(|i| if i % 2 == 0 { i + 1 } else { i - 1 }).collect();
        let (output, _) = run(&mut RunStackMergeSort::new(), input);
        assert_eq!(output, (0..100).collect::<Vec<_>>());
    }
}
