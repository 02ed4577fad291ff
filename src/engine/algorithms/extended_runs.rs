//! Natural merge sort with runs extended by a sliding window

use crate::engine::algorithms::insertion::insertion_sort_range;
use crate::engine::{ArrayId, ObservableBuffer, Result, Sorter};
use std::cmp::Ordering;

/// Size of the sorted window runs are extended from
pub const MIN_SIZE: usize = 5;

/// Natural merge sort in a single pass with a binary counter of pending runs
///
/// Runs are grown from a sorted window of [`MIN_SIZE`] values: the smallest
/// window value is emitted, and the next unseen value joins the window if it
/// can still extend the current run. Every run produced on average has about
/// twice the window size, even on random input.
///
/// Pending runs are kept like the digits of a binary counter, one per level.
/// Runs on even levels live in the values, runs on odd levels in the auxiliary
/// array, so that merging two runs of one level always writes into the other
/// array. The leftover runs are merged from the smallest up, moving whichever
/// operand is shorter whenever the two live in different arrays.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtendedRunsMergeSort;

fn level_array(level: usize) -> ArrayId {
    if level % 2 == 0 {
        ArrayId::Values
    } else {
        ArrayId::Auxiliary
    }
}

impl ExtendedRunsMergeSort {
    pub fn new() -> Self {
        Self
    }

    /// Produce the run starting at `start` and return its end
    fn next_run(buffer: &ObservableBuffer, start: usize) -> Result<usize> {
        let n = buffer.len();
        let mut end = start;
        let mut window_end = (start + MIN_SIZE).min(n);
        buffer.push_range(end, window_end);
        buffer.push_range(start, window_end);
        insertion_sort_range(buffer, end, window_end)?;
        loop {
            end += 1;
            buffer.modify_range(1, end, window_end)?;
            // rejected values collect between the window and the next candidate
            let next = end + MIN_SIZE - 1;
            if next < n && buffer.compare(end - 1, next)? != Ordering::Greater {
                buffer.set_special(Some(next));
                buffer.modify_range(0, start, window_end + 1)?;
                buffer.modify_range(1, end, window_end + 1)?;
                buffer.swap(next, window_end)?;
                window_end += 1;
                let mut pos = window_end - 1;
                while pos > end && buffer.compare(pos - 1, pos)? == Ordering::Greater {
                    buffer.swap(pos - 1, pos)?;
                    pos -= 1;
                }
            }
            if end >= window_end {
                break;
            }
        }
        buffer.pop_range()?;
        buffer.pop_range()?;
        buffer.set_special(None);
        Ok(end)
    }

    /// Merge `[start, mid)` and `[mid, end)` of `from` into the other array
    fn merge(
        buffer: &ObservableBuffer,
        from: ArrayId,
        start: usize,
        mid: usize,
        end: usize,
    ) -> Result<()> {
        let to = from.other();
        let (mut l, mut r) = (start, mid);
        buffer.push_range(start, mid);
        buffer.push_range(mid, end);
        for o in start..end {
            let take_left =
                r == end || (l < mid && buffer.compare_in(from, l, r)? != Ordering::Greater);
            let pos = if take_left {
                l += 1;
                l - 1
            } else {
                r += 1;
                r - 1
            };
            buffer.modify_range(1, l, mid)?;
            buffer.modify_range(0, r, end)?;
            let value = buffer.value_in(from, pos)?;
            buffer.set_special_value(Some(value));
            buffer.set_value(to, o, value)?;
        }
        buffer.set_special(None);
        buffer.pop_range()?;
        buffer.pop_range()
    }

    /// Copy `[start, end)` of `from` into the other array
    fn move_range(
        buffer: &ObservableBuffer,
        from: ArrayId,
        start: usize,
        end: usize,
    ) -> Result<()> {
        buffer.push_range(start, end);
        for i in start..end {
            let value = buffer.value_in(from, i)?;
            buffer.set_special_value(Some(value));
            buffer.modify_range(0, i + 1, end)?;
            buffer.set_value(from.other(), i, value)?;
        }
        buffer.pop_range()?;
        buffer.set_special(None);
        Ok(())
    }
}

impl Sorter for ExtendedRunsMergeSort {
    fn sort(&mut self, buffer: &ObservableBuffer) -> Result<()> {
        let n = buffer.len();
        if n <= MIN_SIZE {
            return insertion_sort_range(buffer, 0, n);
        }

        buffer.create_auxiliary()?;
        // sizes[level] is the length of the pending run on that level, or zero
        let mut sizes: Vec<usize> = Vec::new();
        let mut start = 0;
        while start < n {
            let end = Self::next_run(buffer, start)?;
            buffer.push_range(start, end);
            let mut level = 0;
            while sizes.get(level).is_some_and(|&size| size != 0) {
                let mid = start;
                start -= sizes[level];
                buffer.modify_range(0, start, end)?;
                Self::merge(buffer, level_array(level), start, mid, end)?;
                sizes[level] = 0;
                level += 1;
            }
            if level == sizes.len() {
                sizes.push(0);
            }
            sizes[level] = end - start;
            start = end;
            buffer.pop_range()?;
        }

        // [mid, n) holds the merged suffix, living in `suffix_array`
        let mut mid = n;
        let mut suffix_array = ArrayId::Values;
        for (level, &size) in sizes.iter().enumerate() {
            if size == 0 {
                continue;
            }
            let start = mid - size;
            let mut run_array = level_array(level);
            if mid == n {
                suffix_array = run_array;
            } else {
                if run_array != suffix_array {
                    let run_len = mid - start;
                    let suffix_len = n - mid;
                    if run_len < suffix_len || (run_array == ArrayId::Values && start == 0) {
                        Self::move_range(buffer, run_array, start, mid)?;
                        run_array = run_array.other();
                    } else {
                        Self::move_range(buffer, suffix_array, mid, n)?;
                    }
                }
                Self::merge(buffer, run_array, start, mid, n)?;
                suffix_array = run_array.other();
            }
            mid = start;
        }

        if suffix_array == ArrayId::Auxiliary {
            Self::move_range(buffer, ArrayId::Auxiliary, 0, n)?;
        }
        buffer.destroy_auxiliary()
    }
}
