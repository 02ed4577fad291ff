//! Natural merge sort over ascending and descending runs

use crate::engine::{ArrayId, ObservableBuffer, Result, Sorter};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::ops::Range;

/// A maximal presorted stretch of values
///
/// A run starting with a descent is strictly descending, so reversing it never
/// reorders equal values; any other run is non-decreasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    pub start: usize,
    pub end: usize,
    pub descending: bool,
}

impl Run {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Position of the `k`-th smallest value of the run
    fn position(&self, k: usize) -> usize {
        if self.descending {
            self.end - 1 - k
        } else {
            self.start + k
        }
    }
}

/// Split `0..n` into maximal runs, comparing positions with `compare`
fn scan_runs<E>(
    n: usize,
    mut compare: impl FnMut(usize, usize) -> std::result::Result<Ordering, E>,
) -> std::result::Result<Vec<Run>, E> {
    let mut runs = Vec::new();
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        let mut descending = false;
        if end < n {
            descending = compare(start, end)? == Ordering::Greater;
            end += 1;
            while end < n && (compare(end - 1, end)? == Ordering::Greater) == descending {
                end += 1;
            }
        }
        runs.push(Run {
            start,
            end,
            descending,
        });
        start = end;
    }
    Ok(runs)
}

/// Split a slice into its natural runs
///
/// # Examples
/// ```
/// use sortlab::engine::algorithms::natural_runs;
///
/// let runs = natural_runs(&[1, 3, 5, 2, 4, 6]);
/// assert_eq!(runs.len(), 2);
/// assert_eq!(runs[0].range(), 0..3);
/// assert_eq!(runs[1].range(), 3..6);
/// ```
pub fn natural_runs(values: &[i32]) -> Vec<Run> {
    scan_runs::<Infallible>(values.len(), |i, j| Ok(values[i].cmp(&values[j])))
        .unwrap_or_else(|never| match never {})
}

/// Natural merge sort
///
/// Every pass scans the runs of one array and merges neighbouring pairs into
/// the other; descending runs are read from their high end. The sort ends once
/// a single ascending run spans the whole array.
#[derive(Debug, Default, Clone, Copy)]
pub struct NaturalMergeSort;

impl NaturalMergeSort {
    pub fn new() -> Self {
        Self
    }

    fn scan(buffer: &ObservableBuffer, array: ArrayId) -> Result<Vec<Run>> {
        buffer.push_range(0, 0);
        let runs = scan_runs(buffer.len(), |i, j| -> Result<Ordering> {
            buffer.modify_range(0, i, j + 1)?;
            buffer.set_special_value(Some(buffer.value_in(array, j)?));
            buffer.compare_in(array, i, j)
        })?;
        buffer.set_special(None);
        buffer.pop_range()?;
        Ok(runs)
    }

    /// Merge two runs of `from` into `to`, or move a single one
    fn merge(
        buffer: &ObservableBuffer,
        from: ArrayId,
        to: ArrayId,
        left: Run,
        right: Option<Run>,
    ) -> Result<()> {
        let end = right.map_or(left.end, |run| run.end);
        buffer.push_range(left.start, end);
        let (mut i, mut j) = (0, 0);
        let right_len = right.map_or(0, |run| run.len());
        for o in left.start..end {
            let take_left = match right {
                Some(run) if j < right_len => {
                    i < left.len()
                        && buffer.compare_in(from, left.position(i), run.position(j))?
                            != Ordering::Greater
                }
                _ => true,
            };
            let pos = if take_left {
                i += 1;
                left.position(i - 1)
            } else {
                j += 1;
                right.map_or(0, |run| run.position(j - 1))
            };
            let value = buffer.value_in(from, pos)?;
            buffer.set_special_value(Some(value));
            buffer.set_value(to, o, value)?;
            buffer.modify_range(0, o + 1, end)?;
        }
        buffer.set_special(None);
        buffer.pop_range()
    }
}

impl Sorter for NaturalMergeSort {
    fn sort(&mut self, buffer: &ObservableBuffer) -> Result<()> {
        let mut input = ArrayId::Values;
        let mut runs = Self::scan(buffer, input)?;
        if runs.len() <= 1 && runs.iter().all(|run| !run.descending) {
            return Ok(());
        }

        buffer.create_auxiliary()?;
        loop {
            let output = input.other();
            for pair in runs.chunks(2) {
                Self::merge(buffer, input, output, pair[0], pair.get(1).copied())?;
            }
            input = output;
            runs = Self::scan(buffer, input)?;
            if runs.len() == 1 && !runs[0].descending {
                break;
            }
        }

        if input == ArrayId::Auxiliary {
            let all = Run {
                start: 0,
                end: buffer.len(),
                descending: false,
            };
            Self::merge(buffer, input, ArrayId::Values, all, None)?;
        }
        buffer.destroy_auxiliary()
    }
}
