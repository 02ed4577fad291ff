//! Slowsort, a deliberately pessimal multiply-and-surrender algorithm

use crate::engine::{ObservableBuffer, Result, Sorter};
use std::cmp::Ordering;

/// Slowsort: sort both halves, move the larger of their maxima to the end,
/// then sort everything but the last value again
#[derive(Debug, Default, Clone, Copy)]
pub struct SlowSort;

impl SlowSort {
    pub fn new() -> Self {
        Self
    }

    fn sort_range(buffer: &ObservableBuffer, start: usize, end: usize) -> Result<()> {
        if end - start < 2 {
            return Ok(());
        }
        buffer.push_range(start, end);
        let mid = start + (end - start) / 2;
        buffer.set_special(Some(mid - 1));
        Self::sort_range(buffer, start, mid)?;
        Self::sort_range(buffer, mid, end)?;
        buffer.set_special(Some(mid - 1));
        if buffer.compare(end - 1, mid - 1)? == Ordering::Less {
            buffer.swap(end - 1, mid - 1)?;
        }
        buffer.set_special(None);
        Self::sort_range(buffer, start, end - 1)?;
        buffer.pop_range()
    }
}

impl Sorter for SlowSort {
    fn sort(&mut self, buffer: &ObservableBuffer) -> Result<()> {
        Self::sort_range(buffer, 0, buffer.len())
    }
}
