//! Comb sort

use crate::engine::algorithms::bubble::bubble_sort_range;
use crate::engine::{ObservableBuffer, Result, Sorter};
use std::cmp::Ordering;

/// Comb sort: compare-and-swap passes with a gap shrinking by 10/13, finished by
/// a bubble sort once the gap reaches one
#[derive(Debug, Default, Clone, Copy)]
pub struct CombSort;

impl CombSort {
    pub fn new() -> Self {
        Self
    }

    fn shrink(gap: usize) -> usize {
        gap * 10 / 13
    }
}

impl Sorter for CombSort {
    fn sort(&mut self, buffer: &ObservableBuffer) -> Result<()> {
        let n = buffer.len();
        let mut gap = Self::shrink(n);
        while gap > 1 {
            buffer.push_range(0, 0);
            buffer.push_range(0, 0);
            for i in gap..n {
                buffer.modify_range(0, i - gap, i - gap + 1)?;
                buffer.modify_range(1, i, i + 1)?;
                buffer.set_special(Some(i));
                if buffer.compare(i - gap, i)? == Ordering::Greater {
                    buffer.swap(i - gap, i)?;
                }
            }
            buffer.pop_range()?;
            buffer.pop_range()?;
            buffer.set_special(None);
            gap = Self::shrink(gap);
        }
        bubble_sort_range(buffer, 0, n)
    }
}
