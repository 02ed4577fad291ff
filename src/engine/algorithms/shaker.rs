//! Shaker (cocktail) sort and its variant for inputs with many duplicates

use crate::engine::{ObservableBuffer, Result, Sorter};
use std::cmp::Ordering;

/// Half-open highlight range spanning two positions in either order
fn span(a: isize, b: isize) -> (usize, usize) {
    (a.min(b) as usize, a.max(b) as usize + 1)
}

/// Check if the pair `(pos, pos + dir)` is out of order for the pass direction
fn out_of_order(ordering: Ordering, dir: isize) -> bool {
    if dir > 0 {
        ordering == Ordering::Greater
    } else {
        ordering == Ordering::Less
    }
}

/// Bidirectional bubble sort, alternating direction every pass
#[derive(Debug, Default, Clone, Copy)]
pub struct ShakerSort;

impl ShakerSort {
    pub fn new() -> Self {
        Self
    }
}

impl Sorter for ShakerSort {
    fn sort(&mut self, buffer: &ObservableBuffer) -> Result<()> {
        let n = buffer.len();
        if n < 2 {
            return Ok(());
        }

        let mut start: isize = 0;
        let mut end = n as isize - 1;
        let mut dir: isize = 1;
        buffer.push_range(0, n);
        buffer.push_range(0, 0);
        while start != end {
            let mut last = start;
            buffer.set_special(Some(start as usize));
            let mut pos = start;
            while pos != end {
                let (lo, hi) = span(pos, end);
                buffer.modify_range(0, lo, hi)?;
                let next = pos + dir;
                if out_of_order(buffer.compare(pos as usize, next as usize)?, dir) {
                    buffer.swap(pos as usize, next as usize)?;
                    last = pos;
                } else {
                    buffer.set_special(Some(next as usize));
                }
                pos = next;
            }
            end = start;
            start = last;
            dir = -dir;
            let (lo, hi) = span(start, end);
            buffer.modify_range(1, lo, hi)?;
        }
        buffer.pop_range()?;
        buffer.pop_range()?;
        buffer.set_special(None);
        Ok(())
    }
}

/// Shaker sort that carries blocks of equal values
///
/// Instead of bubbling each copy of a value separately, the pass keeps the run
/// of values equal to the carried one together and moves a smaller element
/// across the whole block with a single swap.
#[derive(Debug, Default, Clone, Copy)]
pub struct DuplicateShakerSort;

impl DuplicateShakerSort {
    pub fn new() -> Self {
        Self
    }
}

impl Sorter for DuplicateShakerSort {
    fn sort(&mut self, buffer: &ObservableBuffer) -> Result<()> {
        let n = buffer.len();
        if n < 2 {
            return Ok(());
        }

        let mut start: isize = 0;
        let mut end = n as isize - 1;
        let mut dir: isize = 1;
        buffer.push_range(0, 0);
        buffer.push_range(0, 0);
        buffer.push_range(0, 0);
        while start != end {
            let mut last = start;
            buffer.set_special(Some(start as usize));
            // block of carried values spans from `i` up to just before `j`
            let mut i = start;
            let mut j = start + dir;
            while j - dir != end {
                let ordering = buffer.compare(i as usize, j as usize)?;
                if out_of_order(ordering, dir) {
                    buffer.swap(i as usize, j as usize)?;
                    last = i;
                    i += dir;
                } else if ordering != Ordering::Equal {
                    buffer.set_special(Some(j as usize));
                    i = j;
                }
                j += dir;

                let (lo, hi) = span(i, end);
                buffer.modify_range(1, lo, hi)?;
                let (lo, hi) = span(i, j - dir);
                buffer.modify_range(0, lo, hi)?;
            }
            end = start;
            start = last;
            dir = -dir;
            let (lo, hi) = span(start, end);
            buffer.modify_range(2, lo, hi)?;
        }
        buffer.pop_range()?;
        buffer.pop_range()?;
        buffer.pop_range()?;
        buffer.set_special(None);
        Ok(())
    }
}
