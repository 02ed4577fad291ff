//! Heapsort on a binary max-heap

use crate::engine::{ObservableBuffer, Result, Sorter};
use std::cmp::Ordering;

/// Heapsort
///
/// Builds a max-heap bottom-up, then repeatedly swaps the root behind the
/// shrinking heap and sifts the new root down.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapSort;

impl HeapSort {
    pub fn new() -> Self {
        Self
    }

    fn sift_down(buffer: &ObservableBuffer, start: usize, end: usize) -> Result<()> {
        let mut pos = start;
        while 2 * pos + 1 < end {
            let left = 2 * pos + 1;
            let child = if left + 1 == end || buffer.compare(left, left + 1)? != Ordering::Less {
                left
            } else {
                left + 1
            };
            if buffer.compare(pos, child)? != Ordering::Less {
                break;
            }
            buffer.push_range(pos, end);
            buffer.set_special(Some(pos));
            buffer.swap(pos, child)?;
            pos = child;
            buffer.pop_range()?;
        }
        buffer.set_special(None);
        Ok(())
    }
}

impl Sorter for HeapSort {
    fn sort(&mut self, buffer: &ObservableBuffer) -> Result<()> {
        let n = buffer.len();
        if n < 2 {
            return Ok(());
        }

        for i in (0..=(n - 2) / 2).rev() {
            buffer.push_range(i, n);
            Self::sift_down(buffer, i, n)?;
            buffer.pop_range()?;
        }
        for i in (1..n).rev() {
            buffer.push_range(0, i);
            buffer.set_special(Some(i));
            buffer.swap(i, 0)?;
            Self::sift_down(buffer, 0, i)?;
            buffer.pop_range()?;
        }
        buffer.set_special(None);
        Ok(())
    }
}
