//! Shell sort

use crate::engine::{ObservableBuffer, Result, Sorter};
use std::cmp::Ordering;

/// Ciura's gap sequence
const GAPS: [usize; 8] = [701, 301, 132, 57, 23, 10, 4, 1];

/// Shell sort: gapped insertion sort over a decreasing gap sequence
///
/// While an element is inserted, the span of its gap chain is highlighted as a
/// single range ending at the element.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellSort;

impl ShellSort {
    pub fn new() -> Self {
        Self
    }
}

impl Sorter for ShellSort {
    fn sort(&mut self, buffer: &ObservableBuffer) -> Result<()> {
        let n = buffer.len();
        for gap in GAPS.into_iter().filter(|&gap| gap < n) {
            for i in gap..n {
                buffer.push_range(i % gap, i + 1);
                buffer.set_special(Some(i));
                let mut j = i;
                while j >= gap && buffer.compare(j - gap, j)? == Ordering::Greater {
                    buffer.swap(j - gap, j)?;
                    j -= gap;
                }
                buffer.pop_range()?;
            }
        }
        buffer.set_special(None);
        Ok(())
    }
}
