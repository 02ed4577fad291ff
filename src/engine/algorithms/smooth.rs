//! Smoothsort on a forest of Leonardo heaps

use crate::engine::{ObservableBuffer, Result, Sorter};
use std::cmp::Ordering;

const fn leonardo_numbers() -> [u64; 64] {
    let mut numbers = [1u64; 64];
    let mut i = 2;
    while i < numbers.len() {
        numbers[i] = numbers[i - 2] + numbers[i - 1] + 1;
        i += 1;
    }
    numbers
}

/// Leonardo numbers: `L(0) = L(1) = 1`, `L(k) = L(k - 2) + L(k - 1) + 1`
pub const LEONARDO: [u64; 64] = leonardo_numbers();

#[inline]
fn leonardo(order: u32) -> usize {
    LEONARDO[order as usize] as usize
}

/// The orders of the Leonardo heaps covering a prefix of the array
///
/// Heap orders strictly decrease from left to right, so the forest is a set of
/// orders and fits into the bits of a `u64`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HeapForest {
    orders: u64,
}

impl HeapForest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, order: u32) -> bool {
        order < u64::BITS && self.orders & (1u64 << order) != 0
    }

    pub fn insert(&mut self, order: u32) {
        self.orders |= 1u64 << order;
    }

    pub fn remove(&mut self, order: u32) {
        self.orders &= !(1u64 << order);
    }

    /// Order of the rightmost heap
    pub fn lowest(&self) -> Option<u32> {
        (self.orders != 0).then(|| self.orders.trailing_zeros())
    }

    /// Order of the heap directly left of the heap with the given order
    pub fn next_above(&self, order: u32) -> Option<u32> {
        let above = self.orders.checked_shr(order + 1).unwrap_or(0);
        (above != 0).then(|| order + 1 + above.trailing_zeros())
    }

    /// Number of heaps in the forest
    pub fn heap_count(&self) -> u32 {
        self.orders.count_ones()
    }

    /// Number of values covered by all heaps
    pub fn total_len(&self) -> u64 {
        (0..u64::BITS)
            .filter(|&order| self.contains(order))
            .map(|order| LEONARDO[order as usize])
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.orders == 0
    }
}

/// Smoothsort
///
/// Adaptive heapsort variant: presorted input is handled in close to linear
/// time because the new root rarely has to travel across heaps or sink. Each
/// heap of the forest keeps one highlighted range from the array start up to
/// its end.
#[derive(Debug, Default, Clone, Copy)]
pub struct SmoothSort;

impl SmoothSort {
    pub fn new() -> Self {
        Self
    }

    /// Arrange the whole array into a Leonardo heap forest
    fn build(buffer: &ObservableBuffer) -> Result<HeapForest> {
        let mut forest = HeapForest::new();
        forest.insert(1);
        buffer.push_range(0, 1);
        let mut min = 1;
        for curr in 1..buffer.len() {
            if forest.contains(min + 1) {
                // the two smallest heaps and the new value form one heap
                forest.remove(min);
                forest.remove(min + 1);
                buffer.pop_range()?;
                buffer.pop_range()?;
                min += 2;
            } else {
                min = if min == 1 { 0 } else { 1 };
            }
            forest.insert(min);
            buffer.push_range(0, curr + 1);
            Self::restore(buffer, &forest, min, curr)?;
        }
        Ok(forest)
    }

    /// Remove the maximum at position `i`, the root of the rightmost heap
    fn extract(buffer: &ObservableBuffer, forest: &mut HeapForest, i: usize) -> Result<()> {
        let Some(min) = forest.lowest() else {
            return Ok(());
        };
        forest.remove(min);
        buffer.pop_range()?;
        if min < 2 {
            return Ok(());
        }

        let right_len = leonardo(min - 2);
        forest.insert(min - 1);
        buffer.push_range(0, i - right_len);
        forest.insert(min - 2);
        buffer.push_range(0, i);
        Self::restore(buffer, forest, min - 1, i - 1 - right_len)?;
        Self::restore(buffer, forest, min - 2, i - 1)
    }

    /// Move the root at `pos` left across heap roots, then sift it into its heap
    fn restore(
        buffer: &ObservableBuffer,
        forest: &HeapForest,
        order: u32,
        pos: usize,
    ) -> Result<()> {
        buffer.set_special(Some(pos));
        let mut pos = pos;
        let mut order = order;
        while let Some(next) = forest.next_above(order) {
            let size = leonardo(order);
            let next_head = pos - size;
            if buffer.compare(next_head, pos)? != Ordering::Greater {
                break;
            }
            if size > 1 {
                let right_head = pos - 1;
                let left_head = right_head - leonardo(order - 2);
                if buffer.compare(next_head, right_head)? == Ordering::Less
                    || buffer.compare(next_head, left_head)? == Ordering::Less
                {
                    break;
                }
            }
            buffer.swap(pos, next_head)?;
            pos = next_head;
            order = next;
        }
        Self::sift_down(buffer, order, pos)?;
        buffer.set_special(None);
        Ok(())
    }

    /// Sink the root at `pos` into its heap of the given order
    fn sift_down(buffer: &ObservableBuffer, order: u32, pos: usize) -> Result<()> {
        let mut pos = pos;
        let mut order = order;
        while order > 1 {
            let right = pos - 1;
            let left = right - leonardo(order - 2);
            if buffer.compare(left, right)? != Ordering::Greater {
                if buffer.compare(pos, right)? != Ordering::Less {
                    break;
                }
                buffer.swap(pos, right)?;
                order -= 2;
                pos = right;
            } else {
                if buffer.compare(pos, left)? != Ordering::Less {
                    break;
                }
                buffer.swap(pos, left)?;
                order -= 1;
                pos = left;
            }
        }
        Ok(())
    }
}

impl Sorter for SmoothSort {
    fn sort(&mut self, buffer: &ObservableBuffer) -> Result<()> {
        let n = buffer.len();
        if n < 2 {
            return Ok(());
        }

        let mut forest = Self::build(buffer)?;
        for i in (1..n).rev() {
            Self::extract(buffer, &mut forest, i)?;
        }
        // the single value left at the front forms the last heap
        for _ in 0..forest.heap_count() {
            buffer.pop_range()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::algorithms::test_support::{assert_sorts_fixtures, run};

    #[test]
    fn test_sorts_fixtures() {
        assert_sorts_fixtures(&mut SmoothSort::new());
    }

    #[test]
    fn test_leonardo_numbers() {
        assert_eq!(&LEONARDO[..10], &[1, 1, 3, 5, 9, 15, 25, 41, 67, 109]);
    }

    #[test]
    fn test_forest_bit_operations() {
        let mut forest = HeapForest::new();
        assert!(forest.is_empty());
        assert_eq!(forest.lowest(), None);

        forest.insert(4);
        forest.insert(2);
        forest.insert(1);
        assert_eq!(forest.lowest(), Some(1));
        assert_eq!(forest.next_above(1), Some(2));
        assert_eq!(forest.next_above(2), Some(4));
        assert_eq!(forest.next_above(4), None);
        assert_eq!(forest.heap_count(), 3);
        assert_eq!(forest.total_len(), 9 + 3 + 1);

        forest.remove(2);
        assert!(!forest.contains(2));
        assert_eq!(forest.next_above(1), Some(4));
        assert_eq!(forest.next_above(63), None);
    }

    #[test]
    fn test_forest_size_tracks_the_unsorted_prefix() {
        let n = 150;
        let input: Vec<i32> = (0..n as i32).map(|i| (i * 53) % 71).collect();
        let buffer = ObservableBuffer::unpaced(input);

        let mut forest = SmoothSort::build(&buffer).unwrap();
        assert_eq!(forest.total_len(), n as u64);
        assert_eq!(buffer.range_depth() as u32, forest.heap_count());

        for i in (1..n).rev() {
            SmoothSort::extract(&buffer, &mut forest, i).unwrap();
            assert_eq!(forest.total_len(), i as u64);
            assert_eq!(buffer.range_depth() as u32, forest.heap_count());
        }
        assert!(crate::engine::is_sorted(&buffer.to_vec()));
    }

    #[test]
    fn test_sorted_input_beats_heapsort() {
        let input: Vec<i32> = (0..1000).collect();
        let (_, smooth) = run(&mut SmoothSort::new(), input.clone());
        let (_, heap) = run(&mut crate::engine::algorithms::HeapSort::new(), input);
        assert!(
            smooth.comparisons * 2 < heap.comparisons,
            "smooth {} vs heap {}",
            smooth.comparisons,
            heap.comparisons
        );
    }
}
