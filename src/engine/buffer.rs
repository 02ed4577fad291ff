//! Observable Buffer Implementation
//!
//! This module provides the observable buffer, the shared data model between a
//! sorting algorithm and a renderer. It owns the values being sorted, an optional
//! auxiliary array, a stack of highlighted ranges and a special marker, and it
//! routes every elementary operation through pacing and cancellation.
//!
//! All state lives behind a single mutex. Operations release the lock before they
//! pace, so a renderer polling [`ObservableBuffer::snapshot`] is never blocked by
//! an algorithm's sleep and never observes a half-applied swap.

use crate::engine::pacing::{NoPacing, OpCost, PacingStrategy};
use crate::engine::{CancelToken, EngineError, Result};
use parking_lot::Mutex;
use serde::Serialize;
use std::cmp::Ordering;
use std::ops::Range;
use std::sync::Arc;

/// Identifies one of the two arrays held by the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayId {
    /// The array being sorted
    Values,
    /// The scratch array, only present between create and destroy
    Auxiliary,
}

impl ArrayId {
    /// The other array
    #[inline]
    pub fn other(self) -> Self {
        match self {
            ArrayId::Values => ArrayId::Auxiliary,
            ArrayId::Auxiliary => ArrayId::Values,
        }
    }
}

/// A half-open index interval highlighted for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HighlightRange {
    pub start: usize,
    pub end: usize,
}

impl HighlightRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Check if the range covers the given index
    pub fn contains(&self, index: usize) -> bool {
        let (lo, hi) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        (lo..hi).contains(&index)
    }
}

/// Counters of the operations applied to a buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BufferStats {
    pub comparisons: u64,
    pub swaps: u64,
    pub writes: u64,
    pub range_pushes: u64,
    pub range_pops: u64,
    pub auxiliary_created: u64,
    pub auxiliary_destroyed: u64,
}

impl BufferStats {
    /// Check that every pushed range was popped again
    pub fn ranges_balanced(&self) -> bool {
        self.range_pushes == self.range_pops
    }

    /// Check that every auxiliary array created was destroyed again
    pub fn auxiliary_balanced(&self) -> bool {
        self.auxiliary_created == self.auxiliary_destroyed
    }
}

/// Borrowed view of the buffer state, valid while the lock is held
#[derive(Debug)]
pub struct BufferView<'a> {
    pub values: &'a [i32],
    pub auxiliary: Option<&'a [i32]>,
    pub ranges: &'a [HighlightRange],
    pub special_value: Option<i32>,
    pub stats: BufferStats,
}

/// Owned, consistent copy of the buffer state for a renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BufferSnapshot {
    pub values: Vec<i32>,
    pub auxiliary: Option<Vec<i32>>,
    pub ranges: Vec<HighlightRange>,
    pub special_value: Option<i32>,
    pub stats: BufferStats,
}

#[derive(Debug)]
struct BufferState {
    values: Vec<i32>,
    auxiliary: Option<Vec<i32>>,
    ranges: Vec<HighlightRange>,
    special_value: Option<i32>,
    stats: BufferStats,
}

impl BufferState {
    fn array(&self, array: ArrayId) -> Result<&[i32]> {
        match array {
            ArrayId::Values => Ok(&self.values),
            ArrayId::Auxiliary => self
                .auxiliary
                .as_deref()
                .ok_or_else(|| EngineError::InvalidState("no auxiliary array was created".into())),
        }
    }

    fn array_mut(&mut self, array: ArrayId) -> Result<&mut [i32]> {
        match array {
            ArrayId::Values => Ok(&mut self.values),
            ArrayId::Auxiliary => self
                .auxiliary
                .as_deref_mut()
                .ok_or_else(|| EngineError::InvalidState("no auxiliary array was created".into())),
        }
    }

    fn range_index(&self, depth_from_top: usize) -> Result<usize> {
        let depth = self.ranges.len();
        if depth_from_top >= depth {
            return Err(EngineError::InvalidState(format!(
                "highlight stack has depth {depth}, no entry {depth_from_top} from the top"
            )));
        }
        Ok(depth - 1 - depth_from_top)
    }
}

/// Observable, paced and cancellable array of integers
///
/// One buffer exists per sort run. It is shared (typically in an `Arc`) between
/// the worker running the algorithm and any number of readers.
#[derive(Debug)]
pub struct ObservableBuffer {
    state: Mutex<BufferState>,
    len: usize,
    pacing: Arc<dyn PacingStrategy>,
    cancel: CancelToken,
}

impl ObservableBuffer {
    /// Create a new buffer over the given values
    ///
    /// # Arguments
    /// * `values` - The unsorted values
    /// * `pacing` - Strategy computing the delay of each operation
    /// * `cancel` - Token of the run this buffer belongs to
    pub fn new(values: Vec<i32>, pacing: Arc<dyn PacingStrategy>, cancel: CancelToken) -> Self {
        let len = values.len();
        Self {
            state: Mutex::new(BufferState {
                values,
                auxiliary: None,
                ranges: Vec::new(),
                special_value: None,
                stats: BufferStats::default(),
            }),
            len,
            pacing,
            cancel,
        }
    }

    /// Create a buffer without pacing and with a fresh cancellation token
    pub fn unpaced(values: Vec<i32>) -> Self {
        Self::new(values, Arc::new(NoPacing::new()), CancelToken::new())
    }

    /// Number of values in the buffer
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the buffer holds no values
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The cancellation token of this buffer's run
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Pay the pacing cost of one operation
    ///
    /// # Errors
    /// Returns `EngineError::Cancelled` if the run is cancelled before or
    /// during the delay
    pub fn pause(&self, cost: OpCost) -> Result<()> {
        self.cancel.sleep(self.pacing.delay_for(cost))
    }

    /// Compare the values at positions `i` and `j`
    pub fn compare(&self, i: usize, j: usize) -> Result<Ordering> {
        self.compare_in(ArrayId::Values, i, j)
    }

    /// Compare the values at positions `i` and `j` of the given array
    ///
    /// # Errors
    /// Returns `EngineError::Cancelled` on cancellation, or
    /// `EngineError::InvalidState` if the auxiliary array does not exist
    pub fn compare_in(&self, array: ArrayId, i: usize, j: usize) -> Result<Ordering> {
        self.cancel.check()?;
        let ordering = {
            let mut state = self.state.lock();
            let data = state.array(array)?;
            let ordering = data[i].cmp(&data[j]);
            state.stats.comparisons += 1;
            ordering
        };
        self.pause(OpCost::Compare)?;
        Ok(ordering)
    }

    /// Swap the values at positions `i` and `j`
    pub fn swap(&self, i: usize, j: usize) -> Result<()> {
        self.swap_in(ArrayId::Values, i, j)
    }

    /// Swap the values at positions `i` and `j` of the given array
    ///
    /// Swapping a position with itself is a no-op and costs nothing.
    pub fn swap_in(&self, array: ArrayId, i: usize, j: usize) -> Result<()> {
        if i == j {
            return Ok(());
        }
        self.cancel.check()?;
        {
            let mut state = self.state.lock();
            state.array_mut(array)?.swap(i, j);
            state.stats.swaps += 1;
        }
        self.pause(OpCost::Swap)
    }

    /// Write a value into the given array, paying the swap cost
    pub fn set_value(&self, array: ArrayId, pos: usize, value: i32) -> Result<()> {
        self.cancel.check()?;
        {
            let mut state = self.state.lock();
            state.array_mut(array)?[pos] = value;
            state.stats.writes += 1;
        }
        self.pause(OpCost::Swap)
    }

    /// Read a value without pacing
    pub fn value(&self, i: usize) -> i32 {
        self.state.lock().values[i]
    }

    /// Read a value of the given array without pacing
    pub fn value_in(&self, array: ArrayId, i: usize) -> Result<i32> {
        Ok(self.state.lock().array(array)?[i])
    }

    /// Copy a range between the two arrays without pacing
    ///
    /// Used by algorithms to keep a scratch copy in sync with work done in
    /// place; it does not count as a visible write.
    pub fn mirror_range(&self, from: ArrayId, to: ArrayId, range: Range<usize>) -> Result<()> {
        if from == to {
            return Ok(());
        }
        let mut state = self.state.lock();
        let BufferState {
            values, auxiliary, ..
        } = &mut *state;
        let auxiliary = auxiliary
            .as_deref_mut()
            .ok_or_else(|| EngineError::InvalidState("no auxiliary array was created".into()))?;
        match from {
            ArrayId::Values => auxiliary[range.clone()].copy_from_slice(&values[range]),
            ArrayId::Auxiliary => values[range.clone()].copy_from_slice(&auxiliary[range]),
        }
        Ok(())
    }

    /// Push a highlighted range onto the stack
    pub fn push_range(&self, start: usize, end: usize) {
        let mut state = self.state.lock();
        state.ranges.push(HighlightRange::new(start, end));
        state.stats.range_pushes += 1;
    }

    /// Change the range at the given depth from the top of the stack
    ///
    /// # Errors
    /// Returns `EngineError::InvalidState` if the stack is not deep enough
    pub fn modify_range(&self, depth_from_top: usize, start: usize, end: usize) -> Result<()> {
        let mut state = self.state.lock();
        let index = state.range_index(depth_from_top)?;
        state.ranges[index] = HighlightRange::new(start, end);
        Ok(())
    }

    /// Pop the top range off the stack
    ///
    /// # Errors
    /// Returns `EngineError::InvalidState` if the stack is empty
    pub fn pop_range(&self) -> Result<()> {
        let mut state = self.state.lock();
        if state.ranges.pop().is_none() {
            return Err(EngineError::InvalidState(
                "highlight stack underflow".into(),
            ));
        }
        state.stats.range_pops += 1;
        Ok(())
    }

    /// Current depth of the highlight stack
    pub fn range_depth(&self) -> usize {
        self.state.lock().ranges.len()
    }

    /// Highlight the value currently stored at `index`, or clear the marker
    pub fn set_special(&self, index: Option<usize>) {
        let mut state = self.state.lock();
        let value = index.map(|i| state.values[i]);
        state.special_value = value;
    }

    /// Highlight an explicit value, or clear the marker
    pub fn set_special_value(&self, value: Option<i32>) {
        self.state.lock().special_value = value;
    }

    /// The currently highlighted value
    pub fn special_value(&self) -> Option<i32> {
        self.state.lock().special_value
    }

    /// Create the auxiliary array as a copy of the values
    ///
    /// # Errors
    /// Returns `EngineError::InvalidState` if an auxiliary array already exists
    pub fn create_auxiliary(&self) -> Result<ArrayId> {
        let mut state = self.state.lock();
        if state.auxiliary.is_some() {
            return Err(EngineError::InvalidState(
                "auxiliary array already exists".into(),
            ));
        }
        state.auxiliary = Some(state.values.clone());
        state.stats.auxiliary_created += 1;
        Ok(ArrayId::Auxiliary)
    }

    /// Check if the auxiliary array exists
    pub fn has_auxiliary(&self) -> bool {
        self.state.lock().auxiliary.is_some()
    }

    /// Handle of the auxiliary array
    ///
    /// # Errors
    /// Returns `EngineError::InvalidState` if no auxiliary array exists
    pub fn auxiliary(&self) -> Result<ArrayId> {
        if self.has_auxiliary() {
            Ok(ArrayId::Auxiliary)
        } else {
            Err(EngineError::InvalidState(
                "no auxiliary array was created".into(),
            ))
        }
    }

    /// Destroy the auxiliary array
    ///
    /// # Errors
    /// Returns `EngineError::InvalidState` if no auxiliary array exists
    pub fn destroy_auxiliary(&self) -> Result<()> {
        let mut state = self.state.lock();
        if state.auxiliary.take().is_none() {
            return Err(EngineError::InvalidState(
                "no auxiliary array exists".into(),
            ));
        }
        state.stats.auxiliary_destroyed += 1;
        Ok(())
    }

    /// Operation counters so far
    pub fn stats(&self) -> BufferStats {
        self.state.lock().stats
    }

    /// Copy of the current values
    pub fn to_vec(&self) -> Vec<i32> {
        self.state.lock().values.clone()
    }

    /// Consistent copy of the complete state
    pub fn snapshot(&self) -> BufferSnapshot {
        let state = self.state.lock();
        BufferSnapshot {
            values: state.values.clone(),
            auxiliary: state.auxiliary.clone(),
            ranges: state.ranges.clone(),
            special_value: state.special_value,
            stats: state.stats,
        }
    }

    /// Inspect the state under the lock without copying it
    ///
    /// The closure must not call back into the buffer.
    pub fn view<R>(&self, f: impl FnOnce(&BufferView<'_>) -> R) -> R {
        let state = self.state.lock();
        let view = BufferView {
            values: &state.values,
            auxiliary: state.auxiliary.as_deref(),
            ranges: &state.ranges,
            special_value: state.special_value,
            stats: state.stats,
        };
        f(&view)
    }

    /// Consume the buffer and return the values
    pub fn into_values(self) -> Vec<i32> {
        self.state.into_inner().values
    }
}
