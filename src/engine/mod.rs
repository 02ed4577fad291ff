//! SortLab Engine Implementation
//!
//! This module provides the instrumented sorting engine: an observable, paced and
//! cancellable buffer, the elementary operations routed through it, and the
//! sorting algorithms that drive it.

pub mod algorithms;
pub mod buffer;
pub mod cancellation;
pub mod config;
pub mod data_ordering;
pub mod pacing;
pub mod registry;
pub mod session;
pub mod strategy;
pub mod thread_management;

#[cfg(test)]
mod property_tests;

pub use buffer::{
    ArrayId, BufferSnapshot, BufferStats, BufferView, HighlightRange, ObservableBuffer,
};
pub use cancellation::CancelToken;
pub use config::{DataConfig, EngineConfig, PacingConfig, WorkerConfig};
pub use data_ordering::DataOrdering;
pub use pacing::{DialPacing, FixedPacing, NoPacing, OpCost, PacingControl, PacingStrategy};
pub use registry::SortingAlgorithm;
pub use session::{RunOutcome, RunReport, SortSession};
pub use strategy::{PartitionStrategy, PivotStrategy, RecursionEnd};
pub use thread_management::{ManagedThread, ThreadBuilder, ThreadContext};

/// Errors that can occur in the engine
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Cooperative stop requested mid-run; expected on algorithm or data switch
    #[error("Sort run was cancelled")]
    Cancelled,

    /// Misuse of the buffer by an algorithm (auxiliary lifecycle, highlight stack)
    #[error("Invalid buffer state: {0}")]
    InvalidState(String),

    /// Malformed configuration or generator parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to spawn sort worker: {0}")]
    WorkerSpawn(#[from] std::io::Error),

    #[error("Sort worker panicked: {0}")]
    WorkerPanicked(String),
}

impl EngineError {
    /// Returns true if this error is a cooperative cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, EngineError::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Sorting algorithm that reports its progress through an [`ObservableBuffer`]
///
/// Implementations must only access the data through the buffer so that every
/// comparison and swap is paced, cancellable and visible to a renderer.
/// Instances are created by [`SortingAlgorithm::new_instance`] and are not
/// shared between runs.
pub trait Sorter: Send {
    /// Sort the values held by the buffer into non-decreasing order
    ///
    /// # Errors
    /// Returns `EngineError::Cancelled` if the run was cancelled, or
    /// `EngineError::InvalidState` if the algorithm misused the buffer
    fn sort(&mut self, buffer: &ObservableBuffer) -> Result<()>;
}

/// Utility function to check if a slice is sorted in non-decreasing order
pub fn is_sorted(values: &[i32]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_sorted() {
        assert!(is_sorted(&[]));
        assert!(is_sorted(&[1]));
        assert!(is_sorted(&[1, 1, 2, 3]));
        assert!(is_sorted(&[-5, 0, 5]));

        assert!(!is_sorted(&[2, 1]));
        assert!(!is_sorted(&[1, 3, 2]));
    }

    #[test]
    fn test_error_classification() {
        assert!(EngineError::Cancelled.is_cancelled());
        assert!(!EngineError::InvalidState("stack underflow".into()).is_cancelled());
        assert_eq!(EngineError::Cancelled.to_string(), "Sort run was cancelled");
    }
}
