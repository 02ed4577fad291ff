//! `SortLab` - Instrumented Sorting Engine
//!
//! Classic sorting algorithms running against an observable buffer. Every
//! comparison and swap goes through the buffer, which counts it, delays it
//! according to a live-tunable pacing dial and aborts the run once it has been
//! cancelled. A renderer can poll consistent snapshots of the values, the
//! highlighted ranges and the special marker at any time.
//!
//! ## Features
//!
//! - **23 algorithms**: from selection sort to smoothsort, radix sorts and bogosort
//! - **Observable**: highlighted range stack, special marker, auxiliary array
//! - **Paced**: exponential delay dial with a compare/swap distribution
//! - **Cancellable**: cooperative cancellation checked on every operation
//! - **One run per session**: runs execute on a dedicated worker thread
//!
//! ## Quick Start
//!
//! ```rust
//! use sortlab::{DataOrdering, EngineConfig, SortSession, SortingAlgorithm};
//!
//! let mut config = EngineConfig::default();
//! config.pacing.delay = 0;
//! let mut session = SortSession::new(config).unwrap();
//!
//! // Start a run on generated data
//! let buffer = session
//!     .start_generated(SortingAlgorithm::Smooth, DataOrdering::SawTeeth, 200, 1000, Some(1))
//!     .unwrap();
//!
//! // A renderer would poll `buffer.snapshot()` while the run is going on
//! let report = session.wait().unwrap();
//! assert!(report.is_completed());
//! assert!(sortlab::is_sorted(&buffer.to_vec()));
//! ```
//!
//! ## Architecture
//!
//! - **`ObservableBuffer`**: the values, auxiliary array and highlight state of one run
//! - **`PacingStrategy`**: how long each elementary operation is delayed
//! - **`CancelToken`**: cooperative stop signal shared by a run and its owner
//! - **`Sorter`**: an algorithm driving the buffer
//! - **`SortingAlgorithm`**: the registry of algorithms and their factories
//! - **`SortSession`**: owns at most one run and its worker thread

pub mod engine;

// Re-export the main types for convenience
pub use engine::{
    // Utility functions
    is_sorted,
    // Buffer
    ArrayId,
    BufferSnapshot,
    BufferStats,
    CancelToken,
    // Configuration
    DataConfig,
    DataOrdering,
    // Pacing
    DialPacing,
    EngineConfig,
    // Error types
    EngineError,
    FixedPacing,
    HighlightRange,
    NoPacing,
    ObservableBuffer,
    OpCost,
    PacingConfig,
    PacingControl,
    PacingStrategy,
    Result,
    // Sessions
    RunOutcome,
    RunReport,
    SortSession,
    // Algorithms
    Sorter,
    SortingAlgorithm,
    WorkerConfig,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the version of the `SortLab` library
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
