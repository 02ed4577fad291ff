//! Sorting Algorithm Implementations
//!
//! Every algorithm implements [`Sorter`](crate::engine::Sorter) and touches the
//! data only through the [`ObservableBuffer`](crate::engine::ObservableBuffer),
//! annotating its progress with highlighted ranges and the special marker.

pub mod bogo;
pub mod bubble;
pub mod comb;
pub mod extended_runs;
pub mod heap;
pub mod insertion;
pub mod merge;
pub mod natural_merge;
pub mod quick;
pub mod radix;
pub mod run_stack_merge;
pub mod selection;
pub mod shaker;
pub mod shell;
pub mod slow;
pub mod smooth;

pub use bogo::BogoSort;
pub use bubble::BubbleSort;
pub use comb::CombSort;
pub use extended_runs::ExtendedRunsMergeSort;
pub use heap::HeapSort;
pub use insertion::InsertionSort;
pub use merge::MergeSort;
pub use natural_merge::{natural_runs, NaturalMergeSort, Run};
pub use quick::{Driver, QuickSort};
pub use radix::{RadixSortLsd, RadixSortMsd};
pub use run_stack_merge::RunStackMergeSort;
pub use selection::SelectionSort;
pub use shaker::{DuplicateShakerSort, ShakerSort};
pub use shell::ShellSort;
pub use slow::SlowSort;
pub use smooth::{HeapForest, SmoothSort};
