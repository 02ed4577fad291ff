//! Sort Session Orchestration
//!
//! This module provides `SortSession`, which owns at most one sort run at a time.
//! A run is executed on a dedicated worker thread against a fresh
//! [`ObservableBuffer`]; starting another run first cancels and joins the
//! current one so that two runs never touch the same session state.

use crate::engine::thread_management::{ManagedThread, ThreadBuilder};
use crate::engine::{
    is_sorted, BufferStats, CancelToken, DataOrdering, DialPacing, EngineConfig, EngineError,
    ObservableBuffer, PacingControl, Result, SortingAlgorithm,
};
use chrono::{DateTime, Utc};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// How a sort run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "message")]
pub enum RunOutcome {
    /// The algorithm returned normally
    Completed,
    /// The run was cancelled before it finished
    Cancelled,
    /// The algorithm misused the buffer
    Failed(String),
}

/// Summary of a finished sort run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub id: Uuid,
    pub algorithm: SortingAlgorithm,
    /// Number of values sorted
    pub length: usize,
    pub started_at: DateTime<Utc>,
    /// Wall clock time of the run, pacing included
    pub elapsed: Duration,
    pub outcome: RunOutcome,
    /// Operation counters at the end of the run
    pub stats: BufferStats,
    /// Whether the values were sorted when the run ended
    pub sorted: bool,
}

impl RunReport {
    /// Check if the run completed normally
    pub fn is_completed(&self) -> bool {
        self.outcome == RunOutcome::Completed
    }
}

/// The run currently owned by a session
#[derive(Debug)]
struct ActiveRun {
    id: Uuid,
    cancel: CancelToken,
    worker: ManagedThread<RunReport>,
}

/// One-run-at-a-time owner of sort runs
///
/// The pacing controls outlive individual runs: a front end can keep the
/// [`PacingControl`] returned by [`SortSession::pacing`] and adjust it while
/// runs come and go.
///
/// # Examples
///
/// ```
/// use sortlab::engine::{EngineConfig, SortSession, SortingAlgorithm};
///
/// let mut config = EngineConfig::default();
/// config.pacing.delay = 0;
/// let mut session = SortSession::new(config).unwrap();
///
/// session.start(SortingAlgorithm::Heap, vec![5, 3, 1, 4, 2]).unwrap();
/// let report = session.wait().unwrap();
/// assert!(report.is_completed());
/// assert_eq!(session.buffer().unwrap().to_vec(), vec![1, 2, 3, 4, 5]);
/// ```
#[derive(Debug)]
pub struct SortSession {
    config: EngineConfig,
    pacing: Arc<PacingControl>,
    buffer: Option<Arc<ObservableBuffer>>,
    current: Option<ActiveRun>,
}

impl SortSession {
    /// Create a new session
    ///
    /// # Errors
    /// Returns `EngineError::InvalidInput` if the configuration is invalid
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let pacing = Arc::new(PacingControl::new(
            config.pacing.delay,
            config.pacing.distribution,
        ));
        Ok(Self {
            config,
            pacing,
            buffer: None,
            current: None,
        })
    }

    /// The configuration this session was created with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Live pacing controls shared with every run of this session
    pub fn pacing(&self) -> Arc<PacingControl> {
        Arc::clone(&self.pacing)
    }

    /// Buffer of the current or most recent run
    pub fn buffer(&self) -> Option<Arc<ObservableBuffer>> {
        self.buffer.clone()
    }

    /// Check if a run is still executing
    pub fn is_running(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|run| run.worker.is_running())
    }

    /// Start sorting `values` with `algorithm`, replacing any current run
    ///
    /// # Returns
    /// The buffer of the new run, for rendering
    ///
    /// # Errors
    /// Returns `EngineError::InvalidInput` if the configured CPU core is not
    /// available, or `EngineError::WorkerSpawn` if the worker thread could not
    /// be created
    pub fn start(
        &mut self,
        algorithm: SortingAlgorithm,
        values: Vec<i32>,
    ) -> Result<Arc<ObservableBuffer>> {
        self.launch(algorithm, values, self.config.data.seed)
    }

    /// Generate data and start sorting it, replacing any current run
    ///
    /// With a seed, both the data and the random choices of the algorithm are
    /// reproducible.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidInput` for a zero count or non-positive
    /// bound, plus the errors of [`SortSession::start`]
    pub fn start_generated(
        &mut self,
        algorithm: SortingAlgorithm,
        ordering: DataOrdering,
        count: usize,
        upper_bound: i32,
        seed: Option<u64>,
    ) -> Result<Arc<ObservableBuffer>> {
        let mut rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let values = ordering.generate(count, upper_bound, &mut rng)?;
        self.launch(algorithm, values, seed)
    }

    /// Start a run with the algorithm and data described by the configuration
    ///
    /// # Errors
    /// Same as [`SortSession::start_generated`]
    pub fn start_configured(&mut self) -> Result<Arc<ObservableBuffer>> {
        let data = self.config.data;
        self.start_generated(
            self.config.algorithm,
            data.ordering,
            data.count,
            data.upper_bound,
            data.seed,
        )
    }

    /// Request cancellation of the current run without waiting for it
    pub fn cancel(&self) {
        if let Some(run) = &self.current {
            tracing::debug!(run_id = %run.id, "cancelling sort run");
            run.cancel.cancel();
        }
    }

    /// Wait for the current run to end
    ///
    /// # Returns
    /// The run's report, or `None` if there was no run or its worker panicked
    pub fn wait(&mut self) -> Option<RunReport> {
        let run = self.current.take()?;
        match run.worker.join() {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::error!(run_id = %run.id, error = %e, "sort worker failed");
                None
            }
        }
    }

    fn launch(
        &mut self,
        algorithm: SortingAlgorithm,
        values: Vec<i32>,
        seed: Option<u64>,
    ) -> Result<Arc<ObservableBuffer>> {
        self.cancel();
        if let Some(report) = self.wait() {
            tracing::debug!(run_id = %report.id, outcome = ?report.outcome, "replaced sort run");
        }

        let id = Uuid::new_v4();
        let cancel = CancelToken::new();
        let pacing = Arc::new(DialPacing::new(Arc::clone(&self.pacing)));
        let buffer = Arc::new(ObservableBuffer::new(values, pacing, cancel.clone()));
        let mut sorter = match seed {
            Some(seed) => algorithm.new_seeded_instance(seed),
            None => algorithm.new_instance(),
        };

        let mut builder = ThreadBuilder::new()
            .thread_name(self.config.worker.thread_name.clone())
            .stack_size(self.config.worker.stack_size);
        if let Some(core) = self.config.worker.pin_core {
            builder = builder.pin_at_core(core)?;
        }

        let run_buffer = Arc::clone(&buffer);
        let worker = builder.spawn(move || {
            let length = run_buffer.len();
            let started_at = Utc::now();
            let start = Instant::now();
            tracing::info!(run_id = %id, %algorithm, length, "sort run started");

            let result = sorter.sort(&run_buffer);
            let elapsed = start.elapsed();
            let outcome = match result {
                Ok(()) => {
                    tracing::info!(run_id = %id, %algorithm, ?elapsed, "sort run completed");
                    RunOutcome::Completed
                }
                Err(EngineError::Cancelled) => {
                    tracing::debug!(run_id = %id, %algorithm, ?elapsed, "sort run cancelled");
                    RunOutcome::Cancelled
                }
                Err(e) => {
                    tracing::error!(run_id = %id, %algorithm, error = %e, "sort run failed");
                    RunOutcome::Failed(e.to_string())
                }
            };

            let (stats, sorted) = run_buffer.view(|view| (view.stats, is_sorted(view.values)));
            RunReport {
                id,
                algorithm,
                length,
                started_at,
                elapsed,
                outcome,
                stats,
                sorted,
            }
        })?;

        self.buffer = Some(Arc::clone(&buffer));
        self.current = Some(ActiveRun { id, cancel, worker });
        Ok(buffer)
    }
}

impl Drop for SortSession {
    fn drop(&mut self) {
        self.cancel();
        self.wait();
    }
}
