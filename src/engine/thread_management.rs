//! Thread management and CPU affinity for sort workers
//!
//! Each sort run executes on its own named worker thread, optionally pinned to a
//! CPU core and with an explicit stack size. The join handle is owned by a
//! [`ManagedThread`], which reports a panicking worker as an error.

use crate::engine::{EngineError, Result};
use core_affinity::CoreId;
use std::thread::{self, JoinHandle};

const DEFAULT_THREAD_NAME: &str = "sort-worker";

/// Thread context for configuring worker threads
#[derive(Debug, Clone, Default)]
pub struct ThreadContext {
    /// CPU core affinity (optional)
    affinity: Option<CoreId>,
    /// Thread name (optional)
    name: Option<String>,
    /// Stack size in bytes (optional)
    stack_size: Option<usize>,
}

impl ThreadContext {
    /// Create a new thread context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set CPU core affinity
    ///
    /// # Arguments
    /// * `core_id` - The CPU core ID to pin the thread to
    ///
    /// # Errors
    /// Returns `EngineError::InvalidInput` if the core is not available on this
    /// system
    pub fn pin_at_core(mut self, core_id: usize) -> Result<Self> {
        validate_core_id(core_id)?;
        self.affinity = Some(CoreId { id: core_id });
        Ok(self)
    }

    /// Set thread name
    pub fn thread_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the stack size of the thread in bytes
    ///
    /// Recursive sorters need one frame per level, which on degenerate inputs is
    /// one frame per element.
    pub fn stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    /// Get the thread name, falling back to `sort-worker`
    pub(crate) fn get_name(&mut self) -> String {
        self.name
            .take()
            .unwrap_or_else(|| DEFAULT_THREAD_NAME.to_string())
    }

    /// Get the CPU affinity, consuming it
    pub(crate) fn get_affinity(&mut self) -> Option<CoreId> {
        self.affinity.take()
    }
}

/// Worker thread whose result can be collected with [`ManagedThread::join`]
///
/// Dropping a managed thread without joining it detaches the thread. The
/// session cancels and joins its worker before letting go of it.
#[derive(Debug)]
pub struct ManagedThread<T> {
    join_handle: JoinHandle<T>,
    thread_name: String,
}

impl<T> ManagedThread<T> {
    pub(crate) fn new(join_handle: JoinHandle<T>, thread_name: String) -> Self {
        Self {
            join_handle,
            thread_name,
        }
    }

    /// Get the thread name
    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }

    /// Wait for the thread to finish and return its result
    ///
    /// # Errors
    /// Returns `EngineError::WorkerPanicked` with the panic message if the
    /// thread panicked
    pub fn join(self) -> Result<T> {
        self.join_handle
            .join()
            .map_err(|payload| EngineError::WorkerPanicked(panic_message(payload.as_ref())))
    }

    /// Check if the thread is still running
    pub fn is_running(&self) -> bool {
        !self.join_handle.is_finished()
    }
}

/// Thread builder with CPU affinity and naming support
#[derive(Debug, Default)]
pub struct ThreadBuilder {
    context: ThreadContext,
}

impl ThreadBuilder {
    /// Create a new thread builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set CPU core affinity
    ///
    /// # Errors
    /// Returns `EngineError::InvalidInput` if the core is not available
    pub fn pin_at_core(mut self, core_id: usize) -> Result<Self> {
        self.context = self.context.pin_at_core(core_id)?;
        Ok(self)
    }

    /// Set thread name
    pub fn thread_name<S: Into<String>>(mut self, name: S) -> Self {
        self.context = self.context.thread_name(name);
        self
    }

    /// Set the stack size in bytes
    pub fn stack_size(mut self, bytes: usize) -> Self {
        self.context = self.context.stack_size(bytes);
        self
    }

    /// Spawn a thread with the configured settings
    ///
    /// # Arguments
    /// * `f` - The function to run in the thread
    ///
    /// # Returns
    /// A ManagedThread owning the thread and its eventual result
    ///
    /// # Errors
    /// Returns `EngineError::WorkerSpawn` if the operating system refused to
    /// create the thread
    pub fn spawn<F, T>(mut self, f: F) -> Result<ManagedThread<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let thread_name = self.context.get_name();
        let affinity = self.context.get_affinity();

        let mut builder = thread::Builder::new().name(thread_name.clone());
        if let Some(bytes) = self.context.stack_size {
            builder = builder.stack_size(bytes);
        }

        let name_for_closure = thread_name.clone();
        let join_handle = builder.spawn(move || {
            set_affinity_if_defined(affinity, &name_for_closure);
            f()
        })?;

        Ok(ManagedThread::new(join_handle, thread_name))
    }
}

fn validate_core_id(core_id: usize) -> Result<()> {
    let available_cores = get_available_cores();
    if available_cores.contains(&core_id) {
        Ok(())
    } else {
        Err(EngineError::InvalidInput(format!(
            "CPU core {core_id} is not available. Available cores: {available_cores:?}"
        )))
    }
}

fn set_affinity_if_defined(affinity: Option<CoreId>, thread_name: &str) {
    if let Some(core_id) = affinity {
        if core_affinity::set_for_current(core_id) {
            tracing::debug!(thread = thread_name, core = core_id.id, "pinned worker thread");
        } else {
            tracing::warn!(thread = thread_name, core = core_id.id, "could not pin worker thread");
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Get available CPU core IDs
pub fn get_available_cores() -> Vec<usize> {
    core_affinity::get_core_ids()
        .unwrap_or_default()
        .iter()
        .map(|core| core.id)
        .collect()
}
