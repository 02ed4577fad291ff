//! Cancellation Token Implementation
//!
//! This module provides the cooperative cancellation token shared between a sort
//! run and its owner. Every elementary operation checks the token before pacing,
//! and the pacing sleep itself wakes up as soon as the token is cancelled.

use crate::engine::{EngineError, Result};
use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct CancelState {
    /// Alert flag checked on every elementary operation
    cancelled: AtomicBool,
    /// Mutex paired with the condvar for interruptible sleeps
    mutex: Mutex<()>,
    condvar: Condvar,
}

/// Cooperative cancellation token for a single sort run
///
/// Cloning a token yields a handle to the same underlying flag. Cancellation is
/// terminal: once cancelled, a token stays cancelled and a new run needs a new
/// token.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    state: Arc<CancelState>,
}

impl CancelToken {
    /// Create a new, not yet cancelled token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation and wake up any sleeping operation
    pub fn cancel(&self) {
        self.state.cancelled.store(true, Ordering::Release);
        // Taking the lock orders the store before any waiter's re-check
        let _guard = self.state.mutex.lock();
        self.state.condvar.notify_all();
    }

    /// Check if cancellation has been requested
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::Acquire)
    }

    /// Check the token and fail if it has been cancelled
    ///
    /// # Errors
    /// Returns `EngineError::Cancelled` if cancellation was requested
    #[inline]
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(EngineError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Sleep for the given duration unless cancelled first
    ///
    /// # Errors
    /// Returns `EngineError::Cancelled` if the token was cancelled before or
    /// during the sleep
    pub fn sleep(&self, duration: Duration) -> Result<()> {
        self.check()?;
        if duration.is_zero() {
            return Ok(());
        }

        let deadline = Instant::now() + duration;
        let mut guard = self.state.mutex.lock();
        while !self.is_cancelled() {
            if self.state.condvar.wait_until(&mut guard, deadline).timed_out() {
                break;
            }
        }
        drop(guard);
        self.check()
    }
}
