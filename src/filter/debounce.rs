//! Trailing debounce backed by a single Tokio task.
//!
//! Scheduling aborts whatever is still pending and starts a fresh timer, so
//! at most one action is outstanding and only the last one in a burst runs.
//! Dropping the debouncer aborts the pending action.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Cancel-and-reschedule timer owned by one controller.
#[derive(Debug)]
pub struct Debouncer {
    runtime: Handle,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Creates a debouncer that spawns its timers on `runtime`.
    #[must_use]
    pub const fn new(runtime: Handle, delay: Duration) -> Self {
        Self {
            runtime,
            delay,
            pending: None,
        }
    }

    /// Delay between the last call to [`Self::schedule`] and the action.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Runs `action` after the delay unless another call supersedes it.
    ///
    /// Returns true when a still-pending action was cancelled.
    pub fn schedule<F>(&mut self, action: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        let superseded = self.cancel();
        let delay = self.delay;
        self.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        }));
        superseded
    }

    /// Aborts the pending action. Returns true when one was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(task) if !task.is_finished() => {
                task.abort();
                true
            }
            Some(_) | None => false,
        }
    }

    /// Returns true while an action is waiting for its timer.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if self.cancel() {
            tracing::trace!("aborted pending debounced action on drop");
        }
    }
}
