//! Debouncing for bursts of calls (e.g. search-as-you-type)
//!
//! A library helper for interactive front ends. The one-shot CLI never
//! issues bursts, so it does not use it.

use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Delays an action until calls have stopped arriving for `wait`
///
/// Each [`call`](Debouncer::call) cancels the pending one, so only the last
/// call of a burst runs. Must be used inside a tokio runtime.
#[derive(Debug)]
pub struct Debouncer {
    wait: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: Mutex::new(None),
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Schedules `action` to run after the wait, replacing any pending action
    pub fn call<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let wait = self.wait;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            action();
        });

        let previous = self
            .pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Drops the pending action, if any
    pub fn cancel(&self) {
        if let Some(pending) = self.pending.lock().unwrap_or_else(|e| e.into_inner()).take() {
            pending.abort();
        }
    }
}
