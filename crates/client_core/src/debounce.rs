//! Trailing-edge debounce on top of tokio timers.

use std::{
    future::Future,
    sync::{Mutex, PoisonError},
    time::Duration,
};

use tokio::task::JoinHandle;

/// Coalesces bursts of calls into one action run after a quiet period.
///
/// Each [`Debouncer::schedule`] aborts the previous timer if it has not fired
/// yet. Once the quiet period elapses the action is moved onto its own task,
/// so a later schedule never cancels work that already started.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(action);
        });

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.replace(timer) {
            previous.abort();
        }
    }

    /// Drops the pending action, if any. Returns whether one was still waiting.
    pub fn cancel(&self) -> bool {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        match pending.take() {
            Some(timer) if !timer.is_finished() => {
                timer.abort();
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        let pending = self.pending.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(timer) = pending.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/debounce_tests.rs"]
mod tests;
