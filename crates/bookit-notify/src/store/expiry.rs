//! Cancellable expiry timers keyed by live-event id.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::task::JoinHandle;

/// Registry of pending expiry tasks.
#[derive(Debug, Default)]
pub struct ExpiryTimers {
    timers: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl ExpiryTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track the expiry task for `id`, aborting any previous one.
    pub fn schedule(&self, id: impl Into<String>, handle: JoinHandle<()>) {
        let mut timers = self.timers.lock().unwrap_or_else(|e| e.into_inner());
        timers.retain(|_, h| !h.is_finished());
        if let Some(previous) = timers.insert(id.into(), handle) {
            previous.abort();
        }
    }

    /// Abort the timer for `id`. Returns whether one was pending.
    pub fn cancel(&self, id: &str) -> bool {
        let removed = self
            .timers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(id);
        match removed {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Forget the timer for `id` without aborting it. Called by the timer itself.
    pub fn complete(&self, id: &str) {
        self.timers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(id);
    }

    /// Abort every pending timer. Returns how many were aborted.
    pub fn cancel_all(&self) -> usize {
        let drained: Vec<_> = self
            .timers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .drain()
            .collect();
        let count = drained.len();
        for (_, handle) in drained {
            handle.abort();
        }
        count
    }

    /// Number of tracked timers.
    pub fn len(&self) -> usize {
        self.timers.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
