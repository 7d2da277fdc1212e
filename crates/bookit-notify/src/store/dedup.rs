//! Suppression of repeated chat pushes within a time window.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

/// Entries kept before stale keys are pruned.
const PRUNE_THRESHOLD: usize = 256;

/// Drops the second push describing the same chat message.
#[derive(Debug)]
pub struct ChatDeduplicator {
    window: Duration,
    /// Last accepted time per key
    last_seen: Mutex<HashMap<String, Instant>>,
}

impl ChatDeduplicator {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_seen: Mutex::new(HashMap::new()),
        }
    }

    /// Returns `true` if the push should proceed, `false` if it repeats a
    /// key accepted less than one window ago.
    pub fn should_dispatch(&self, key: &str) -> bool {
        let mut map = self.last_seen.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();

        if let Some(last) = map.get(key) {
            if now.duration_since(*last) < self.window {
                return false;
            }
        }

        if map.len() >= PRUNE_THRESHOLD {
            let window = self.window;
            map.retain(|_, seen| now.duration_since(*seen) < window);
        }
        map.insert(key.to_string(), now);
        true
    }

    pub fn clear(&self) {
        self.last_seen
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}
