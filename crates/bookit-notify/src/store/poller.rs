//! Periodic unread-count refresh.

use std::sync::Weak;
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::debug;

use super::StoreInner;

/// Keeps a poller running while held.
///
/// Dropping the handle, calling [`cancel`](Self::cancel), or tearing the
/// store down stops it.
#[derive(Debug)]
#[must_use = "polling stops when the handle is dropped"]
pub struct PollHandle {
    token: CancellationToken,
    _guard: DropGuard,
}

impl PollHandle {
    /// Stop polling.
    pub fn cancel(self) {
        self.token.cancel();
    }

    /// Whether the poller is still scheduled.
    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }
}

/// Spawn a poller refreshing the unread count every `period`, first tick
/// immediately.
pub(super) fn spawn(store: Weak<StoreInner>, period: Duration, token: CancellationToken) -> PollHandle {
    let task_token = token.clone();
    tokio::spawn(async move {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = task_token.cancelled() => break,
                _ = interval.tick() => {
                    let Some(inner) = store.upgrade() else { break };
                    let generation = inner.generation();
                    // Failures are logged by the fetch itself.
                    let fetch = inner.fetch_unread_count(generation);
                    if task_token.run_until_cancelled(fetch).await.is_none() {
                        break;
                    }
                }
            }
        }
        debug!("Unread-count poller stopped");
    });

    PollHandle {
        _guard: token.clone().drop_guard(),
        token,
    }
}
