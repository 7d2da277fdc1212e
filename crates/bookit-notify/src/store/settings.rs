//! Tunables of a notification store.

use std::time::Duration;

use bookit_core::config::RealtimeConfig;

/// Timing and sizing knobs of a [`NotificationStore`](super::NotificationStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSettings {
    /// How long a live event stays visible.
    pub live_event_lifetime: Duration,
    /// Maximum number of live events kept.
    pub live_event_capacity: usize,
    /// Unread-count polling interval.
    pub poll_interval: Duration,
    /// Window inside which a second chat push for the same message is dropped.
    pub chat_dedup_window: Duration,
}

impl StoreSettings {
    /// Derive settings from the `realtime` configuration section.
    ///
    /// Capacity is at least one and the poll interval at least one second.
    pub fn from_config(config: &RealtimeConfig) -> Self {
        Self {
            live_event_lifetime: Duration::from_millis(config.live_event_lifetime_ms),
            live_event_capacity: config.live_event_capacity.max(1),
            poll_interval: Duration::from_secs(config.poll_interval_seconds.max(1)),
            chat_dedup_window: Duration::from_millis(config.chat_dedup_window_ms),
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            live_event_lifetime: Duration::from_millis(5000),
            live_event_capacity: 10,
            poll_interval: Duration::from_secs(30),
            chat_dedup_window: Duration::from_millis(1500),
        }
    }
}
