//! Live channel and notification store configuration.

use serde::{Deserialize, Serialize};

/// Live channel (WebSocket) and store tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Live-channel server URL, e.g. `ws://localhost:5000/ws`.
    pub server_url: String,
    /// How long a live event stays visible, in milliseconds.
    #[serde(default = "default_live_event_lifetime")]
    pub live_event_lifetime_ms: u64,
    /// Maximum number of live events kept in the ring buffer.
    #[serde(default = "default_live_event_capacity")]
    pub live_event_capacity: usize,
    /// Unread-count polling interval in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    /// Window within which chat events for the same message are collapsed.
    #[serde(default = "default_chat_dedup_window")]
    pub chat_dedup_window_ms: u64,
    /// Internal buffer size for inbound and outbound frame queues.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
}

impl RealtimeConfig {
    /// Tuning defaults for the given server URL.
    pub fn with_server_url(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            live_event_lifetime_ms: default_live_event_lifetime(),
            live_event_capacity: default_live_event_capacity(),
            poll_interval_seconds: default_poll_interval(),
            chat_dedup_window_ms: default_chat_dedup_window(),
            channel_buffer_size: default_channel_buffer(),
        }
    }
}

fn default_live_event_lifetime() -> u64 {
    5000
}

fn default_live_event_capacity() -> usize {
    10
}

fn default_poll_interval() -> u64 {
    30
}

fn default_chat_dedup_window() -> u64 {
    1500
}

fn default_channel_buffer() -> usize {
    64
}
