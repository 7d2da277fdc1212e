//! Wire frame wrapping every live channel message.

use serde::{Deserialize, Serialize};

/// A JSON text frame: `{"event": "<name>", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Event name.
    pub event: String,
    /// Event payload. Absent payloads decode as `null`.
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Frame {
    /// Create a frame.
    pub fn new(event: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }
}
