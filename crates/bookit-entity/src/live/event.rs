//! Ephemeral live event shown as a transient toast.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::notification::{Notification, NotificationAction, NotificationType, Priority};

/// An event pushed over the live channel and synthesized client-side.
///
/// Live events are advisory: they are never persisted and disappear from
/// the store after a fixed lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveEvent {
    /// Client-generated identifier, unique within a session.
    pub id: String,
    /// What happened.
    #[serde(rename = "type")]
    pub kind: NotificationType,
    /// Toast title.
    pub title: String,
    /// Toast body.
    pub message: String,
    /// Read flag; always `false` on creation.
    pub is_read: bool,
    /// Priority, if the push carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Structured payload from the push.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Actions offered with the event.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<NotificationAction>,
    /// When the client received the push.
    pub received_at: DateTime<Utc>,
}

impl LiveEvent {
    /// Create an unread live event received now.
    pub fn new(
        id: impl Into<String>,
        kind: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            message: message.into(),
            is_read: false,
            priority: None,
            data: None,
            actions: Vec::new(),
            received_at: Utc::now(),
        }
    }

    /// Build a live event mirroring a pushed server notification.
    pub fn from_notification(id: impl Into<String>, notification: &Notification) -> Self {
        Self {
            priority: notification.priority,
            data: notification.data.clone(),
            actions: notification.actions.clone(),
            ..Self::new(
                id,
                notification.kind,
                notification.title.clone(),
                notification.message.clone(),
            )
        }
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: Option<Priority>) -> Self {
        self.priority = priority;
        self
    }

    /// Attach structured data.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Attach actions.
    pub fn with_actions(mut self, actions: Vec<NotificationAction>) -> Self {
        self.actions = actions;
        self
    }
}
