//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bookit_core::types::NotificationId;

use super::action::NotificationAction;
use super::kind::NotificationType;
use super::priority::{self, Priority};

/// A notification record owned by the marketplace server and mirrored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique notification identifier.
    #[serde(alias = "_id")]
    pub id: NotificationId,
    /// What happened.
    #[serde(rename = "type", default)]
    pub kind: NotificationType,
    /// Notification title.
    #[serde(default)]
    pub title: String,
    /// Notification body text.
    #[serde(default)]
    pub message: String,
    /// Whether the user has read this notification.
    #[serde(default, alias = "read")]
    pub is_read: bool,
    /// Priority level.
    #[serde(
        default,
        deserialize_with = "priority::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<Priority>,
    /// When the notification was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Additional structured data (offer amount, booking id, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Actions the user can take from the notification.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<NotificationAction>,
}

impl Notification {
    /// Create an unread notification with no optional fields set.
    pub fn new(
        id: impl Into<NotificationId>,
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
            created_at: None,
            data: None,
            actions: Vec::new(),
        }
    }

    /// Check if the notification has been read.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }

    /// Find an attached action by its type tag.
    pub fn action(&self, action_type: &str) -> Option<&NotificationAction> {
        self.actions.iter().find(|a| a.action_type == action_type)
    }
}
