//! Actions a user can take directly from a notification.

use serde::{Deserialize, Serialize};

/// Visual style tag of an action button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStyle {
    /// Positive outcome (accept, confirm).
    Success,
    /// Needs care (counter, reschedule).
    Warning,
    /// Destructive (decline, cancel).
    Danger,
    /// Neutral default.
    #[default]
    #[serde(other)]
    Primary,
}

/// An action attached to a notification, e.g. "Accept offer".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationAction {
    /// Action type tag submitted back to the server as `actionType`.
    #[serde(rename = "type")]
    pub action_type: String,
    /// Button label.
    pub label: String,
    /// Visual style tag.
    #[serde(default)]
    pub style: ActionStyle,
    /// Extra fields merged into the action request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl NotificationAction {
    /// Create an action with the default style and no data.
    pub fn new(action_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            label: label.into(),
            style: ActionStyle::default(),
            data: None,
        }
    }

    /// Set the style tag.
    pub fn with_style(mut self, style: ActionStyle) -> Self {
        self.style = style;
        self
    }

    /// Attach structured data.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}
