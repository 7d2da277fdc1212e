//! Response body shapes accepted from the notifications API.
//!
//! The server may answer with the bare payload or wrap it as
//! `{"success": true, "data": <payload>}`; both decode.

use serde::Deserialize;

use bookit_entity::notification::Notification;

/// Either `{"data": T, ...}` or a bare `T`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    /// `{"success": ..., "data": T}`
    Wrapped {
        /// The payload.
        data: T,
    },
    /// The payload itself.
    Bare(T),
}

impl<T> Envelope<T> {
    /// Unwrap the payload.
    pub fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(data) => data,
        }
    }
}

/// A notification list, bare or keyed.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NotificationList {
    /// `[...]`
    Bare(Vec<Notification>),
    /// `{"notifications": [...]}`
    Keyed {
        /// The notifications.
        notifications: Vec<Notification>,
    },
}

impl NotificationList {
    /// Unwrap the list.
    pub fn into_vec(self) -> Vec<Notification> {
        match self {
            Self::Bare(list) => list,
            Self::Keyed { notifications } => notifications,
        }
    }
}

/// An unread count in any of the shapes the server uses.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum UnreadCount {
    /// `{"count": n}`
    Count {
        /// Unread count.
        count: u64,
    },
    /// `{"unreadCount": n}`
    Camel {
        /// Unread count.
        #[serde(rename = "unreadCount")]
        unread_count: u64,
    },
    /// `n`
    Bare(u64),
}

impl UnreadCount {
    /// The count.
    pub fn value(&self) -> u64 {
        match self {
            Self::Count { count } => *count,
            Self::Camel { unread_count } => *unread_count,
            Self::Bare(n) => *n,
        }
    }
}

/// Build the body of `POST /:id/action`: the action's data fields, with
/// `actionType` set from the argument.
pub fn action_body(action_type: &str, data: Option<&serde_json::Value>) -> serde_json::Value {
    let mut body = serde_json::Map::new();
    match data {
        Some(serde_json::Value::Object(fields)) => {
            body.extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        Some(serde_json::Value::Null) | None => {}
        Some(other) => {
            body.insert("data".to_string(), other.clone());
        }
    }
    body.insert(
        "actionType".to_string(),
        serde_json::Value::String(action_type.to_string()),
    );
    serde_json::Value::Object(body)
}
