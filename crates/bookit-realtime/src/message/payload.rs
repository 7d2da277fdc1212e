//! Payload shapes carried by inbound live events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bookit_core::types::UserId;
use bookit_entity::notification::{NotificationAction, NotificationType, Priority, priority};

/// A raw chat message relayed to every participant of a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessagePayload {
    /// Server message identifier, when the server includes one.
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Conversation the message belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    /// Author of the message.
    pub sender_id: UserId,
    /// Display name of the author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    /// Message text.
    #[serde(default)]
    pub content: String,
    /// Server-side creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A chat notification addressed to one recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatNotificationPayload {
    /// Server message identifier this notification is about.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Conversation the message belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    /// Author of the message.
    pub sender_id: UserId,
    /// Display name of the author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    /// Optional title chosen by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Preview text.
    #[serde(default)]
    pub message: String,
}

/// A booking lifecycle push (created, confirmed, cancelled, negotiation...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    /// Notification type; defaults to `unknown` when absent.
    #[serde(rename = "type", default)]
    pub kind: NotificationType,
    /// Toast title.
    #[serde(default)]
    pub title: String,
    /// Toast body.
    #[serde(default)]
    pub message: String,
    /// Booking the push is about.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    /// Priority, if any.
    #[serde(
        default,
        deserialize_with = "priority::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<Priority>,
    /// Extra structured data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Actions offered with the push.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<NotificationAction>,
}

/// Key under which chat pushes describing the same logical message collide.
///
/// A raw chat message and the matching chat notification share the key:
/// `chat:<messageId>` when the server sends one, otherwise
/// `chat:<conversationId>:<senderId>`.
///
/// Without a message id, distinct messages from one sender in one
/// conversation also collide inside the dedup window. The unread count can
/// then only run low, never high, until the next poll replaces it.
pub fn chat_dedup_key(
    message_id: Option<&str>,
    conversation_id: Option<&str>,
    sender_id: &UserId,
) -> String {
    match message_id {
        Some(id) => format!("chat:{id}"),
        None => format!("chat:{}:{}", conversation_id.unwrap_or("-"), sender_id),
    }
}

impl ChatMessagePayload {
    /// Dedup key for this message.
    pub fn dedup_key(&self) -> String {
        chat_dedup_key(
            self.message_id.as_deref(),
            self.conversation_id.as_deref(),
            &self.sender_id,
        )
    }
}

impl ChatNotificationPayload {
    /// Dedup key for the message this notification describes.
    pub fn dedup_key(&self) -> String {
        chat_dedup_key(
            self.message_id.as_deref(),
            self.conversation_id.as_deref(),
            &self.sender_id,
        )
    }
}
