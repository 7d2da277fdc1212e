//! Inbound and outbound live event definitions.

use serde::{Deserialize, Serialize};

use bookit_core::types::UserId;
use bookit_entity::notification::Notification;

use super::payload::{BookingPayload, ChatMessagePayload, ChatNotificationPayload};

/// The four inbound event categories the client subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InboundEventKind {
    /// `chat:message`
    ChatMessage,
    /// `notification:chat`
    ChatNotification,
    /// `notification:booking`
    BookingNotification,
    /// `notification:new`
    NewNotification,
}

impl InboundEventKind {
    /// Every inbound category, in subscription order.
    pub const ALL: [Self; 4] = [
        Self::ChatMessage,
        Self::ChatNotification,
        Self::BookingNotification,
        Self::NewNotification,
    ];

    /// Wire name of the event.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChatMessage => "chat:message",
            Self::ChatNotification => "notification:chat",
            Self::BookingNotification => "notification:booking",
            Self::NewNotification => "notification:new",
        }
    }

    /// Look up a category by wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl std::fmt::Display for InboundEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Events pushed by the server.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// A chat message in one of the user's conversations.
    ChatMessage(ChatMessagePayload),
    /// A chat notification addressed to the user.
    ChatNotification(ChatNotificationPayload),
    /// A booking lifecycle push.
    BookingNotification(BookingPayload),
    /// A freshly created server notification.
    NewNotification(Notification),
}

impl InboundEvent {
    /// Category of this event.
    pub fn kind(&self) -> InboundEventKind {
        match self {
            Self::ChatMessage(_) => InboundEventKind::ChatMessage,
            Self::ChatNotification(_) => InboundEventKind::ChatNotification,
            Self::BookingNotification(_) => InboundEventKind::BookingNotification,
            Self::NewNotification(_) => InboundEventKind::NewNotification,
        }
    }

    /// Sender of chat-derived events.
    pub fn sender(&self) -> Option<&UserId> {
        match self {
            Self::ChatMessage(p) => Some(&p.sender_id),
            Self::ChatNotification(p) => Some(&p.sender_id),
            _ => None,
        }
    }
}

/// Events sent by the client to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum OutboundEvent {
    /// Route this user's events to this connection.
    #[serde(rename = "notification:join")]
    Join {
        /// The signed-in user.
        #[serde(rename = "userId")]
        user_id: UserId,
    },
    /// Stop routing this user's events to this connection.
    #[serde(rename = "notification:leave")]
    Leave {
        /// The signed-in user.
        #[serde(rename = "userId")]
        user_id: UserId,
    },
}

impl OutboundEvent {
    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Join { .. } => "notification:join",
            Self::Leave { .. } => "notification:leave",
        }
    }
}
