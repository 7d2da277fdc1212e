//! Live-channel handlers feeding a store.

use std::sync::{Arc, Weak};

use serde_json::json;
use tracing::{debug, trace};

use bookit_core::types::UserId;
use bookit_entity::live::LiveEvent;
use bookit_entity::notification::NotificationType;
use bookit_realtime::message::payload::{
    BookingPayload, ChatMessagePayload, ChatNotificationPayload,
};
use bookit_realtime::{HandlerRegistry, InboundEvent, InboundEventKind};

use super::StoreInner;

const DEFAULT_CHAT_TITLE: &str = "New message";

/// Build the registry of the four inbound handlers for a session of `user_id`.
///
/// Handlers hold the store weakly; once the store is gone they do nothing.
pub(super) fn build(store: Weak<StoreInner>, user_id: UserId) -> HandlerRegistry {
    let registry = HandlerRegistry::new();
    for kind in InboundEventKind::ALL {
        let store = store.clone();
        let user_id = user_id.clone();
        registry.on(kind, move |event| {
            if let Some(inner) = store.upgrade() {
                handle(&inner, &user_id, event);
            }
        });
    }
    registry
}

fn handle(inner: &Arc<StoreInner>, user_id: &UserId, event: InboundEvent) {
    if event.sender() == Some(user_id) {
        trace!(event = %event.kind(), user_id = %user_id, "Ignoring self-sent chat event");
        return;
    }

    match event {
        InboundEvent::ChatMessage(payload) => on_chat_message(inner, payload),
        InboundEvent::ChatNotification(payload) => on_chat_notification(inner, payload),
        InboundEvent::BookingNotification(payload) => on_booking(inner, payload),
        InboundEvent::NewNotification(notification) => {
            if !inner.merge_notification(notification.clone()) {
                debug!(
                    notification_id = %notification.id,
                    "Ignoring already-listed notification"
                );
                return;
            }
            let id = inner.next_live_id(notification.kind);
            inner.add_live_event(LiveEvent::from_notification(id, &notification));
        }
    }
}

fn on_chat_message(inner: &Arc<StoreInner>, payload: ChatMessagePayload) {
    if !inner.dedup.should_dispatch(&payload.dedup_key()) {
        debug!(sender_id = %payload.sender_id, "Dropping duplicate chat push");
        return;
    }
    let title = payload
        .sender_name
        .clone()
        .unwrap_or_else(|| DEFAULT_CHAT_TITLE.to_string());
    let data = json!({
        "messageId": payload.message_id,
        "conversationId": payload.conversation_id,
        "senderId": payload.sender_id,
    });
    let event = LiveEvent::new(
        inner.next_live_id(NotificationType::Chat),
        NotificationType::Chat,
        title,
        payload.content,
    )
    .with_data(data);
    inner.add_live_event(event);
    inner.increment_unread();
}

fn on_chat_notification(inner: &Arc<StoreInner>, payload: ChatNotificationPayload) {
    if !inner.dedup.should_dispatch(&payload.dedup_key()) {
        debug!(sender_id = %payload.sender_id, "Dropping duplicate chat push");
        return;
    }
    let title = payload
        .title
        .clone()
        .or_else(|| payload.sender_name.clone())
        .unwrap_or_else(|| DEFAULT_CHAT_TITLE.to_string());
    let data = json!({
        "messageId": payload.message_id,
        "conversationId": payload.conversation_id,
        "senderId": payload.sender_id,
    });
    let event = LiveEvent::new(
        inner.next_live_id(NotificationType::Chat),
        NotificationType::Chat,
        title,
        payload.message,
    )
    .with_data(data);
    inner.add_live_event(event);
    inner.increment_unread();
}

fn on_booking(inner: &Arc<StoreInner>, payload: BookingPayload) {
    let BookingPayload {
        kind,
        title,
        message,
        booking_id,
        priority,
        data,
        actions,
    } = payload;

    let mut event = LiveEvent::new(inner.next_live_id(kind), kind, title, message)
        .with_priority(priority)
        .with_actions(actions);
    match (data, booking_id) {
        (Some(data), _) => event = event.with_data(data),
        (None, Some(booking_id)) => event = event.with_data(json!({ "bookingId": booking_id })),
        (None, None) => {}
    }

    inner.add_live_event(event);
    inner.increment_unread();
}
