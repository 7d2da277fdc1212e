//! Live session lifecycle and push handling over the in-memory connector.

use std::time::Duration;

use bookit_core::types::UserId;
use bookit_entity::notification::{NotificationType, Priority};
use bookit_realtime::connection::memory::HubRecord;
use bookit_realtime::message::payload::{
    BookingPayload, ChatMessagePayload, ChatNotificationPayload,
};
use bookit_realtime::{InboundEvent, OutboundEvent};

use crate::helpers::{ApiCall, TestSession, notification, settle};

fn chat_message(message_id: &str, sender: &str) -> InboundEvent {
    InboundEvent::ChatMessage(ChatMessagePayload {
        message_id: Some(message_id.to_string()),
        conversation_id: Some("c-1".to_string()),
        sender_id: UserId::new(sender),
        sender_name: Some("Ana".to_string()),
        content: "Running ten minutes late".to_string(),
        created_at: None,
    })
}

fn chat_notification(message_id: &str, sender: &str) -> InboundEvent {
    InboundEvent::ChatNotification(ChatNotificationPayload {
        message_id: Some(message_id.to_string()),
        conversation_id: Some("c-1".to_string()),
        sender_id: UserId::new(sender),
        sender_name: Some("Ana".to_string()),
        title: None,
        message: "Running ten minutes late".to_string(),
    })
}

fn booking(title: &str) -> InboundEvent {
    InboundEvent::BookingNotification(BookingPayload {
        kind: NotificationType::BookingCreated,
        title: title.to_string(),
        message: "Deep clean, Saturday 10:00".to_string(),
        booking_id: Some("b-42".to_string()),
        priority: Some(Priority::High),
        data: None,
        actions: Vec::new(),
    })
}

#[tokio::test]
async fn test_init_joins_once_per_identity() {
    let session = TestSession::started().await;
    session
        .store
        .init(session.user.clone())
        .await
        .expect("repeat init");

    let connects = session
        .connector
        .records()
        .into_iter()
        .filter(|r| matches!(r, HubRecord::Connected(_)))
        .count();
    assert_eq!(connects, 1);
    assert_eq!(session.store.current_user().await, Some(session.user.clone()));
}

#[tokio::test]
async fn test_teardown_leaves_before_disconnect() {
    let session = TestSession::started().await;
    session.store.teardown().await;
    settle().await;

    let user = session.user.clone();
    assert_eq!(
        session.connector.records(),
        vec![
            HubRecord::Connected(user.clone()),
            HubRecord::Received(user.clone(), OutboundEvent::Join { user_id: user.clone() }),
            HubRecord::Received(user.clone(), OutboundEvent::Leave { user_id: user.clone() }),
            HubRecord::Disconnected(user.clone()),
        ]
    );
    assert!(!session.connector.is_connected(&user));
    assert_eq!(session.store.current_user().await, None);
}

#[tokio::test]
async fn test_identity_switch_tears_down_previous() {
    let session = TestSession::started().await;
    assert!(session.connector.push(&session.user, booking("Booked")).await);
    settle().await;
    assert_eq!(session.store.unread_count(), 1);

    let other = UserId::new("u-2");
    session.store.init(other.clone()).await.expect("switch");
    settle().await;

    let snapshot = session.store.snapshot();
    assert_eq!(snapshot.unread_count, 0);
    assert!(snapshot.live_events.is_empty());
    assert_eq!(session.store.pending_timers(), 0);
    assert!(!session.connector.is_connected(&session.user));
    assert!(session.connector.is_connected(&other));
    assert!(session.connector.records().contains(&HubRecord::Received(
        session.user.clone(),
        OutboundEvent::Leave { user_id: session.user.clone() }
    )));
}

#[tokio::test]
async fn test_teardown_discards_responses_in_flight() {
    let session = TestSession::started().await;
    session.api.set_count(7);
    session
        .api
        .set_notifications(vec![notification("n-1", NotificationType::BookingCreated)]);
    session.api.hold_reads();

    let poller = session.store.start_polling();
    let store = session.store.clone();
    let fetch = tokio::spawn(async move { store.fetch_notifications().await });
    settle().await;
    assert_eq!(session.api.count_of(&ApiCall::List), 1);
    assert_eq!(session.api.count_of(&ApiCall::UnreadCount), 1);

    session.store.teardown().await;
    session.api.release_reads();
    fetch.await.expect("fetch task");
    settle().await;

    let snapshot = session.store.snapshot();
    assert_eq!(snapshot.unread_count, 0);
    assert!(snapshot.notifications.is_empty());
    assert!(!poller.is_active());
    assert_eq!(session.store.current_user().await, None);
}

#[tokio::test]
async fn test_identity_switch_discards_previous_user_responses() {
    let session = TestSession::started().await;
    session.api.set_count(7);
    session
        .api
        .set_notifications(vec![notification("n-1", NotificationType::BookingCreated)]);
    session.api.hold_reads();

    let store = session.store.clone();
    let list = tokio::spawn(async move { store.fetch_notifications().await });
    let store = session.store.clone();
    let count = tokio::spawn(async move { store.fetch_unread_count().await });
    settle().await;

    let other = UserId::new("u-2");
    session.store.init(other.clone()).await.expect("switch");
    session.api.release_reads();
    list.await.expect("list task");
    assert_eq!(count.await.expect("count task").expect("count"), 7);
    settle().await;

    let snapshot = session.store.snapshot();
    assert_eq!(snapshot.unread_count, 0);
    assert!(snapshot.notifications.is_empty());
    assert_eq!(session.store.current_user().await, Some(other));
}

#[tokio::test]
async fn test_init_rejoins_after_transport_drop() {
    let session = TestSession::started().await;
    assert!(session.connector.push(&session.user, booking("Booked")).await);
    settle().await;
    assert_eq!(session.store.unread_count(), 1);

    assert!(session.connector.drop_connection(&session.user));
    settle().await;
    assert!(!session.store.is_connected().await);

    session
        .store
        .init(session.user.clone())
        .await
        .expect("rejoin");
    assert!(session.store.is_connected().await);
    assert_eq!(session.store.unread_count(), 1);

    let joins = session
        .connector
        .records()
        .into_iter()
        .filter(|r| matches!(r, HubRecord::Received(_, OutboundEvent::Join { .. })))
        .count();
    assert_eq!(joins, 2);

    assert!(session.connector.push(&session.user, booking("Confirmed")).await);
    settle().await;
    assert_eq!(session.store.unread_count(), 2);
}

#[tokio::test]
async fn test_booking_push_adds_live_event() {
    let session = TestSession::started().await;
    assert!(session.connector.push(&session.user, booking("New booking")).await);
    settle().await;

    let snapshot = session.store.snapshot();
    assert_eq!(snapshot.unread_count, 1);
    assert_eq!(snapshot.live_events.len(), 1);
    let event = &snapshot.live_events[0];
    assert!(event.id.starts_with("booking-"));
    assert_eq!(event.priority, Some(Priority::High));
    assert!(!event.is_read);
    assert_eq!(
        event.data.as_ref().and_then(|d| d.get("bookingId")),
        Some(&serde_json::json!("b-42"))
    );
    assert_eq!(session.notifier.shown().len(), 1);
}

#[tokio::test]
async fn test_self_sent_chat_is_ignored() {
    let session = TestSession::started().await;
    let me = session.user.to_string();
    session.connector.push(&session.user, chat_message("m-1", &me)).await;
    session
        .connector
        .push(&session.user, chat_notification("m-2", &me))
        .await;
    settle().await;

    let snapshot = session.store.snapshot();
    assert_eq!(snapshot.unread_count, 0);
    assert!(snapshot.live_events.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_chat_pair_counts_once() {
    let session = TestSession::started().await;
    session
        .connector
        .push(&session.user, chat_message("m-1", "u-9"))
        .await;
    session
        .connector
        .push(&session.user, chat_notification("m-1", "u-9"))
        .await;
    settle().await;

    let snapshot = session.store.snapshot();
    assert_eq!(snapshot.unread_count, 1);
    assert_eq!(snapshot.live_events.len(), 1);
    assert_eq!(snapshot.live_events[0].kind, NotificationType::Chat);
    assert_eq!(snapshot.live_events[0].title, "Ana");

    // A different message from the same sender is not a duplicate.
    session
        .connector
        .push(&session.user, chat_notification("m-2", "u-9"))
        .await;
    settle().await;
    assert_eq!(session.store.unread_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_chat_without_ids_undercounts_until_poll() {
    let session = TestSession::started().await;
    for content in ["On my way", "Parking now"] {
        let event = InboundEvent::ChatMessage(ChatMessagePayload {
            message_id: None,
            conversation_id: Some("c-1".to_string()),
            sender_id: UserId::new("u-9"),
            sender_name: None,
            content: content.to_string(),
            created_at: None,
        });
        session.connector.push(&session.user, event).await;
    }
    settle().await;
    assert_eq!(session.store.unread_count(), 1);

    session.api.set_count(2);
    let _poller = session.store.start_polling();
    settle().await;
    assert_eq!(session.store.unread_count(), 2);
}

#[tokio::test]
async fn test_new_notification_merges_once() {
    let session = TestSession::started().await;
    let pushed = notification("n-77", NotificationType::OfferAccepted);

    for _ in 0..2 {
        session
            .connector
            .push(&session.user, InboundEvent::NewNotification(pushed.clone()))
            .await;
    }
    settle().await;

    let snapshot = session.store.snapshot();
    assert_eq!(snapshot.notifications.len(), 1);
    assert_eq!(snapshot.notifications[0].id.as_str(), "n-77");
    assert_eq!(snapshot.unread_count, 1);
    assert_eq!(snapshot.live_events.len(), 1);
}

#[tokio::test]
async fn test_new_notification_goes_to_head() {
    let session = TestSession::started().await;
    session
        .api
        .set_notifications(vec![notification("n-1", NotificationType::Chat)]);
    session.store.fetch_notifications().await;

    session
        .connector
        .push(
            &session.user,
            InboundEvent::NewNotification(notification("n-2", NotificationType::PaymentReceived)),
        )
        .await;
    settle().await;

    let ids: Vec<_> = session
        .store
        .snapshot()
        .notifications
        .iter()
        .map(|n| n.id.to_string())
        .collect();
    assert_eq!(ids, vec!["n-2", "n-1"]);
}

#[tokio::test(start_paused = true)]
async fn test_eleventh_push_evicts_oldest() {
    let session = TestSession::started().await;
    for i in 0..11 {
        session
            .connector
            .push(&session.user, booking(&format!("Booking {i}")))
            .await;
    }
    settle().await;

    let snapshot = session.store.snapshot();
    assert_eq!(snapshot.live_events.len(), 10);
    assert_eq!(snapshot.live_events[0].title, "Booking 10");
    assert!(snapshot.live_events.iter().all(|e| e.title != "Booking 0"));
    assert_eq!(snapshot.unread_count, 11);
}

#[tokio::test(start_paused = true)]
async fn test_pushed_event_expires() {
    let session = TestSession::started().await;
    session.connector.push(&session.user, booking("Booked")).await;
    settle().await;

    tokio::time::sleep(Duration::from_millis(4999)).await;
    assert_eq!(session.store.snapshot().live_events.len(), 1);
    tokio::time::sleep(Duration::from_millis(2)).await;
    assert!(session.store.snapshot().live_events.is_empty());
    // Expiry does not touch the count.
    assert_eq!(session.store.unread_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_teardown_cancels_pending_timers() {
    let session = TestSession::started().await;
    session.connector.push(&session.user, booking("A")).await;
    session.connector.push(&session.user, booking("B")).await;
    settle().await;
    assert_eq!(session.store.pending_timers(), 2);

    session.store.teardown().await;
    assert_eq!(session.store.pending_timers(), 0);
    let mut revisions = session.store.subscribe();
    revisions.mark_unchanged();

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(!revisions.has_changed().expect("store alive"));
}

#[tokio::test(start_paused = true)]
async fn test_polling_ticks_until_dropped() {
    let session = TestSession::started().await;
    session.api.set_count(4);

    let handle = session.store.start_polling();
    settle().await;
    assert_eq!(session.api.count_of(&ApiCall::UnreadCount), 1);
    assert_eq!(session.store.unread_count(), 4);

    tokio::time::sleep(Duration::from_secs(30)).await;
    settle().await;
    assert_eq!(session.api.count_of(&ApiCall::UnreadCount), 2);

    drop(handle);
    settle().await;
    tokio::time::sleep(Duration::from_secs(90)).await;
    settle().await;
    assert_eq!(session.api.count_of(&ApiCall::UnreadCount), 2);
}

#[tokio::test(start_paused = true)]
async fn test_teardown_stops_polling() {
    let session = TestSession::started().await;
    let handle = session.store.start_polling();
    settle().await;
    assert!(handle.is_active());

    session.store.teardown().await;
    assert!(!handle.is_active());
    tokio::time::sleep(Duration::from_secs(90)).await;
    settle().await;
    assert_eq!(session.api.count_of(&ApiCall::UnreadCount), 1);
}

#[tokio::test]
async fn test_unread_count_stays_non_negative() {
    let session = TestSession::started().await;
    session
        .store
        .mark_as_read(&bookit_core::types::NotificationId::new("missing"))
        .await;
    session.store.mark_all_as_read().await;
    assert_eq!(session.store.unread_count(), 0);
}
