//! Store operations against the fake API.

use bookit_core::types::NotificationId;
use bookit_entity::live::LiveEvent;
use bookit_entity::notification::{NotificationAction, NotificationType};
use bookit_notify::Permission;

use crate::helpers::{
    ApiCall, RecordingNotifier, TestSession, notification, read_notification,
};

#[tokio::test]
async fn test_fetch_replaces_list_and_count() {
    let session = TestSession::new();
    session.api.set_notifications(vec![
        notification("n1", NotificationType::BookingCreated),
        read_notification("n2", NotificationType::ReviewReceived),
    ]);
    session.api.set_count(1);

    session.store.fetch_notifications().await;
    let count = session.store.fetch_unread_count().await.expect("count");

    let snapshot = session.store.snapshot();
    assert_eq!(count, 1);
    assert_eq!(snapshot.unread_count, 1);
    assert_eq!(snapshot.notifications.len(), 2);
}

#[tokio::test]
async fn test_mark_all_as_read_zeroes_count() {
    let session = TestSession::new();
    session.api.set_notifications(vec![
        notification("n1", NotificationType::BookingCreated),
        notification("n2", NotificationType::OfferAccepted),
        notification("n3", NotificationType::Chat),
    ]);
    session.api.set_count(3);
    session.store.fetch_notifications().await;
    session.store.fetch_unread_count().await.expect("count");

    session.store.mark_all_as_read().await;

    let snapshot = session.store.snapshot();
    assert_eq!(snapshot.unread_count, 0);
    assert!(snapshot.notifications.iter().all(|n| n.is_read));
    assert_eq!(session.api.count_of(&ApiCall::MarkAllRead), 1);
}

#[tokio::test]
async fn test_mark_read_twice_decrements_once() {
    let session = TestSession::new();
    session
        .api
        .set_notifications(vec![notification("n1", NotificationType::PaymentReceived)]);
    session.api.set_count(2);
    session.store.fetch_notifications().await;
    session.store.fetch_unread_count().await.expect("count");

    let id = NotificationId::new("n1");
    session.store.mark_as_read(&id).await;
    session.store.mark_as_read(&id).await;

    assert_eq!(session.store.unread_count(), 1);
    assert_eq!(session.api.count_of(&ApiCall::MarkRead("n1".into())), 2);
}

#[tokio::test]
async fn test_mark_read_unknown_id_still_calls_server() {
    let session = TestSession::new();
    session.api.set_count(0);
    session.store.fetch_unread_count().await.expect("count");

    session.store.mark_as_read(&NotificationId::new("ghost")).await;

    assert_eq!(session.store.unread_count(), 0);
    assert_eq!(session.api.calls().last(), Some(&ApiCall::MarkRead("ghost".into())));
}

#[tokio::test]
async fn test_failed_mutation_reconciles_from_server() {
    let session = TestSession::new();
    session
        .api
        .set_notifications(vec![notification("n1", NotificationType::BookingCreated)]);
    session.api.set_count(1);
    session.store.fetch_notifications().await;
    session.store.fetch_unread_count().await.expect("count");

    session.api.set_failing(true);
    session.store.mark_as_read(&NotificationId::new("n1")).await;

    // Optimistic change stays: the reconciliation fetches failed too.
    let snapshot = session.store.snapshot();
    assert_eq!(snapshot.unread_count, 0);
    assert_eq!(snapshot.notifications.len(), 1);

    let calls = session.api.calls();
    let tail = &calls[calls.len() - 3..];
    assert_eq!(
        tail,
        &[
            ApiCall::MarkRead("n1".into()),
            ApiCall::UnreadCount,
            ApiCall::List
        ]
    );
}

#[tokio::test]
async fn test_reconciliation_restores_server_state() {
    let session = TestSession::new();
    session.api.set_notifications(vec![
        notification("n1", NotificationType::BookingCreated),
        notification("n2", NotificationType::BookingConfirmed),
    ]);
    session.api.set_count(2);
    session.store.fetch_notifications().await;
    session.store.fetch_unread_count().await.expect("count");

    session.api.set_mutations_failing(true);
    session.store.remove_notification(&NotificationId::new("n1")).await;

    let snapshot = session.store.snapshot();
    assert_eq!(snapshot.notifications.len(), 2);
    assert_eq!(snapshot.unread_count, 2);
}

#[tokio::test]
async fn test_remove_notification_adjusts_unread() {
    let session = TestSession::new();
    session.api.set_notifications(vec![
        notification("n1", NotificationType::BookingCreated),
        read_notification("n2", NotificationType::BookingConfirmed),
    ]);
    session.api.set_count(1);
    session.store.fetch_notifications().await;
    session.store.fetch_unread_count().await.expect("count");

    session.store.remove_notification(&NotificationId::new("n2")).await;
    assert_eq!(session.store.unread_count(), 1);
    session.store.remove_notification(&NotificationId::new("n1")).await;
    assert_eq!(session.store.unread_count(), 0);
    assert!(session.store.snapshot().notifications.is_empty());
}

#[tokio::test]
async fn test_delete_read_keeps_unread_entries() {
    let session = TestSession::new();
    session.api.set_notifications(vec![
        read_notification("n1", NotificationType::ServiceApproved),
        notification("n2", NotificationType::SystemAlert),
        read_notification("n3", NotificationType::OfferDeclined),
    ]);
    session.store.fetch_notifications().await;

    session.store.delete_read().await;

    let ids: Vec<_> = session
        .store
        .snapshot()
        .notifications
        .iter()
        .map(|n| n.id.to_string())
        .collect();
    assert_eq!(ids, vec!["n2"]);
    assert_eq!(session.api.count_of(&ApiCall::DeleteRead), 1);
}

#[tokio::test]
async fn test_take_action_refreshes() {
    let session = TestSession::new();
    let mut offer = notification("n1", NotificationType::CounterOfferReceived);
    offer.actions = vec![NotificationAction::new("accept_offer", "Accept")];
    session.api.set_notifications(vec![offer.clone()]);
    session.store.fetch_notifications().await;

    let action = offer.action("accept_offer").expect("action attached").clone();
    session
        .store
        .take_action(&offer.id, &action)
        .await
        .expect("action");

    let calls = session.api.calls();
    assert_eq!(
        &calls[1..],
        &[
            ApiCall::TakeAction("n1".into(), "accept_offer".into()),
            ApiCall::List,
            ApiCall::UnreadCount
        ]
    );
}

#[tokio::test]
async fn test_take_action_failure_is_returned() {
    let session = TestSession::new();
    session.api.set_failing(true);

    let err = session
        .store
        .take_action(
            &NotificationId::new("n1"),
            &NotificationAction::new("decline_offer", "Decline"),
        )
        .await
        .expect_err("should fail");

    assert!(err.is_remote());
    assert_eq!(session.api.calls().len(), 1);
}

#[tokio::test]
async fn test_failed_list_degrades_to_empty() {
    let session = TestSession::new();
    session
        .api
        .set_notifications(vec![notification("n1", NotificationType::Chat)]);
    session.store.fetch_notifications().await;
    assert_eq!(session.store.snapshot().notifications.len(), 1);

    session.api.set_failing(true);
    session.store.fetch_notifications().await;
    assert!(session.store.snapshot().notifications.is_empty());
}

#[tokio::test]
async fn test_alert_follows_permission() {
    let granted = TestSession::new();
    granted.store.add_live_event(LiveEvent::new(
        "booking-1-0",
        NotificationType::BookingCreated,
        "New booking",
        "Window cleaning",
    ));
    assert_eq!(granted.notifier.shown().len(), 1);
    assert_eq!(granted.notifier.shown()[0].tag, "booking-1-0");

    let denied = TestSession::with_notifier(RecordingNotifier::decided(Permission::Denied));
    denied.store.add_live_event(LiveEvent::new(
        "booking-1-0",
        NotificationType::BookingCreated,
        "New booking",
        "Window cleaning",
    ));
    assert!(denied.notifier.shown().is_empty());
    assert_eq!(denied.store.snapshot().live_events.len(), 1);
}

#[tokio::test]
async fn test_permission_requested_once() {
    let session = TestSession::with_notifier(RecordingNotifier::new(Permission::Granted));

    assert_eq!(
        session.store.request_notification_permission().await,
        Permission::Granted
    );
    assert_eq!(
        session.store.request_notification_permission().await,
        Permission::Granted
    );
    assert_eq!(session.notifier.requests(), 1);
}
