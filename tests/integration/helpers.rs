//! Shared test helpers for integration tests.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Semaphore;

use bookit_core::error::AppError;
use bookit_core::types::{NotificationId, UserId};
use bookit_entity::notification::{Notification, NotificationType};
use bookit_notify::{
    NotificationApi, NotificationStore, Permission, StoreSettings, SystemAlert, SystemNotifier,
};
use bookit_realtime::MemoryConnector;

/// One call observed by [`FakeApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    List,
    UnreadCount,
    MarkRead(String),
    MarkAllRead,
    TakeAction(String, String),
    Delete(String),
    DeleteRead,
}

/// Scriptable in-process notifications API.
#[derive(Debug)]
pub struct FakeApi {
    notifications: Mutex<Vec<Notification>>,
    count: AtomicU64,
    failing: AtomicBool,
    mutations_failing: AtomicBool,
    reads_held: AtomicBool,
    read_gate: Semaphore,
    calls: Mutex<Vec<ApiCall>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            notifications: Mutex::default(),
            count: AtomicU64::default(),
            failing: AtomicBool::default(),
            mutations_failing: AtomicBool::default(),
            reads_held: AtomicBool::default(),
            read_gate: Semaphore::new(0),
            calls: Mutex::default(),
        }
    }
}

impl FakeApi {
    pub fn set_notifications(&self, list: Vec<Notification>) {
        *self.notifications.lock().unwrap() = list;
    }

    pub fn set_count(&self, count: u64) {
        self.count.store(count, Ordering::SeqCst);
    }

    /// Make every subsequent call fail with a transport error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Make mutations fail while reads keep succeeding.
    pub fn set_mutations_failing(&self, failing: bool) {
        self.mutations_failing.store(failing, Ordering::SeqCst);
    }

    /// Keep list and count responses pending until [`release_reads`](Self::release_reads).
    pub fn hold_reads(&self) {
        self.reads_held.store(true, Ordering::SeqCst);
    }

    pub fn release_reads(&self) {
        self.reads_held.store(false, Ordering::SeqCst);
        self.read_gate.add_permits(1024);
    }

    async fn wait_for_release(&self) {
        if self.reads_held.load(Ordering::SeqCst) {
            let _permit = self.read_gate.acquire().await;
        }
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_of(&self, call: &ApiCall) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    fn record(&self, call: ApiCall) -> Result<(), AppError> {
        let is_read = matches!(call, ApiCall::List | ApiCall::UnreadCount);
        self.calls.lock().unwrap().push(call);
        if self.failing.load(Ordering::SeqCst) {
            Err(AppError::transport("Failed to reach server: connection refused"))
        } else if !is_read && self.mutations_failing.load(Ordering::SeqCst) {
            Err(AppError::server_rejection("Failed to update: server responded 500"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl NotificationApi for FakeApi {
    async fn list(&self) -> Result<Vec<Notification>, AppError> {
        self.record(ApiCall::List)?;
        self.wait_for_release().await;
        Ok(self.notifications.lock().unwrap().clone())
    }

    async fn unread_count(&self) -> Result<u64, AppError> {
        self.record(ApiCall::UnreadCount)?;
        self.wait_for_release().await;
        Ok(self.count.load(Ordering::SeqCst))
    }

    async fn mark_read(&self, id: &NotificationId) -> Result<(), AppError> {
        self.record(ApiCall::MarkRead(id.to_string()))
    }

    async fn mark_all_read(&self) -> Result<(), AppError> {
        self.record(ApiCall::MarkAllRead)
    }

    async fn take_action(
        &self,
        id: &NotificationId,
        action_type: &str,
        _data: Option<&Value>,
    ) -> Result<(), AppError> {
        self.record(ApiCall::TakeAction(id.to_string(), action_type.to_string()))
    }

    async fn delete(&self, id: &NotificationId) -> Result<(), AppError> {
        self.record(ApiCall::Delete(id.to_string()))
    }

    async fn delete_read(&self) -> Result<(), AppError> {
        self.record(ApiCall::DeleteRead)
    }
}

/// Notifier that records what it was asked to do.
#[derive(Debug)]
pub struct RecordingNotifier {
    permission: Mutex<Permission>,
    answer: Permission,
    requests: AtomicU64,
    shown: Mutex<Vec<SystemAlert>>,
}

impl RecordingNotifier {
    /// Start undecided; answer permission requests with `answer`.
    pub fn new(answer: Permission) -> Self {
        Self {
            permission: Mutex::new(Permission::Default),
            answer,
            requests: AtomicU64::new(0),
            shown: Mutex::new(Vec::new()),
        }
    }

    /// Start with permission already `permission`.
    pub fn decided(permission: Permission) -> Self {
        let notifier = Self::new(permission);
        *notifier.permission.lock().unwrap() = permission;
        notifier
    }

    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn shown(&self) -> Vec<SystemAlert> {
        self.shown.lock().unwrap().clone()
    }
}

#[async_trait]
impl SystemNotifier for RecordingNotifier {
    fn permission(&self) -> Permission {
        *self.permission.lock().unwrap()
    }

    async fn request_permission(&self) -> Permission {
        self.requests.fetch_add(1, Ordering::SeqCst);
        *self.permission.lock().unwrap() = self.answer;
        self.answer
    }

    fn show(&self, alert: &SystemAlert) {
        self.shown.lock().unwrap().push(alert.clone());
    }
}

/// A store wired to in-process fakes.
pub struct TestSession {
    pub store: NotificationStore,
    pub api: Arc<FakeApi>,
    pub connector: MemoryConnector,
    pub notifier: Arc<RecordingNotifier>,
    pub user: UserId,
}

impl TestSession {
    /// Store for `u-1` with alerts granted.
    pub fn new() -> Self {
        Self::with_notifier(RecordingNotifier::decided(Permission::Granted))
    }

    pub fn with_notifier(notifier: RecordingNotifier) -> Self {
        let api = Arc::new(FakeApi::default());
        let connector = MemoryConnector::new(16);
        let notifier = Arc::new(notifier);
        let store = NotificationStore::new(
            Arc::clone(&api) as Arc<dyn NotificationApi>,
            Arc::new(connector.clone()),
            Arc::clone(&notifier) as Arc<dyn SystemNotifier>,
            StoreSettings::default(),
        );
        Self {
            store,
            api,
            connector,
            notifier,
            user: UserId::new("u-1"),
        }
    }

    /// Same as [`new`](Self::new) with the session already initialised.
    pub async fn started() -> Self {
        let session = Self::new();
        session
            .store
            .init(session.user.clone())
            .await
            .expect("init should succeed");
        session
    }
}

/// Let spawned tasks run until they block.
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

/// Unread server notification.
pub fn notification(id: &str, kind: NotificationType) -> Notification {
    Notification::new(id, kind, format!("Title {id}"), format!("Body {id}"))
}

/// Read server notification.
pub fn read_notification(id: &str, kind: NotificationType) -> Notification {
    let mut n = notification(id, kind);
    n.is_read = true;
    n
}
