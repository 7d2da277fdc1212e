//! Session-scoped notification store.
//!
//! A [`NotificationStore`] reconciles three sources into one view: on-demand
//! fetches, the unread-count poller, and pushes arriving on the live
//! channel. State sits behind a single `std::sync::Mutex` that is never held
//! across an `.await`; every change bumps a revision on a `watch` channel.

pub mod dedup;
pub mod expiry;
pub mod handlers;
pub mod poller;
pub mod ring;
pub mod settings;
pub mod state;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use bookit_core::error::AppError;
use bookit_core::types::{NotificationId, UserId};
use bookit_entity::live::LiveEvent;
use bookit_entity::notification::{Notification, NotificationAction, NotificationType};
use bookit_realtime::{LiveChannel, LiveConnector};

use crate::alert::{Permission, SystemAlert, SystemNotifier};
use crate::client::NotificationApi;

pub use dedup::ChatDeduplicator;
pub use expiry::ExpiryTimers;
pub use poller::PollHandle;
pub use ring::LiveEventBuffer;
pub use settings::StoreSettings;
pub use state::{StoreSnapshot, StoreState};

/// Notification state of one signed-in session.
///
/// Cheap to clone; clones share the same state.
#[derive(Debug, Clone)]
pub struct NotificationStore {
    inner: Arc<StoreInner>,
}

/// Shared internals. Live handlers, expiry timers and pollers hold this
/// weakly.
#[derive(Debug)]
pub(crate) struct StoreInner {
    api: Arc<dyn NotificationApi>,
    connector: Arc<dyn LiveConnector>,
    notifier: Arc<dyn SystemNotifier>,
    settings: StoreSettings,
    state: Mutex<StoreState>,
    /// Live channel of the current identity.
    session: tokio::sync::Mutex<Option<LiveChannel>>,
    /// Parent of every poller token; replaced on teardown.
    poll_scope: Mutex<CancellationToken>,
    timers: ExpiryTimers,
    dedup: ChatDeduplicator,
    /// Per-session counter keeping live-event ids unique within a millisecond.
    live_seq: AtomicU64,
    /// Bumped by every reset. Responses to calls issued under an older
    /// value are discarded.
    generation: AtomicU64,
    revision: watch::Sender<u64>,
}

impl NotificationStore {
    /// Create an empty store with no live session.
    pub fn new(
        api: Arc<dyn NotificationApi>,
        connector: Arc<dyn LiveConnector>,
        notifier: Arc<dyn SystemNotifier>,
        settings: StoreSettings,
    ) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(StoreInner {
                api,
                connector,
                notifier,
                settings,
                state: Mutex::new(StoreState::new(settings.live_event_capacity)),
                session: tokio::sync::Mutex::new(None),
                poll_scope: Mutex::new(CancellationToken::new()),
                timers: ExpiryTimers::new(),
                dedup: ChatDeduplicator::new(settings.chat_dedup_window),
                live_seq: AtomicU64::new(0),
                generation: AtomicU64::new(0),
                revision,
            }),
        }
    }

    /// Settings this store was built with.
    pub fn settings(&self) -> &StoreSettings {
        &self.inner.settings
    }

    /// Open the live channel for `identity`.
    ///
    /// A no-op if a live session for the same identity is already open. A
    /// channel for the same identity that the transport closed is reopened
    /// with state kept. A session for another identity is torn down first.
    pub async fn init(&self, identity: UserId) -> Result<(), AppError> {
        let mut session = self.inner.session.lock().await;

        if let Some(current) = session.as_ref() {
            if current.user_id() == &identity && current.is_active() {
                debug!(user_id = %identity, "Session already initialised");
                return Ok(());
            }
        }
        match session.take() {
            Some(stale) if stale.user_id() == &identity => {
                warn!(
                    user_id = %identity,
                    conn_id = %stale.connection_id(),
                    "Live channel lost; rejoining"
                );
                stale.close().await;
            }
            Some(previous) => {
                info!(
                    from = %previous.user_id(),
                    to = %identity,
                    "Switching notification session identity"
                );
                self.inner.close_session(previous).await;
            }
            None => {}
        }

        let registry = Arc::new(handlers::build(
            Arc::downgrade(&self.inner),
            identity.clone(),
        ));
        let channel =
            LiveChannel::open(self.inner.connector.as_ref(), identity.clone(), registry).await?;
        *session = Some(channel);

        info!(user_id = %identity, "Notification session started");
        Ok(())
    }

    /// Leave the live channel, stop timers and pollers, and clear all state.
    ///
    /// Safe to call without an open session.
    pub async fn teardown(&self) {
        let previous = self.inner.session.lock().await.take();
        match previous {
            Some(channel) => {
                let user_id = channel.user_id().clone();
                self.inner.close_session(channel).await;
                info!(user_id = %user_id, "Notification session ended");
            }
            None => self.inner.reset(),
        }
    }

    /// Identity of the open session, if any.
    pub async fn current_user(&self) -> Option<UserId> {
        self.inner
            .session
            .lock()
            .await
            .as_ref()
            .map(|c| c.user_id().clone())
    }

    /// Whether a live channel is open and still dispatching.
    pub async fn is_connected(&self) -> bool {
        self.inner
            .session
            .lock()
            .await
            .as_ref()
            .is_some_and(LiveChannel::is_active)
    }

    /// Refresh the unread count from the server.
    ///
    /// On failure the count keeps its previous value.
    pub async fn fetch_unread_count(&self) -> Result<u64, AppError> {
        let generation = self.inner.generation();
        self.inner.fetch_unread_count(generation).await
    }

    /// Replace the list with the server's. On failure the list becomes empty.
    pub async fn fetch_notifications(&self) {
        let generation = self.inner.generation();
        self.inner.fetch_notifications(generation).await;
    }

    /// Mark one notification read, optimistically.
    pub async fn mark_as_read(&self, id: &NotificationId) {
        let generation = self.inner.generation();
        let known = {
            let mut state = self.inner.lock_state();
            match state.mark_read(id) {
                Some(true) => {
                    state.decrement_unread();
                    true
                }
                Some(false) => true,
                None => false,
            }
        };
        if known {
            self.inner.bump();
        } else {
            debug!(notification_id = %id, "Marking a notification not held locally");
        }

        if let Err(e) = self.inner.api.mark_read(id).await {
            warn!(notification_id = %id, error = %e, "Mark as read failed; reconciling");
            self.inner.reconcile(generation).await;
        }
    }

    /// Mark every notification read, optimistically.
    pub async fn mark_all_as_read(&self) {
        let generation = self.inner.generation();
        self.inner.lock_state().mark_all_read();
        self.inner.bump();

        if let Err(e) = self.inner.api.mark_all_read().await {
            warn!(error = %e, "Mark all as read failed; reconciling");
            self.inner.reconcile(generation).await;
        }
    }

    /// Delete one notification, optimistically.
    pub async fn remove_notification(&self, id: &NotificationId) {
        let generation = self.inner.generation();
        let removed = {
            let mut state = self.inner.lock_state();
            let removed = state.remove(id);
            if removed.as_ref().is_some_and(Notification::is_unread) {
                state.decrement_unread();
            }
            removed.is_some()
        };
        if removed {
            self.inner.bump();
        }

        if let Err(e) = self.inner.api.delete(id).await {
            warn!(notification_id = %id, error = %e, "Delete failed; reconciling");
            self.inner.reconcile(generation).await;
        }
    }

    /// Delete every read notification, optimistically.
    pub async fn delete_read(&self) {
        let generation = self.inner.generation();
        let dropped = self.inner.lock_state().drop_read();
        if dropped > 0 {
            self.inner.bump();
        }

        if let Err(e) = self.inner.api.delete_read().await {
            warn!(error = %e, "Delete read failed; reconciling");
            self.inner.reconcile(generation).await;
        }
    }

    /// Perform an action attached to a notification, then refresh from the
    /// server.
    pub async fn take_action(
        &self,
        id: &NotificationId,
        action: &NotificationAction,
    ) -> Result<(), AppError> {
        let generation = self.inner.generation();
        self.inner
            .api
            .take_action(id, &action.action_type, action.data.as_ref())
            .await
            .inspect_err(|e| {
                warn!(
                    notification_id = %id,
                    action = %action.action_type,
                    error = %e,
                    "Notification action failed"
                );
            })?;

        info!(notification_id = %id, action = %action.action_type, "Notification action taken");
        self.inner.fetch_notifications(generation).await;
        let _ = self.inner.fetch_unread_count(generation).await;
        Ok(())
    }

    /// Show a live event and schedule its removal.
    pub fn add_live_event(&self, event: LiveEvent) {
        self.inner.add_live_event(event);
    }

    /// Remove a live event before it expires. Unknown ids are ignored.
    pub fn remove_live_event(&self, id: &str) {
        self.inner.timers.cancel(id);
        let removed = self.inner.lock_state().live_events.remove(id).is_some();
        if removed {
            self.inner.bump();
        }
    }

    /// Ask the host for alert permission unless the user already answered.
    pub async fn request_notification_permission(&self) -> Permission {
        let current = self.inner.notifier.permission();
        if current.is_decided() {
            return current;
        }
        let answer = self.inner.notifier.request_permission().await;
        info!(permission = ?answer, "Alert permission answered");
        answer
    }

    /// Start refreshing the unread count periodically.
    pub fn start_polling(&self) -> PollHandle {
        let token = self
            .inner
            .poll_scope
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .child_token();
        poller::spawn(
            Arc::downgrade(&self.inner),
            self.inner.settings.poll_interval,
            token,
        )
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.inner.lock_state().snapshot()
    }

    /// Current unread count.
    pub fn unread_count(&self) -> u64 {
        self.inner.lock_state().unread_count
    }

    /// Receiver notified with a new revision after every state change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    /// Number of pending live-event expiry timers.
    pub fn pending_timers(&self) -> usize {
        self.inner.timers.len()
    }
}

impl StoreInner {
    fn lock_state(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn bump(&self) {
        self.revision.send_modify(|r| *r = r.wrapping_add(1));
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Apply `update` unless the store was reset after `generation` was read.
    fn apply_if_current(&self, generation: u64, update: impl FnOnce(&mut StoreState)) -> bool {
        {
            let mut state = self.lock_state();
            if self.generation.load(Ordering::Acquire) != generation {
                return false;
            }
            update(&mut state);
        }
        self.bump();
        true
    }

    /// Mint a live-event id: `<type-prefix>-<epoch-millis>-<seq>`.
    fn next_live_id(&self, kind: NotificationType) -> String {
        let seq = self.live_seq.fetch_add(1, Ordering::Relaxed);
        format!(
            "{}-{}-{}",
            kind.id_prefix(),
            Utc::now().timestamp_millis(),
            seq
        )
    }

    fn increment_unread(&self) {
        self.lock_state().increment_unread();
        self.bump();
    }

    /// Merge a pushed notification; counts it when newly merged and unread.
    fn merge_notification(&self, notification: Notification) -> bool {
        let unread = notification.is_unread();
        let merged = {
            let mut state = self.lock_state();
            let merged = state.merge_notification(notification);
            if merged && unread {
                state.increment_unread();
            }
            merged
        };
        if merged {
            self.bump();
        }
        merged
    }

    fn add_live_event(self: &Arc<Self>, event: LiveEvent) {
        let evicted = self.lock_state().live_events.push(event.clone());
        for old in &evicted {
            self.timers.cancel(&old.id);
            debug!(event_id = %old.id, "Live event evicted");
        }

        if self.notifier.permission() == Permission::Granted {
            self.notifier.show(&SystemAlert::from(&event));
        }

        let store = Arc::downgrade(self);
        let lifetime = self.settings.live_event_lifetime;
        let id = event.id.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(lifetime).await;
            if let Some(inner) = store.upgrade() {
                inner.expire_live_event(&id);
            }
        });
        self.timers.schedule(event.id.clone(), handle);

        debug!(event_id = %event.id, kind = %event.kind, "Live event added");
        self.bump();
    }

    fn expire_live_event(&self, id: &str) {
        self.timers.complete(id);
        let removed = self.lock_state().live_events.remove(id).is_some();
        if removed {
            debug!(event_id = %id, "Live event expired");
            self.bump();
        }
    }

    async fn fetch_unread_count(&self, generation: u64) -> Result<u64, AppError> {
        match self.api.unread_count().await {
            Ok(count) => {
                if !self.apply_if_current(generation, |state| state.unread_count = count) {
                    debug!(count, "Discarding unread count fetched before a reset");
                }
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "Failed to refresh unread count");
                Err(e)
            }
        }
    }

    async fn fetch_notifications(&self, generation: u64) {
        let list = match self.api.list().await {
            Ok(list) => list,
            Err(e) => {
                warn!(error = %e, "Failed to fetch notifications; showing none");
                Vec::new()
            }
        };
        if !self.apply_if_current(generation, |state| state.notifications = list) {
            debug!("Discarding notification list fetched before a reset");
        }
    }

    /// Replace optimistic guesses with server state after a failed mutation.
    ///
    /// Unlike [`fetch_notifications`](Self::fetch_notifications) the list is
    /// only replaced when the fetch succeeds.
    async fn reconcile(&self, generation: u64) {
        let _ = self.fetch_unread_count(generation).await;
        match self.api.list().await {
            Ok(list) => {
                if !self.apply_if_current(generation, |state| state.notifications = list) {
                    debug!("Discarding reconciliation fetched before a reset");
                }
            }
            Err(e) => warn!(error = %e, "Reconciliation fetch failed; keeping local list"),
        }
    }

    /// Close `channel` (leave, detach, disconnect) and reset session state.
    async fn close_session(&self, channel: LiveChannel) {
        channel.close().await;
        self.reset();
    }

    fn reset(&self) {
        let cancelled = self.timers.cancel_all();
        {
            let mut scope = self.poll_scope.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::replace(&mut *scope, CancellationToken::new()).cancel();
        }
        self.dedup.clear();
        {
            let mut state = self.lock_state();
            self.generation.fetch_add(1, Ordering::AcqRel);
            state.clear();
        }
        self.live_seq.store(0, Ordering::Relaxed);
        debug!(timers = cancelled, "Notification state cleared");
        self.bump();
    }
}
