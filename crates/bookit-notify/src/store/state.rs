//! In-memory notification state and its snapshot form.

use serde::Serialize;

use bookit_core::types::NotificationId;
use bookit_entity::live::LiveEvent;
use bookit_entity::notification::Notification;

use super::ring::LiveEventBuffer;

/// Mutable state of one session. Lives behind the store's mutex.
#[derive(Debug, Clone)]
pub struct StoreState {
    pub unread_count: u64,
    pub notifications: Vec<Notification>,
    pub live_events: LiveEventBuffer,
}

impl StoreState {
    pub fn new(live_event_capacity: usize) -> Self {
        Self {
            unread_count: 0,
            notifications: Vec::new(),
            live_events: LiveEventBuffer::new(live_event_capacity),
        }
    }

    pub fn increment_unread(&mut self) {
        self.unread_count = self.unread_count.saturating_add(1);
    }

    /// Decrement the unread count, never below zero.
    pub fn decrement_unread(&mut self) {
        self.unread_count = self.unread_count.saturating_sub(1);
    }

    /// Flag the entry with `id` as read.
    ///
    /// Returns `None` for an unknown id, otherwise whether the entry was
    /// unread before the call.
    pub fn mark_read(&mut self, id: &NotificationId) -> Option<bool> {
        let entry = self.notifications.iter_mut().find(|n| &n.id == id)?;
        let was_unread = entry.is_unread();
        entry.is_read = true;
        Some(was_unread)
    }

    /// Flag every entry as read and zero the count.
    pub fn mark_all_read(&mut self) {
        for notification in &mut self.notifications {
            notification.is_read = true;
        }
        self.unread_count = 0;
    }

    /// Remove the entry with `id`.
    pub fn remove(&mut self, id: &NotificationId) -> Option<Notification> {
        let index = self.notifications.iter().position(|n| &n.id == id)?;
        Some(self.notifications.remove(index))
    }

    /// Drop every read entry. Returns how many were dropped.
    pub fn drop_read(&mut self) -> usize {
        let before = self.notifications.len();
        self.notifications.retain(Notification::is_unread);
        before - self.notifications.len()
    }

    /// Insert `notification` at the head unless its id is already listed.
    ///
    /// Returns whether it was inserted.
    pub fn merge_notification(&mut self, notification: Notification) -> bool {
        if self.notifications.iter().any(|n| n.id == notification.id) {
            return false;
        }
        self.notifications.insert(0, notification);
        true
    }

    pub fn clear(&mut self) {
        self.unread_count = 0;
        self.notifications.clear();
        self.live_events.clear();
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            unread_count: self.unread_count,
            notifications: self.notifications.clone(),
            live_events: self.live_events.iter().cloned().collect(),
        }
    }
}

/// Point-in-time copy of the store, handed to presentation surfaces.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    /// Unread notifications according to the last reconciled view.
    pub unread_count: u64,
    /// Server notifications, live-merged entries first.
    pub notifications: Vec<Notification>,
    /// Visible live events, newest first.
    pub live_events: Vec<LiveEvent>,
}
