//! In-memory live channel for tests, demos, and single-process setups.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use bookit_core::error::AppError;
use bookit_core::types::UserId;

use crate::message::types::{InboundEvent, OutboundEvent};

use super::connector::{LiveConnection, LiveConnector};

/// What the in-memory server observed, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HubRecord {
    /// A client connected.
    Connected(UserId),
    /// A client sent an event.
    Received(UserId, OutboundEvent),
    /// A client's connection closed.
    Disconnected(UserId),
}

#[derive(Debug, Default)]
struct MemoryHub {
    /// User → sender feeding that user's inbound queue.
    clients: Mutex<HashMap<UserId, mpsc::Sender<InboundEvent>>>,
    /// Event log.
    records: Mutex<Vec<HubRecord>>,
}

impl MemoryHub {
    fn record(&self, record: HubRecord) {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(record);
    }
}

/// Connector whose "server" lives in the same process.
///
/// Clones share one hub, so a test can keep a clone to push events and
/// inspect what clients sent.
#[derive(Debug, Clone)]
pub struct MemoryConnector {
    hub: Arc<MemoryHub>,
    buffer_size: usize,
}

impl MemoryConnector {
    /// Create a new in-memory connector.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            hub: Arc::new(MemoryHub::default()),
            buffer_size: buffer_size.max(1),
        }
    }

    /// Push an event to a connected user. Returns `false` if the user is not connected.
    pub async fn push(&self, user_id: &UserId, event: InboundEvent) -> bool {
        let sender = self
            .hub
            .clients
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(user_id)
            .cloned();
        match sender {
            Some(tx) => tx.send(event).await.is_ok(),
            None => false,
        }
    }

    /// Drop a user's connection from the server side, ending its inbound
    /// stream. Returns `false` if the user is not connected.
    pub fn drop_connection(&self, user_id: &UserId) -> bool {
        let dropped = self
            .hub
            .clients
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(user_id)
            .is_some();
        if dropped {
            debug!(user_id = %user_id, "Memory connection dropped by server");
        }
        dropped
    }

    /// Whether a user currently has an open connection.
    pub fn is_connected(&self, user_id: &UserId) -> bool {
        self.hub
            .clients
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(user_id)
    }

    /// Snapshot of everything the hub observed.
    pub fn records(&self) -> Vec<HubRecord> {
        self.hub
            .records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Default for MemoryConnector {
    fn default() -> Self {
        Self::new(64)
    }
}

#[async_trait]
impl LiveConnector for MemoryConnector {
    async fn connect(&self, user_id: &UserId) -> Result<LiveConnection, AppError> {
        let (in_tx, in_rx) = mpsc::channel(self.buffer_size);
        let (out_tx, mut out_rx) = mpsc::channel::<OutboundEvent>(self.buffer_size);

        self.hub
            .clients
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(user_id.clone(), in_tx);
        self.hub.record(HubRecord::Connected(user_id.clone()));

        let hub = Arc::clone(&self.hub);
        let user = user_id.clone();
        let writer = tokio::spawn(async move {
            while let Some(event) = out_rx.recv().await {
                hub.record(HubRecord::Received(user.clone(), event));
            }
            hub.clients
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .remove(&user);
            hub.record(HubRecord::Disconnected(user.clone()));
            debug!(user_id = %user, "Memory connection closed");
        });

        Ok(LiveConnection::new(out_tx, in_rx, writer, None))
    }
}
