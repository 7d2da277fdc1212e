//! Connector trait and the transport-neutral connection handle.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

use bookit_core::error::AppError;
use bookit_core::types::UserId;

use crate::message::types::{InboundEvent, OutboundEvent};

/// Unique connection identifier
pub type ConnectionId = Uuid;

/// How long `close` waits for queued outbound frames to flush.
const FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

/// Opens live channel connections scoped to a user identity.
#[async_trait]
pub trait LiveConnector: Send + Sync + std::fmt::Debug {
    /// Open a connection for `user_id`.
    async fn connect(&self, user_id: &UserId) -> Result<LiveConnection, AppError>;
}

/// An open connection, independent of the transport behind it.
///
/// Outbound events are queued on `outbound` and written in order by the
/// transport's writer task; decoded inbound events arrive on `inbound`.
#[derive(Debug)]
pub struct LiveConnection {
    /// Unique connection ID
    pub id: ConnectionId,
    /// Queue of events to send.
    pub outbound: mpsc::Sender<OutboundEvent>,
    /// Decoded events pushed by the server.
    pub inbound: mpsc::Receiver<InboundEvent>,
    /// Transport tasks.
    pub guard: ConnectionGuard,
}

impl LiveConnection {
    /// Assemble a connection from its queues and transport tasks.
    pub fn new(
        outbound: mpsc::Sender<OutboundEvent>,
        inbound: mpsc::Receiver<InboundEvent>,
        writer: JoinHandle<()>,
        reader: Option<JoinHandle<()>>,
    ) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            outbound,
            inbound,
            guard: ConnectionGuard {
                id,
                writer: Some(writer),
                reader,
            },
        }
    }
}

/// Owns the transport tasks of a connection; aborts them when dropped.
#[derive(Debug)]
pub struct ConnectionGuard {
    id: ConnectionId,
    writer: Option<JoinHandle<()>>,
    reader: Option<JoinHandle<()>>,
}

impl ConnectionGuard {
    /// Close the transport.
    ///
    /// Every clone of the outbound sender must already be dropped: the writer
    /// drains what is queued, sends a close frame and exits. The reader is
    /// aborted afterwards.
    pub async fn close(mut self) {
        if let Some(mut writer) = self.writer.take() {
            if tokio::time::timeout(FLUSH_TIMEOUT, &mut writer).await.is_err() {
                debug!(conn_id = %self.id, "Writer flush timed out");
                writer.abort();
            }
        }
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        if let Some(writer) = self.writer.take() {
            writer.abort();
        }
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }
}
