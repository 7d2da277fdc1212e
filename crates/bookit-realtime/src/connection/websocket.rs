//! WebSocket transport for the live channel.

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::Message;
use tracing::{debug, info, warn};
use url::Url;

use bookit_core::error::{AppError, ErrorKind};
use bookit_core::types::UserId;

use crate::message::serializer;
use crate::message::types::OutboundEvent;

use super::connector::{LiveConnection, LiveConnector};

/// Connects to the marketplace push server over WebSocket.
///
/// The connection is scoped to one identity through the `userId` query
/// parameter; frames are JSON text messages.
#[derive(Debug, Clone)]
pub struct WsConnector {
    /// Live-channel server URL.
    server_url: String,
    /// Buffer size of the inbound and outbound queues.
    buffer_size: usize,
}

impl WsConnector {
    /// Create a connector for the given server URL.
    pub fn new(server_url: impl Into<String>, buffer_size: usize) -> Self {
        Self {
            server_url: server_url.into(),
            buffer_size: buffer_size.max(1),
        }
    }

    /// URL for a user's connection.
    pub fn connection_url(&self, user_id: &UserId) -> Result<Url, AppError> {
        let mut url = Url::parse(&self.server_url).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid live-channel URL '{}': {e}", self.server_url),
                e,
            )
        })?;
        url.query_pairs_mut().append_pair("userId", user_id.as_str());
        Ok(url)
    }
}

#[async_trait]
impl LiveConnector for WsConnector {
    async fn connect(&self, user_id: &UserId) -> Result<LiveConnection, AppError> {
        let url = self.connection_url(user_id)?;

        let (ws, _response) = connect_async(url.as_str()).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Transport,
                format!("Failed to open live channel: {e}"),
                e,
            )
        })?;
        info!(user_id = %user_id, "Live channel connected");

        let (mut sink, mut stream) = ws.split();
        let (out_tx, mut out_rx) = mpsc::channel::<OutboundEvent>(self.buffer_size);
        let (in_tx, in_rx) = mpsc::channel(self.buffer_size);

        let writer = tokio::spawn(async move {
            while let Some(event) = out_rx.recv().await {
                let text = match serializer::encode_outbound(&event) {
                    Ok(t) => t,
                    Err(e) => {
                        warn!(event = event.name(), "Failed to encode frame: {}", e);
                        continue;
                    }
                };
                if let Err(e) = sink.send(Message::text(text)).await {
                    warn!(event = event.name(), "Failed to send frame: {}", e);
                    return;
                }
            }
            let _ = sink.send(Message::Close(None)).await;
            let _ = sink.close().await;
            debug!("Live channel writer finished");
        });

        let reader = tokio::spawn(async move {
            while let Some(message) = stream.next().await {
                match message {
                    Ok(Message::Text(text)) => match serializer::decode_inbound(text.as_str()) {
                        Ok(Some(event)) => {
                            if in_tx.send(event).await.is_err() {
                                break;
                            }
                        }
                        Ok(None) => debug!("Ignoring unsubscribed live event"),
                        Err(e) => warn!("Malformed live frame: {}", e),
                    },
                    Ok(Message::Close(frame)) => {
                        debug!(?frame, "Live channel closed by server");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("Live channel read error: {}", e);
                        break;
                    }
                }
            }
        });

        Ok(LiveConnection::new(out_tx, in_rx, writer, Some(reader)))
    }
}
