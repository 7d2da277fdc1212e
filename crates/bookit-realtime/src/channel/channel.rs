//! The live channel owned by one signed-in identity.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use bookit_core::error::AppError;
use bookit_core::types::UserId;

use crate::connection::connector::{ConnectionGuard, ConnectionId, LiveConnection, LiveConnector};
use crate::message::types::OutboundEvent;

use super::registry::HandlerRegistry;

/// One open connection, announced to the server, with handlers attached.
///
/// Inbound events are dispatched on a single task, one at a time, in arrival
/// order.
#[derive(Debug)]
pub struct LiveChannel {
    user_id: UserId,
    conn_id: ConnectionId,
    outbound: mpsc::Sender<OutboundEvent>,
    handlers: Arc<HandlerRegistry>,
    dispatcher: JoinHandle<()>,
    cancel: CancellationToken,
    guard: ConnectionGuard,
}

impl LiveChannel {
    /// Connect for `user_id`, announce `notification:join`, and start
    /// dispatching inbound events to `handlers`.
    pub async fn open(
        connector: &dyn LiveConnector,
        user_id: UserId,
        handlers: Arc<HandlerRegistry>,
    ) -> Result<Self, AppError> {
        let LiveConnection {
            id: conn_id,
            outbound,
            mut inbound,
            guard,
        } = connector.connect(&user_id).await?;

        outbound
            .send(OutboundEvent::Join {
                user_id: user_id.clone(),
            })
            .await
            .map_err(|_| AppError::session("Live channel closed before join"))?;

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let registry = Arc::clone(&handlers);
        let dispatcher = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    event = inbound.recv() => match event {
                        Some(event) => {
                            let kind = event.kind();
                            if !registry.dispatch(event) {
                                trace!(event = %kind, "No handler attached");
                            }
                        }
                        None => {
                            warn!(conn_id = %conn_id, "Live channel closed by transport");
                            break;
                        }
                    },
                }
            }
        });

        info!(
            conn_id = %conn_id,
            user_id = %user_id,
            handlers = handlers.len(),
            "Live channel joined"
        );

        Ok(Self {
            user_id,
            conn_id,
            outbound,
            handlers,
            dispatcher,
            cancel,
            guard,
        })
    }

    /// Identity this channel is scoped to.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Connection identifier.
    pub fn connection_id(&self) -> ConnectionId {
        self.conn_id
    }

    /// Whether inbound events are still being dispatched.
    pub fn is_active(&self) -> bool {
        !self.dispatcher.is_finished()
    }

    /// Announce `notification:leave`, detach every handler, then close the
    /// connection.
    ///
    /// The dispatcher has exited before the transport is closed, so no
    /// handler runs against a closing socket.
    pub async fn close(self) {
        let Self {
            user_id,
            conn_id,
            outbound,
            handlers,
            dispatcher,
            cancel,
            guard,
        } = self;

        if outbound
            .send(OutboundEvent::Leave {
                user_id: user_id.clone(),
            })
            .await
            .is_err()
        {
            debug!(conn_id = %conn_id, "Transport gone before leave");
        }

        handlers.off_all();
        cancel.cancel();
        if let Err(e) = dispatcher.await {
            warn!(conn_id = %conn_id, "Dispatcher ended abnormally: {}", e);
        }

        drop(outbound);
        guard.close().await;

        info!(conn_id = %conn_id, user_id = %user_id, "Live channel left");
    }
}
