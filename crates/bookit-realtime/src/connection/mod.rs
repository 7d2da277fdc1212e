//! Live channel connections: the connector seam, WebSocket and in-memory transports.

pub mod connector;
pub mod memory;
pub mod websocket;

pub use connector::{ConnectionGuard, ConnectionId, LiveConnection, LiveConnector};
