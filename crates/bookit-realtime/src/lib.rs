//! # bookit-realtime
//!
//! Live channel client for the Bookit marketplace push server. Provides:
//!
//! - Typed inbound (`chat:message`, `notification:*`) and outbound
//!   (`notification:join` / `notification:leave`) events
//! - JSON frame encoding `{"event": ..., "data": ...}`
//! - A registry of named event handlers
//! - [`LiveChannel`], which owns one connection for one user identity
//! - WebSocket and in-memory connectors behind [`LiveConnector`]

pub mod channel;
pub mod connection;
pub mod message;

pub use channel::channel::LiveChannel;
pub use channel::registry::HandlerRegistry;
pub use connection::connector::{LiveConnection, LiveConnector};
pub use connection::memory::MemoryConnector;
pub use connection::websocket::WsConnector;
pub use message::types::{InboundEvent, InboundEventKind, OutboundEvent};
