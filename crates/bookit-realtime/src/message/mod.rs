//! Live channel message definitions and JSON framing.

pub mod frame;
pub mod payload;
pub mod serializer;
pub mod types;

pub use payload::{BookingPayload, ChatMessagePayload, ChatNotificationPayload};
pub use types::{InboundEvent, InboundEventKind, OutboundEvent};
