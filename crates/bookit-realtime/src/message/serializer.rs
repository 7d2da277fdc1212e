//! JSON serialization for live channel frames.

use serde_json;

use super::frame::Frame;
use super::types::{InboundEvent, InboundEventKind, OutboundEvent};

/// Serialize an outbound event to a text frame.
pub fn encode_outbound(event: &OutboundEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(event)
}

/// Serialize an inbound event the way the server frames it.
pub fn encode_inbound(event: &InboundEvent) -> Result<String, serde_json::Error> {
    let data = match event {
        InboundEvent::ChatMessage(p) => serde_json::to_value(p)?,
        InboundEvent::ChatNotification(p) => serde_json::to_value(p)?,
        InboundEvent::BookingNotification(p) => serde_json::to_value(p)?,
        InboundEvent::NewNotification(n) => serde_json::to_value(n)?,
    };
    serde_json::to_string(&Frame::new(event.kind().as_str(), data))
}

/// Deserialize an inbound text frame.
///
/// Returns `Ok(None)` for well-formed frames carrying an event this client
/// does not subscribe to.
pub fn decode_inbound(text: &str) -> Result<Option<InboundEvent>, serde_json::Error> {
    let frame: Frame = serde_json::from_str(text)?;
    let Some(kind) = InboundEventKind::from_name(&frame.event) else {
        return Ok(None);
    };

    let event = match kind {
        InboundEventKind::ChatMessage => {
            InboundEvent::ChatMessage(serde_json::from_value(frame.data)?)
        }
        InboundEventKind::ChatNotification => {
            InboundEvent::ChatNotification(serde_json::from_value(frame.data)?)
        }
        InboundEventKind::BookingNotification => {
            InboundEvent::BookingNotification(serde_json::from_value(frame.data)?)
        }
        InboundEventKind::NewNotification => {
            InboundEvent::NewNotification(serde_json::from_value(frame.data)?)
        }
    };
    Ok(Some(event))
}
