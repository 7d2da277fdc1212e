//! Named event handlers and the per-identity live channel.

pub mod channel;
pub mod registry;

pub use channel::LiveChannel;
pub use registry::{EventHandler, HandlerRegistry};
