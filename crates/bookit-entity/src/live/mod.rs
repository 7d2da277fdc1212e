//! Client-synthesized live events.

pub mod event;

pub use event::LiveEvent;
