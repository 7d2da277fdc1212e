//! Host-level alerts raised for live events.

pub mod notifier;

pub use notifier::{Permission, SystemAlert, SystemNotifier, TracingNotifier};
