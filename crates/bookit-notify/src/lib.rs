//! # bookit-notify
//!
//! Client-side notification subsystem for the Bookit marketplace:
//!
//! - [`client`]: thin REST wrapper over the notifications API
//! - [`store`]: the per-session [`NotificationStore`] reconciling polling,
//!   on-demand fetches and live pushes
//! - [`alert`]: host-level alerts raised for live events
//! - [`view`]: pure filter/sort/icon/time helpers for presentation surfaces

pub mod alert;
pub mod client;
pub mod store;
pub mod view;

pub use alert::{Permission, SystemAlert, SystemNotifier, TracingNotifier};
pub use client::{HttpNotificationClient, NotificationApi};
pub use store::{NotificationStore, PollHandle, StoreSettings, StoreSnapshot};
