//! # bookit-entity
//!
//! Domain models for the Bookit notification client. `notification` mirrors
//! the records the marketplace server owns; `live` holds the ephemeral
//! events the client synthesizes from pushes. All models derive `Debug`,
//! `Clone`, `Serialize`, and `Deserialize`.

pub mod live;
pub mod notification;

pub use live::LiveEvent;
pub use notification::{ActionStyle, Notification, NotificationAction, NotificationType, Priority};
