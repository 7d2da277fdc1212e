//! REST client for the marketplace notifications resource.

pub mod api;
pub mod http;
pub mod response;

pub use api::NotificationApi;
pub use http::HttpNotificationClient;
