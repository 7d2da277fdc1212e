//! Marketplace REST API configuration.

use serde::{Deserialize, Serialize};

/// Where and how to reach the marketplace notification API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the marketplace API, e.g. `https://api.example.com`.
    pub base_url: String,
    /// Path of the notifications resource, appended to `base_url`.
    #[serde(default = "default_notifications_path")]
    pub notifications_path: String,
    /// Bearer token sent with every request.
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl ApiConfig {
    /// Full URL of the notifications resource.
    pub fn notifications_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.notifications_path.trim_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        }
    }
}

fn default_notifications_path() -> String {
    "/api/notifications".to_string()
}

fn default_request_timeout() -> u64 {
    10
}
