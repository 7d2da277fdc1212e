//! reqwest-backed implementation of [`NotificationApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use bookit_core::config::ApiConfig;
use bookit_core::error::{AppError, ErrorKind};
use bookit_core::types::NotificationId;
use bookit_entity::notification::Notification;

use super::api::NotificationApi;
use super::response::{Envelope, NotificationList, UnreadCount, action_body};

/// HTTP client for the notifications resource.
#[derive(Debug, Clone)]
pub struct HttpNotificationClient {
    client: Client,
    /// Notifications resource URL, without trailing slash.
    base: Url,
    auth_token: Option<String>,
}

impl HttpNotificationClient {
    /// Build a client from API configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let raw = config.notifications_url();
        let base = Url::parse(&raw).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid notifications URL '{raw}': {e}"),
                e,
            )
        })?;
        if base.cannot_be_a_base() {
            return Err(AppError::configuration(format!(
                "Notifications URL '{raw}' cannot carry a path"
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            client,
            base,
            auth_token: config.auth_token.clone(),
        })
    }

    /// URL of the resource with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if !segments.is_empty() {
            // `cannot_be_a_base` is rejected in `new`, so segments are available.
            if let Ok(mut path) = url.path_segments_mut() {
                path.pop_if_empty().extend(segments);
            }
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        debug!(%method, %url, "Notification API request");
        let builder = self.client.request(method, url);
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and reject non-success statuses.
    async fn send(&self, operation: &str, request: RequestBuilder) -> Result<Response, AppError> {
        let response = request.send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Transport,
                format!("Failed to {operation}: {e}"),
                e,
            )
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::server_rejection(format!(
                "Failed to {operation}: server responded {status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }
        Ok(response)
    }

    /// Send a request and decode its JSON body.
    async fn fetch<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<T, AppError> {
        let response = self.send(operation, request).await?;
        let bytes = response.bytes().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Transport,
                format!("Failed to {operation}: {e}"),
                e,
            )
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::with_source(
                ErrorKind::MalformedResponse,
                format!("Failed to {operation}: unexpected response body: {e}"),
                e,
            )
        })
    }
}

#[async_trait]
impl NotificationApi for HttpNotificationClient {
    async fn list(&self) -> Result<Vec<Notification>, AppError> {
        let body: Envelope<NotificationList> = self
            .fetch("fetch notifications", self.request(Method::GET, &[]))
            .await?;
        Ok(body.into_inner().into_vec())
    }

    async fn unread_count(&self) -> Result<u64, AppError> {
        let body: Envelope<UnreadCount> = self
            .fetch(
                "fetch unread count",
                self.request(Method::GET, &["unread-count"]),
            )
            .await?;
        Ok(body.into_inner().value())
    }

    async fn mark_read(&self, id: &NotificationId) -> Result<(), AppError> {
        self.send(
            "mark notification as read",
            self.request(Method::PUT, &[id.as_str(), "read"]),
        )
        .await?;
        Ok(())
    }

    async fn mark_all_read(&self) -> Result<(), AppError> {
        self.send(
            "mark all notifications as read",
            self.request(Method::PUT, &["mark-all-read"]),
        )
        .await?;
        Ok(())
    }

    async fn take_action(
        &self,
        id: &NotificationId,
        action_type: &str,
        data: Option<&serde_json::Value>,
    ) -> Result<(), AppError> {
        let request = self
            .request(Method::POST, &[id.as_str(), "action"])
            .json(&action_body(action_type, data));
        self.send("take notification action", request).await?;
        Ok(())
    }

    async fn delete(&self, id: &NotificationId) -> Result<(), AppError> {
        self.send(
            "delete notification",
            self.request(Method::DELETE, &[id.as_str()]),
        )
        .await?;
        Ok(())
    }

    async fn delete_read(&self) -> Result<(), AppError> {
        self.send(
            "delete read notifications",
            self.request(Method::DELETE, &["delete-read"]),
        )
        .await?;
        Ok(())
    }
}
