//! The request/response contract the store depends on.

use async_trait::async_trait;

use bookit_core::error::AppError;
use bookit_core::types::NotificationId;
use bookit_entity::notification::Notification;

/// One method per verb+path pair of the notifications resource.
///
/// Every call either succeeds once or fails once; implementations never
/// retry.
#[async_trait]
pub trait NotificationApi: Send + Sync + std::fmt::Debug {
    /// `GET /`
    async fn list(&self) -> Result<Vec<Notification>, AppError>;

    /// `GET /unread-count`
    async fn unread_count(&self) -> Result<u64, AppError>;

    /// `PUT /:id/read`
    async fn mark_read(&self, id: &NotificationId) -> Result<(), AppError>;

    /// `PUT /mark-all-read`
    async fn mark_all_read(&self) -> Result<(), AppError>;

    /// `POST /:id/action` with body `{actionType, ...data}`.
    async fn take_action(
        &self,
        id: &NotificationId,
        action_type: &str,
        data: Option<&serde_json::Value>,
    ) -> Result<(), AppError>;

    /// `DELETE /:id`
    async fn delete(&self, id: &NotificationId) -> Result<(), AppError>;

    /// `DELETE /delete-read`
    async fn delete_read(&self) -> Result<(), AppError>;
}
