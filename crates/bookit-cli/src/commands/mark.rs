//! Read-state commands.

use clap::Args;

use crate::output;
use bookit_core::error::AppError;
use bookit_core::types::NotificationId;
use bookit_notify::NotificationApi;

/// Arguments for `read`
#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Notification ID
    pub id: NotificationId,
}

/// Execute `read`
pub async fn read(args: &ReadArgs, config_path: &str) -> Result<(), AppError> {
    let client = super::create_client(config_path)?;
    client.mark_read(&args.id).await?;
    output::print_success(&format!("Notification '{}' marked as read", args.id));
    Ok(())
}

/// Execute `read-all`
pub async fn read_all(config_path: &str) -> Result<(), AppError> {
    let client = super::create_client(config_path)?;
    client.mark_all_read().await?;
    output::print_success("All notifications marked as read");
    Ok(())
}
