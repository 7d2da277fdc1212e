//! Deletion commands.

use clap::Args;

use crate::output;
use bookit_core::error::AppError;
use bookit_core::types::NotificationId;
use bookit_notify::NotificationApi;

/// Arguments for `delete`
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Notification ID
    pub id: NotificationId,
}

/// Arguments for `delete-read`
#[derive(Debug, Args)]
pub struct DeleteReadArgs {
    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Execute `delete`
pub async fn delete(args: &DeleteArgs, config_path: &str) -> Result<(), AppError> {
    let client = super::create_client(config_path)?;
    client.delete(&args.id).await?;
    output::print_success(&format!("Notification '{}' deleted", args.id));
    Ok(())
}

/// Execute `delete-read`
pub async fn delete_read(args: &DeleteReadArgs, config_path: &str) -> Result<(), AppError> {
    if !args.yes {
        let confirm = dialoguer::Confirm::new()
            .with_prompt("Delete every read notification?")
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let client = super::create_client(config_path)?;
    client.delete_read().await?;
    output::print_success("Read notifications deleted");
    Ok(())
}
