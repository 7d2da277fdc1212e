//! Notification action command.

use clap::Args;

use crate::output;
use bookit_core::error::{AppError, ErrorKind};
use bookit_core::types::NotificationId;
use bookit_notify::NotificationApi;

/// Arguments for `act`
#[derive(Debug, Args)]
pub struct ActArgs {
    /// Notification ID
    pub id: NotificationId,

    /// Action type, e.g. `accept_offer`
    pub action_type: String,

    /// JSON object merged into the request body
    #[arg(short, long)]
    pub data: Option<String>,
}

/// Execute `act`
pub async fn execute(args: &ActArgs, config_path: &str) -> Result<(), AppError> {
    let data = args.data.as_deref().map(parse_data).transpose()?;

    let client = super::create_client(config_path)?;
    client
        .take_action(&args.id, &args.action_type, data.as_ref())
        .await?;

    output::print_success(&format!(
        "Action '{}' sent for notification '{}'",
        args.action_type, args.id
    ));
    Ok(())
}

/// Parse `--data`, which must be a JSON object.
fn parse_data(raw: &str) -> Result<serde_json::Value, AppError> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| {
        AppError::with_source(ErrorKind::Validation, format!("Invalid --data JSON: {e}"), e)
    })?;
    if !value.is_object() {
        return Err(AppError::validation("--data must be a JSON object"));
    }
    Ok(value)
}
