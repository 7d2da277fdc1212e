//! Listing commands.

use chrono::Utc;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use bookit_core::error::AppError;
use bookit_entity::notification::Notification;
use bookit_notify::NotificationApi;
use bookit_notify::view::{ReadFilter, SortOrder, format_relative, type_icon};

/// Arguments for `list`
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Which notifications to show: all, unread, read
    #[arg(long, default_value = "all")]
    pub filter: ReadFilter,

    /// Ordering: newest, oldest, priority
    #[arg(long, default_value = "newest")]
    pub sort: SortOrder,

    /// Show at most this many rows
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Notification display row
#[derive(Debug, Serialize, Tabled)]
struct NotificationRow {
    /// Notification ID
    id: String,
    /// Type with its icon
    #[tabled(rename = "type")]
    kind: String,
    /// Priority
    priority: String,
    /// Title
    title: String,
    /// Read state
    status: String,
    /// Age
    received: String,
}

impl NotificationRow {
    fn from_notification(n: &Notification, now: chrono::DateTime<Utc>) -> Self {
        Self {
            id: n.id.to_string(),
            kind: format!("{} {}", type_icon(n.kind).glyph(), n.kind),
            priority: n.priority.map(|p| p.as_str().to_string()).unwrap_or_default(),
            title: n.title.clone(),
            status: if n.is_read { "read" } else { "unread" }.to_string(),
            received: n
                .created_at
                .map(|ts| format_relative(ts, now))
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UnreadSummary {
    unread_count: u64,
}

/// Execute `list`
pub async fn execute(
    args: &ListArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let client = super::create_client(config_path)?;
    let notifications = client.list().await?;

    let sorted = args.sort.apply(&notifications);
    let now = Utc::now();
    let rows: Vec<NotificationRow> = args
        .filter
        .apply(&sorted)
        .into_iter()
        .take(args.limit.unwrap_or(usize::MAX))
        .map(|n| NotificationRow::from_notification(n, now))
        .collect();

    output::print_list(&rows, format);
    Ok(())
}

/// Execute `unread`
pub async fn unread(config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    let client = super::create_client(config_path)?;
    let unread_count = client.unread_count().await?;

    match format {
        OutputFormat::Table => output::print_kv("Unread", &unread_count.to_string()),
        OutputFormat::Json => output::print_item(&UnreadSummary { unread_count }, format),
    }
    Ok(())
}
