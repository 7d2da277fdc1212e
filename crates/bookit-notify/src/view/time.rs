//! Relative timestamps.

use chrono::{DateTime, Utc};

/// Render `ts` relative to `now`.
///
/// Under a minute (and any future time) reads "Just now"; then minutes,
/// hours and days up to a week; older timestamps show as `YYYY-MM-DD`.
pub fn format_relative(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(ts);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if hours < 1 {
        format!("{minutes}m ago")
    } else if days < 1 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        ts.format("%Y-%m-%d").to_string()
    }
}
