//! Stable list orderings.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use bookit_core::error::AppError;
use bookit_entity::notification::{Notification, Priority};

/// How a list is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Newest first; entries without a timestamp last.
    #[default]
    Newest,
    /// Oldest first; entries without a timestamp last.
    Oldest,
    /// High, medium, low, then none; ties newest first.
    Priority,
}

impl SortOrder {
    /// Return a sorted copy of `notifications`. The sort is stable.
    pub fn apply(&self, notifications: &[Notification]) -> Vec<Notification> {
        let mut sorted = notifications.to_vec();
        self.sort(&mut sorted);
        sorted
    }

    /// Sort `notifications` in place. The sort is stable.
    pub fn sort(&self, notifications: &mut [Notification]) {
        match self {
            Self::Newest => notifications.sort_by(newest_first),
            Self::Oldest => notifications.sort_by(oldest_first),
            Self::Priority => notifications.sort_by(|a, b| {
                Priority::rank(b.priority)
                    .cmp(&Priority::rank(a.priority))
                    .then_with(|| newest_first(a, b))
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Priority => "priority",
        }
    }
}

fn newest_first(a: &Notification, b: &Notification) -> Ordering {
    match (a.created_at, b.created_at) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn oldest_first(a: &Notification, b: &Notification) -> Ordering {
    match (a.created_at, b.created_at) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "priority" => Ok(Self::Priority),
            other => Err(AppError::validation(format!(
                "Unknown sort order '{other}' (expected newest, oldest or priority)"
            ))),
        }
    }
}
