//! The host notification seam and its default implementation.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use bookit_entity::live::LiveEvent;

/// Outcome of the host's permission negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Not asked yet.
    Default,
    /// Alerts may be shown.
    Granted,
    /// The user refused.
    Denied,
}

impl Permission {
    /// Whether the user already answered.
    pub fn is_decided(&self) -> bool {
        !matches!(self, Self::Default)
    }
}

/// A system-level alert mirroring a live event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemAlert {
    /// Alert title.
    pub title: String,
    /// Alert body.
    pub body: String,
    /// Live event the alert belongs to; hosts use it to replace duplicates.
    pub tag: String,
}

impl From<&LiveEvent> for SystemAlert {
    fn from(event: &LiveEvent) -> Self {
        Self {
            title: event.title.clone(),
            body: event.message.clone(),
            tag: event.id.clone(),
        }
    }
}

/// Host notification mechanism (desktop notification center, terminal, ...).
#[async_trait]
pub trait SystemNotifier: Send + Sync + std::fmt::Debug {
    /// Current permission state.
    fn permission(&self) -> Permission;

    /// Ask the host for permission. Only called while the state is `Default`.
    async fn request_permission(&self) -> Permission;

    /// Raise an alert. Only called while the state is `Granted`.
    fn show(&self, alert: &SystemAlert);
}

/// Notifier that emits alerts as `tracing` events.
///
/// Suitable for headless agents: whatever subscriber is installed decides
/// where alerts end up.
#[derive(Debug)]
pub struct TracingNotifier {
    permission: Mutex<Permission>,
    /// Answer given when permission is requested.
    grant_on_request: bool,
}

impl TracingNotifier {
    /// Create a notifier that answers permission requests with `grant_on_request`.
    pub fn new(grant_on_request: bool) -> Self {
        Self {
            permission: Mutex::new(Permission::Default),
            grant_on_request,
        }
    }
}

#[async_trait]
impl SystemNotifier for TracingNotifier {
    fn permission(&self) -> Permission {
        *self.permission.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn request_permission(&self) -> Permission {
        let answer = if self.grant_on_request {
            Permission::Granted
        } else {
            Permission::Denied
        };
        *self.permission.lock().unwrap_or_else(|e| e.into_inner()) = answer;
        answer
    }

    fn show(&self, alert: &SystemAlert) {
        info!(
            target: "bookit::alert",
            tag = %alert.tag,
            title = %alert.title,
            "{}",
            alert.body
        );
    }
}
