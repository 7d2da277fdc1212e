//! Icon and colour lookup tables.

use bookit_entity::notification::{NotificationType, Priority};

/// Icon shown next to a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Calendar,
    CheckCircle,
    XCircle,
    Handshake,
    Exchange,
    ThumbsUp,
    ThumbsDown,
    Dollar,
    Star,
    Badge,
    Ban,
    Alert,
    Message,
    /// Fallback.
    Bell,
}

impl Icon {
    /// Icon-font name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Calendar => "calendar",
            Self::CheckCircle => "check-circle",
            Self::XCircle => "x-circle",
            Self::Handshake => "handshake",
            Self::Exchange => "arrows-exchange",
            Self::ThumbsUp => "thumbs-up",
            Self::ThumbsDown => "thumbs-down",
            Self::Dollar => "dollar-sign",
            Self::Star => "star",
            Self::Badge => "badge-check",
            Self::Ban => "ban",
            Self::Alert => "alert-triangle",
            Self::Message => "message-circle",
            Self::Bell => "bell",
        }
    }

    /// Glyph for terminal surfaces.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Calendar => "📅",
            Self::CheckCircle => "✅",
            Self::XCircle => "❌",
            Self::Handshake => "🤝",
            Self::Exchange => "🔄",
            Self::ThumbsUp => "👍",
            Self::ThumbsDown => "👎",
            Self::Dollar => "💵",
            Self::Star => "⭐",
            Self::Badge => "🏅",
            Self::Ban => "🚫",
            Self::Alert => "⚠️",
            Self::Message => "💬",
            Self::Bell => "🔔",
        }
    }
}

/// Accent colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tint {
    Blue,
    Green,
    Red,
    Orange,
    Yellow,
    Purple,
    /// Fallback for types.
    Gray,
    /// Fallback for priorities.
    MediumGray,
}

impl Tint {
    /// CSS-style hex colour.
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Blue => "#3b82f6",
            Self::Green => "#22c55e",
            Self::Red => "#ef4444",
            Self::Orange => "#f97316",
            Self::Yellow => "#eab308",
            Self::Purple => "#a855f7",
            Self::Gray => "#6b7280",
            Self::MediumGray => "#9ca3af",
        }
    }
}

/// Icon for a notification type. Unrecognized types get the bell.
pub fn type_icon(kind: NotificationType) -> Icon {
    match kind {
        NotificationType::BookingCreated => Icon::Calendar,
        NotificationType::BookingConfirmed => Icon::CheckCircle,
        NotificationType::BookingCancelled => Icon::XCircle,
        NotificationType::NegotiationStarted | NotificationType::NegotiationUpdated => {
            Icon::Handshake
        }
        NotificationType::CounterOfferReceived => Icon::Exchange,
        NotificationType::OfferAccepted => Icon::ThumbsUp,
        NotificationType::OfferDeclined => Icon::ThumbsDown,
        NotificationType::PaymentReceived => Icon::Dollar,
        NotificationType::ReviewReceived => Icon::Star,
        NotificationType::ServiceApproved => Icon::Badge,
        NotificationType::ServiceRejected => Icon::Ban,
        NotificationType::SystemAlert => Icon::Alert,
        NotificationType::Chat => Icon::Message,
        NotificationType::Unknown => Icon::Bell,
    }
}

/// Accent colour for a notification type. Unrecognized types are gray.
pub fn type_tint(kind: NotificationType) -> Tint {
    match kind {
        NotificationType::BookingCreated | NotificationType::Chat => Tint::Blue,
        NotificationType::BookingConfirmed
        | NotificationType::OfferAccepted
        | NotificationType::PaymentReceived
        | NotificationType::ServiceApproved => Tint::Green,
        NotificationType::BookingCancelled
        | NotificationType::OfferDeclined
        | NotificationType::ServiceRejected => Tint::Red,
        NotificationType::NegotiationStarted | NotificationType::NegotiationUpdated => {
            Tint::Purple
        }
        NotificationType::CounterOfferReceived | NotificationType::SystemAlert => Tint::Orange,
        NotificationType::ReviewReceived => Tint::Yellow,
        NotificationType::Unknown => Tint::Gray,
    }
}

/// Accent colour for a priority. No priority is medium gray.
pub fn priority_tint(priority: Option<Priority>) -> Tint {
    match priority {
        Some(Priority::High) => Tint::Red,
        Some(Priority::Medium) => Tint::Orange,
        Some(Priority::Low) => Tint::Blue,
        None => Tint::MediumGray,
    }
}
