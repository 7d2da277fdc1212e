//! Notification type enumeration.

use serde::{Deserialize, Serialize};

/// What happened, as reported by the marketplace server.
///
/// Values the client does not recognize deserialize as [`Unknown`](Self::Unknown)
/// instead of failing the whole payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// A customer booked a service.
    BookingCreated,
    /// The provider confirmed a booking.
    BookingConfirmed,
    /// Either side cancelled a booking.
    BookingCancelled,
    /// A price negotiation was opened.
    NegotiationStarted,
    /// A negotiation changed state.
    NegotiationUpdated,
    /// The other side sent a counter-offer.
    CounterOfferReceived,
    /// An offer was accepted.
    OfferAccepted,
    /// An offer was declined.
    OfferDeclined,
    /// A payment cleared.
    PaymentReceived,
    /// A customer left a review.
    ReviewReceived,
    /// Moderation approved a service listing.
    ServiceApproved,
    /// Moderation rejected a service listing.
    ServiceRejected,
    /// Platform-wide alert.
    SystemAlert,
    /// Chat message.
    Chat,
    /// Anything else.
    #[default]
    #[serde(other)]
    Unknown,
}

impl NotificationType {
    /// Return the wire name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BookingCreated => "booking_created",
            Self::BookingConfirmed => "booking_confirmed",
            Self::BookingCancelled => "booking_cancelled",
            Self::NegotiationStarted => "negotiation_started",
            Self::NegotiationUpdated => "negotiation_updated",
            Self::CounterOfferReceived => "counter_offer_received",
            Self::OfferAccepted => "offer_accepted",
            Self::OfferDeclined => "offer_declined",
            Self::PaymentReceived => "payment_received",
            Self::ReviewReceived => "review_received",
            Self::ServiceApproved => "service_approved",
            Self::ServiceRejected => "service_rejected",
            Self::SystemAlert => "system_alert",
            Self::Chat => "chat",
            Self::Unknown => "unknown",
        }
    }

    /// Short prefix used when minting live-event identifiers.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::BookingCreated | Self::BookingConfirmed | Self::BookingCancelled => "booking",
            Self::NegotiationStarted
            | Self::NegotiationUpdated
            | Self::CounterOfferReceived
            | Self::OfferAccepted
            | Self::OfferDeclined => "negotiation",
            Self::PaymentReceived => "payment",
            Self::ReviewReceived => "review",
            Self::ServiceApproved | Self::ServiceRejected => "service",
            Self::SystemAlert => "system",
            Self::Chat => "chat",
            Self::Unknown => "notification",
        }
    }

    /// Whether this type belongs to the booking lifecycle.
    pub fn is_booking(&self) -> bool {
        matches!(
            self,
            Self::BookingCreated | Self::BookingConfirmed | Self::BookingCancelled
        )
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
