//! Booking aggregate - the central entity of the system.
//!
//! A booking is a customer's ticket reservation record. It is created in
//! `pending_payment`, reviewed by an administrator, and moves through the
//! lifecycle defined in [`transitions`]. All wire-facing records use
//! camelCase field names.

pub mod transitions;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::id::{BookingId, TicketId};

/// Lifecycle status of a booking.
///
/// The string values are the wire names stored and exposed by the API
/// (`pending_payment`, `confirmed`, `cancelled`, `rejected`). They are also
/// what [`BookingFilter`] matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Initial state: awaiting admin review and payment confirmation.
    PendingPayment,
    /// Approved by an admin; a ticket has been issued.
    Confirmed,
    /// Cancelled by an admin.
    Cancelled,
    /// Rejected by an admin.
    Rejected,
}

impl BookingStatus {
    /// The wire name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::PendingPayment => "pending_payment",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A customer's ticket reservation record.
///
/// Customer and event fields are immutable after creation; `total_price` is
/// computed once at creation and never recomputed. `ticket_id`,
/// `approved_at` and `booking_date` are absent until the booking is
/// approved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Assigned at creation, immutable thereafter.
    pub booking_id: BookingId,
    /// Assigned only upon approval; `None` before.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<TicketId>,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub event_name: String,
    pub event_date: DateTime<Utc>,
    pub ticket_type: String,
    pub number_of_tickets: u32,
    pub price_per_ticket: f64,
    /// `number_of_tickets * price_per_ticket`, computed at creation.
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    /// Set only on transition into `confirmed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    /// Finalized ticket issuance date, distinct from `created_at`. Set only
    /// on transition into `confirmed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_date: Option<DateTime<Utc>>,
}

/// Validated input for creating a booking.
///
/// This is the strongly-typed boundary between the request-handling layer
/// and the manager: all fields are required, and [`NewBooking::validate`]
/// rejects empty or out-of-range values before anything is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub event_name: String,
    pub event_date: DateTime<Utc>,
    pub ticket_type: String,
    pub number_of_tickets: u32,
    pub price_per_ticket: f64,
}

impl NewBooking {
    /// Validate the creation input.
    ///
    /// # Errors
    /// Returns [`BoxofficeError::Validation`](crate::BoxofficeError::Validation)
    /// if any required field is empty, `number_of_tickets` is zero, or
    /// `price_per_ticket` is not a positive number.
    pub fn validate(&self) -> crate::error::Result<()> {
        let required = [
            ("customerName", &self.customer_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("eventName", &self.event_name),
            ("ticketType", &self.ticket_type),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(crate::BoxofficeError::Validation(format!(
                    "{} is required",
                    name
                )));
            }
        }
        if self.number_of_tickets < 1 {
            return Err(crate::BoxofficeError::Validation(
                "numberOfTickets must be at least 1".to_string(),
            ));
        }
        if !(self.price_per_ticket > 0.0) {
            return Err(crate::BoxofficeError::Validation(
                "pricePerTicket must be a positive number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Curated projection returned from booking creation.
///
/// Customer-facing creation responses expose this subset only; the full
/// record (timestamps, phone, pricing breakdown) is available through
/// `get_booking`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingReceipt {
    pub booking_id: BookingId,
    pub customer_name: String,
    pub email: String,
    pub event_name: String,
    pub number_of_tickets: u32,
    pub total_price: f64,
    pub status: BookingStatus,
}

impl From<&Booking> for BookingReceipt {
    fn from(booking: &Booking) -> Self {
        BookingReceipt {
            booking_id: booking.booking_id.clone(),
            customer_name: booking.customer_name.clone(),
            email: booking.email.clone(),
            event_name: booking.event_name.clone(),
            number_of_tickets: booking.number_of_tickets,
            total_price: booking.total_price,
            status: booking.status,
        }
    }
}

/// Filter for listing bookings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingFilter {
    /// Only return bookings in this status. `None` returns all.
    pub status: Option<BookingStatus>,
}

impl BookingFilter {
    /// Filter matching every booking.
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter matching bookings in the given status (e.g. the admin pending
    /// queue uses `PendingPayment`).
    pub fn with_status(status: BookingStatus) -> Self {
        BookingFilter {
            status: Some(status),
        }
    }

    /// Whether the booking matches this filter.
    pub fn matches(&self, booking: &Booking) -> bool {
        match self.status {
            Some(status) => booking.status == status,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn input() -> NewBooking {
        NewBooking {
            customer_name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "+91-9000000000".to_string(),
            event_name: "Spring Recital".to_string(),
            event_date: Utc.with_ymd_and_hms(2026, 10, 12, 18, 30, 0).unwrap(),
            ticket_type: "VIP".to_string(),
            number_of_tickets: 2,
            price_per_ticket: 500.0,
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn empty_required_field_is_rejected() {
        let mut i = input();
        i.email = "  ".to_string();
        let err = i.validate().unwrap_err();
        assert!(matches!(err, crate::BoxofficeError::Validation(_)));
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn zero_tickets_is_rejected() {
        let mut i = input();
        i.number_of_tickets = 0;
        assert!(matches!(
            i.validate(),
            Err(crate::BoxofficeError::Validation(_))
        ));
    }

    #[test]
    fn non_positive_price_is_rejected() {
        let mut i = input();
        i.price_per_ticket = 0.0;
        assert!(matches!(
            i.validate(),
            Err(crate::BoxofficeError::Validation(_))
        ));
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(BookingStatus::PendingPayment.as_str(), "pending_payment");
        assert_eq!(
            serde_json::to_string(&BookingStatus::PendingPayment).unwrap(),
            "\"pending_payment\""
        );
        assert_eq!(
            serde_json::from_str::<BookingStatus>("\"cancelled\"").unwrap(),
            BookingStatus::Cancelled
        );
    }

    #[test]
    fn booking_serializes_camel_case() {
        let booking = Booking::create(input()).unwrap();
        let json = serde_json::to_value(&booking).unwrap();
        assert!(json.get("bookingId").is_some());
        assert!(json.get("customerName").is_some());
        assert_eq!(json["status"], "pending_payment");
        // Absent, not null, before approval
        assert!(json.get("ticketId").is_none());
        assert!(json.get("approvedAt").is_none());
    }
}
