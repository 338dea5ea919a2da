//! State transitions for the booking lifecycle.
//!
//! ```text
//! (none) ──create()──> pending_payment ──approve()──> confirmed
//!                            │                            │
//!                            │          approve() ──> Err(AlreadyApproved)
//!                            │
//! any status ──reject()──> rejected
//! any status ──cancel()──> cancelled
//! ```
//!
//! `approve` is the only guarded transition: approving an already-confirmed
//! booking fails and leaves the record untouched. `reject` and `cancel`
//! apply from *any* current status, including `confirmed` and terminal
//! states, and update only `status`. That asymmetry is intentional and is
//! pinned by tests; adding guards would change observable behavior.
//!
//! Transitions mutate the booking in memory only. Persistence and
//! notification side effects belong to the manager, which saves the updated
//! record and dispatches emails after a successful transition.

use chrono::Utc;

use crate::domain::id::{BookingId, TicketId};
use crate::error::Result;
use crate::BoxofficeError;

use super::{Booking, BookingStatus, NewBooking};

impl Booking {
    /// Create a new booking in `pending_payment` from validated input.
    ///
    /// Assigns a fresh [`BookingId`], computes `total_price`, and stamps
    /// `created_at`. `ticket_id`, `approved_at` and `booking_date` start
    /// absent.
    ///
    /// # Errors
    /// Returns [`BoxofficeError::Validation`] if the input fails
    /// [`NewBooking::validate`].
    pub fn create(input: NewBooking) -> Result<Self> {
        input.validate()?;
        let total_price = f64::from(input.number_of_tickets) * input.price_per_ticket;
        Ok(Booking {
            booking_id: BookingId::generate(),
            ticket_id: None,
            customer_name: input.customer_name,
            email: input.email,
            phone: input.phone,
            event_name: input.event_name,
            event_date: input.event_date,
            ticket_type: input.ticket_type,
            number_of_tickets: input.number_of_tickets,
            price_per_ticket: input.price_per_ticket,
            total_price,
            status: BookingStatus::PendingPayment,
            created_at: Utc::now(),
            approved_at: None,
            booking_date: None,
        })
    }

    /// Approve this booking, issuing the given ticket.
    ///
    /// Sets status to `confirmed`, records the ticket id, and stamps both
    /// `approved_at` and `booking_date` to the current time.
    ///
    /// # Errors
    /// Returns [`BoxofficeError::AlreadyApproved`] if the booking is already
    /// `confirmed`; the booking is left unchanged.
    pub fn approve(&mut self, ticket_id: TicketId) -> Result<()> {
        if self.status == BookingStatus::Confirmed {
            return Err(BoxofficeError::AlreadyApproved(self.booking_id.clone()));
        }
        let now = Utc::now();
        self.status = BookingStatus::Confirmed;
        self.ticket_id = Some(ticket_id);
        self.approved_at = Some(now);
        self.booking_date = Some(now);
        Ok(())
    }

    /// Reject this booking. Applies from any current status; only `status`
    /// changes.
    pub fn reject(&mut self) {
        self.status = BookingStatus::Rejected;
    }

    /// Cancel this booking. Applies from any current status; only `status`
    /// changes.
    pub fn cancel(&mut self) {
        self.status = BookingStatus::Cancelled;
    }
}
