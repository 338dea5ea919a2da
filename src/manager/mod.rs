//! The booking lifecycle manager.
//!
//! `BookingManager` owns the booking entity's lifecycle: it validates
//! creation input, generates identifiers, enforces the state machine in
//! [`crate::domain::booking::transitions`], persists through a
//! [`BookingStore`], and dispatches notification emails as detached side
//! effects of approve/reject.
//!
//! The manager is safe to call concurrently for different booking ids: it
//! holds its collaborators behind `Arc` and carries no other mutable state.
//! It performs no retries: every operation succeeds or fails once, and the
//! caller decides whether to retry (retryable failures are marked via
//! [`BoxofficeError::is_retryable`]). Authorization is the caller's concern;
//! admin gating happens before a call reaches the manager.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingFilter, BookingReceipt, NewBooking};
use crate::domain::id::{BookingId, TicketId};
use crate::error::Result;
use crate::notify::{self, Notifier};
use crate::storage::BookingStore;
use crate::BoxofficeError;

/// Booking lifecycle manager, generic over its persistence and notification
/// collaborators.
pub struct BookingManager<S, N> {
    store: Arc<S>,
    notifier: Arc<N>,
}

impl<S, N> Clone for BookingManager<S, N> {
    fn clone(&self) -> Self {
        BookingManager {
            store: Arc::clone(&self.store),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<S, N> BookingManager<S, N>
where
    S: BookingStore,
    N: Notifier + 'static,
{
    /// Create a manager over the given collaborators.
    pub fn new(store: Arc<S>, notifier: Arc<N>) -> Self {
        BookingManager { store, notifier }
    }

    /// Create a new booking in `pending_payment`.
    ///
    /// Validates the input, computes `total_price`, assigns a fresh booking
    /// id, persists, and returns the curated customer-facing subset of the
    /// new record.
    ///
    /// # Errors
    /// - [`BoxofficeError::Validation`] for missing or invalid fields;
    ///   nothing is persisted.
    /// - [`BoxofficeError::DuplicateIdentifier`] on the (rare) id collision;
    ///   retryable, existing records untouched.
    #[tracing::instrument(skip(self, input), fields(event = %input.event_name, tickets = input.number_of_tickets))]
    pub async fn create_booking(&self, input: NewBooking) -> Result<BookingReceipt> {
        let booking = Booking::create(input)?;
        let receipt = BookingReceipt::from(&booking);

        tracing::info!(
            booking_id = %booking.booking_id,
            total_price = booking.total_price,
            "Creating booking"
        );
        self.store.insert(booking).await?;
        Ok(receipt)
    }

    /// Approve a booking, issuing a ticket and confirming it.
    ///
    /// Assigns a fresh ticket id, stamps `approved_at`/`booking_date`, sets
    /// status `confirmed`, persists, and dispatches a confirmation email to
    /// the customer. The email is fire-and-forget: a delivery failure is
    /// logged and never fails the approval.
    ///
    /// # Errors
    /// - [`BoxofficeError::BookingNotFound`] if no booking matches.
    /// - [`BoxofficeError::AlreadyApproved`] if already `confirmed`; the
    ///   booking is left unchanged.
    /// - [`BoxofficeError::DuplicateIdentifier`] if the fresh ticket id
    ///   collides on persist; retryable.
    #[tracing::instrument(skip(self), fields(booking_id = %booking_id))]
    pub async fn approve_booking(&self, booking_id: &BookingId) -> Result<Booking> {
        let mut booking = self.fetch(booking_id).await?;
        booking.approve(TicketId::generate())?;
        self.store.save(&booking).await?;

        tracing::info!(
            ticket_id = %booking.ticket_id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
            "Booking approved"
        );
        notify::dispatch(
            Arc::clone(&self.notifier),
            notify::confirmation_email(&booking),
        );
        Ok(booking)
    }

    /// Reject a booking.
    ///
    /// Applies from any current status, persists, and dispatches a rejection
    /// email (fire-and-forget, like approval).
    ///
    /// # Errors
    /// [`BoxofficeError::BookingNotFound`] if no booking matches.
    #[tracing::instrument(skip(self), fields(booking_id = %booking_id))]
    pub async fn reject_booking(&self, booking_id: &BookingId) -> Result<Booking> {
        let mut booking = self.fetch(booking_id).await?;
        booking.reject();
        self.store.save(&booking).await?;

        tracing::info!("Booking rejected");
        notify::dispatch(
            Arc::clone(&self.notifier),
            notify::rejection_email(&booking),
        );
        Ok(booking)
    }

    /// Cancel a booking.
    ///
    /// Applies from any current status and persists. No notification is
    /// sent.
    ///
    /// # Errors
    /// [`BoxofficeError::BookingNotFound`] if no booking matches.
    #[tracing::instrument(skip(self), fields(booking_id = %booking_id))]
    pub async fn cancel_booking(&self, booking_id: &BookingId) -> Result<Booking> {
        let mut booking = self.fetch(booking_id).await?;
        booking.cancel();
        self.store.save(&booking).await?;

        tracing::info!("Booking cancelled");
        Ok(booking)
    }

    /// Get the full projection of a booking.
    ///
    /// # Errors
    /// [`BoxofficeError::BookingNotFound`] if no booking matches.
    pub async fn get_booking(&self, booking_id: &BookingId) -> Result<Booking> {
        self.fetch(booking_id).await
    }

    /// List bookings matching the filter, ordered by creation time
    /// descending. `BookingFilter::all()` returns everything;
    /// `BookingFilter::with_status(PendingPayment)` is the admin review
    /// queue.
    pub async fn list_bookings(&self, filter: BookingFilter) -> Result<Vec<Booking>> {
        self.store.find_all(filter).await
    }

    async fn fetch(&self, booking_id: &BookingId) -> Result<Booking> {
        self.store
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| BoxofficeError::BookingNotFound(booking_id.clone()))
    }
}
