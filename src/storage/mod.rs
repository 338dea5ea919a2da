//! Persistence collaborator contract for bookings.
//!
//! The manager never talks to a database directly; it goes through the
//! [`BookingStore`] trait, which models a document store with atomic
//! single-document read-modify-write semantics and uniqueness constraints on
//! the identifier fields. Backends map their native duplicate-key failures
//! to [`DuplicateIdentifier`](crate::BoxofficeError::DuplicateIdentifier)
//! and everything else to [`Storage`](crate::BoxofficeError::Storage).

pub mod memory;

use async_trait::async_trait;

use crate::domain::booking::{Booking, BookingFilter};
use crate::domain::id::BookingId;
use crate::error::Result;

/// Storage trait for persisting and querying bookings.
///
/// Implementations must enforce uniqueness of `booking_id` across all
/// records and of `ticket_id` across all records that have one.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Insert a new booking.
    ///
    /// # Errors
    /// Fails with `DuplicateIdentifier` if the booking id is already taken;
    /// the existing record is left untouched.
    async fn insert(&self, booking: Booking) -> Result<()>;

    /// Update an existing booking in place, keyed by its booking id.
    ///
    /// # Errors
    /// Fails with `BookingNotFound` if no record matches, or with
    /// `DuplicateIdentifier` if the update would assign a ticket id that is
    /// already held by another booking.
    async fn save(&self, booking: &Booking) -> Result<()>;

    /// Look up a booking by id. Returns `None` if no record matches.
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>>;

    /// List bookings matching the filter, ordered by `created_at`
    /// descending.
    async fn find_all(&self, filter: BookingFilter) -> Result<Vec<Booking>>;
}
