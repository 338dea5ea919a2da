//! Error types for the booking system.

use thiserror::Error;

use crate::domain::id::BookingId;

/// Result type alias using the boxoffice error type.
pub type Result<T> = std::result::Result<T, BoxofficeError>;

/// Main error type for the booking system.
#[derive(Error, Debug)]
pub enum BoxofficeError {
    /// Booking not found
    #[error("Booking not found: {0}")]
    BookingNotFound(BookingId),

    /// Approve called on an already-confirmed booking
    #[error("Booking already approved: {0}")]
    AlreadyApproved(BookingId),

    /// Validation error (missing or invalid input fields)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Identifier collision on insert or ticket assignment.
    ///
    /// The persistence collaborator enforces uniqueness on `booking_id` and
    /// `ticket_id`; a violation surfaces here and is safe to retry with a
    /// freshly generated identifier. Existing records are never touched.
    #[error("Duplicate identifier: {0}")]
    DuplicateIdentifier(String),

    /// Opaque downstream storage failure
    #[error("Storage failure: {0}")]
    Storage(#[source] anyhow::Error),

    /// Notification delivery failure
    #[error("Notification delivery failed: {0}")]
    Notification(#[from] reqwest::Error),

    /// General error from anyhow
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoxofficeError {
    /// Returns true if the failed operation is safe to retry as-is.
    ///
    /// Only identifier collisions qualify: the inputs were valid and a retry
    /// will draw a fresh identifier. The manager never retries internally;
    /// retry policy belongs to the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BoxofficeError::DuplicateIdentifier(_))
    }
}
