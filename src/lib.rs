//! Booking-management backend core for event ticketing.
//!
//! This crate implements the booking lifecycle: customers submit ticket
//! reservation requests, and an administrator approves, rejects, or cancels
//! them. Bookings start in `pending_payment`; approval issues a ticket id,
//! confirms the booking, and sends the customer a confirmation email as a
//! detached, best-effort side effect.
//!
//! Persistence and email delivery are collaborators behind the
//! [`storage::BookingStore`] and [`notify::Notifier`] traits; an in-memory
//! store and a SendGrid-backed notifier are provided.

pub mod domain;
pub mod error;
pub mod manager;
pub mod notify;
pub mod storage;

// Re-export commonly used types
pub use domain::booking::{
    Booking, BookingFilter, BookingReceipt, BookingStatus, NewBooking,
};
pub use domain::id::{BookingId, TicketId};
pub use error::{BoxofficeError, Result};
pub use manager::BookingManager;
pub use notify::{EmailMessage, MockNotifier, Notifier, SendGridConfig, SendGridNotifier};
pub use storage::memory::InMemoryBookingStore;
pub use storage::BookingStore;
