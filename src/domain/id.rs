//! Identifier newtypes for bookings and issued tickets.
//!
//! Both identifiers are short, human-readable prefixed tokens rather than
//! UUIDs: customers quote them over the phone and show them at the venue.
//! They are unguessable enough to avoid casual collision but not
//! cryptographically secure; uniqueness is enforced by the persistence
//! collaborator, and a collision surfaces as a retryable
//! [`DuplicateIdentifier`](crate::BoxofficeError::DuplicateIdentifier).

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Unique identifier for a booking, assigned at creation.
///
/// Format: `BKG-<unix-millis>-<4-digit random suffix>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub String);

impl BookingId {
    /// Generate a fresh booking identifier.
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let suffix: u16 = rand::thread_rng().gen_range(1000..10000);
        BookingId(format!("BKG-{}-{}", millis, suffix))
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BookingId {
    fn from(s: String) -> Self {
        BookingId(s)
    }
}

impl std::ops::Deref for BookingId {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Unique identifier for an issued ticket, assigned only upon approval.
///
/// Format: `TKT-<6-digit random token>`, visually distinguishable from a
/// booking id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(pub String);

impl TicketId {
    /// Generate a fresh ticket identifier.
    pub fn generate() -> Self {
        let token: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
        TicketId(format!("TKT-{}", token))
    }
}

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TicketId {
    fn from(s: String) -> Self {
        TicketId(s)
    }
}

impl std::ops::Deref for TicketId {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
