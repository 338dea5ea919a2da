//! In-memory booking store.
//!
//! An in-process implementation of [`BookingStore`] backed by a
//! `tokio::sync::RwLock`-guarded map. It enforces the same uniqueness
//! constraints a real document store would (unique `booking_id`, unique
//! sparse `ticket_id`), which makes it suitable both for tests and for
//! embedders that don't need durable storage.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::booking::{Booking, BookingFilter};
use crate::domain::id::BookingId;
use crate::error::Result;
use crate::storage::BookingStore;
use crate::BoxofficeError;

/// In-memory [`BookingStore`] with uniqueness constraints.
#[derive(Default)]
pub struct InMemoryBookingStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    bookings: HashMap<BookingId, Booking>,
    // Sparse uniqueness index over assigned ticket ids.
    ticket_ids: HashSet<String>,
}

impl InMemoryBookingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bookings currently stored.
    pub async fn len(&self) -> usize {
        self.inner.read().await.bookings.len()
    }

    /// Whether the store holds no bookings.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.bookings.is_empty()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn insert(&self, booking: Booking) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.bookings.contains_key(&booking.booking_id) {
            return Err(BoxofficeError::DuplicateIdentifier(
                booking.booking_id.to_string(),
            ));
        }
        if let Some(ticket_id) = &booking.ticket_id {
            if !inner.ticket_ids.insert(ticket_id.to_string()) {
                return Err(BoxofficeError::DuplicateIdentifier(ticket_id.to_string()));
            }
        }
        inner.bookings.insert(booking.booking_id.clone(), booking);
        Ok(())
    }

    async fn save(&self, booking: &Booking) -> Result<()> {
        let mut inner = self.inner.write().await;
        let previous_ticket = match inner.bookings.get(&booking.booking_id) {
            Some(existing) => existing.ticket_id.clone(),
            None => {
                return Err(BoxofficeError::BookingNotFound(booking.booking_id.clone()));
            }
        };

        // Maintain the sparse ticket-id index across the update.
        if booking.ticket_id != previous_ticket {
            if let Some(new_ticket) = &booking.ticket_id {
                if inner.ticket_ids.contains(&new_ticket.0) {
                    return Err(BoxofficeError::DuplicateIdentifier(new_ticket.to_string()));
                }
            }
            if let Some(old_ticket) = &previous_ticket {
                inner.ticket_ids.remove(&old_ticket.0);
            }
            if let Some(new_ticket) = &booking.ticket_id {
                inner.ticket_ids.insert(new_ticket.to_string());
            }
        }

        inner
            .bookings
            .insert(booking.booking_id.clone(), booking.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>> {
        Ok(self.inner.read().await.bookings.get(id).cloned())
    }

    async fn find_all(&self, filter: BookingFilter) -> Result<Vec<Booking>> {
        let inner = self.inner.read().await;
        let mut bookings: Vec<Booking> = inner
            .bookings
            .values()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect();
        // created_at descending; booking id breaks ties so the order is
        // deterministic regardless of map iteration order.
        bookings.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.booking_id.0.cmp(&a.booking_id.0))
        });
        Ok(bookings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::{BookingStatus, NewBooking};
    use crate::domain::id::TicketId;
    use chrono::{Duration, TimeZone, Utc};

    fn booking(suffix: u32) -> Booking {
        let mut booking = Booking::create(NewBooking {
            customer_name: format!("Customer {}", suffix),
            email: format!("customer{}@example.com", suffix),
            phone: "+91-9000000000".to_string(),
            event_name: "Spring Recital".to_string(),
            event_date: Utc.with_ymd_and_hms(2026, 10, 12, 18, 30, 0).unwrap(),
            ticket_type: "Standard".to_string(),
            number_of_tickets: 1,
            price_per_ticket: 250.0,
        })
        .unwrap();
        // Deterministic ids and timestamps for ordering assertions.
        booking.booking_id = BookingId::from(format!("BKG-1000-{:04}", suffix));
        booking.created_at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
            + Duration::seconds(i64::from(suffix));
        booking
    }

    #[tokio::test]
    async fn usable_through_the_store_trait() {
        // The manager only ever sees the store through the trait; round-trip
        // a record through a trait object to pin the impl to it.
        let store: Box<dyn BookingStore> = Box::new(InMemoryBookingStore::new());
        let record = booking(1);
        store.insert(record.clone()).await.unwrap();
        let found = store.find_by_id(&record.booking_id).await.unwrap();
        assert_eq!(found, Some(record));
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_booking_id() {
        let store = InMemoryBookingStore::new();
        store.insert(booking(1)).await.unwrap();

        let duplicate = booking(1);
        let err = store.insert(duplicate).await.unwrap_err();
        assert!(matches!(err, BoxofficeError::DuplicateIdentifier(_)));
        assert!(err.is_retryable());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn save_rejects_missing_booking() {
        let store = InMemoryBookingStore::new();
        let err = store.save(&booking(1)).await.unwrap_err();
        assert!(matches!(err, BoxofficeError::BookingNotFound(_)));
    }

    #[tokio::test]
    async fn save_rejects_ticket_id_already_in_use() {
        let store = InMemoryBookingStore::new();
        let mut first = booking(1);
        let mut second = booking(2);
        store.insert(first.clone()).await.unwrap();
        store.insert(second.clone()).await.unwrap();

        first
            .approve(TicketId::from("TKT-111111".to_string()))
            .unwrap();
        store.save(&first).await.unwrap();

        second
            .approve(TicketId::from("TKT-111111".to_string()))
            .unwrap();
        let err = store.save(&second).await.unwrap_err();
        assert!(matches!(err, BoxofficeError::DuplicateIdentifier(_)));

        // The existing holder is untouched and the loser not updated.
        let stored = store.find_by_id(&second.booking_id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::PendingPayment);
    }

    #[tokio::test]
    async fn find_all_filters_and_orders_descending() {
        let store = InMemoryBookingStore::new();
        let mut rejected = booking(1);
        rejected.reject();
        store.insert(rejected).await.unwrap();
        store.insert(booking(2)).await.unwrap();
        store.insert(booking(3)).await.unwrap();

        let pending = store
            .find_all(BookingFilter::with_status(BookingStatus::PendingPayment))
            .await
            .unwrap();
        assert_eq!(pending.len(), 2);
        // Newest first
        assert_eq!(pending[0].booking_id.0, "BKG-1000-0003");
        assert_eq!(pending[1].booking_id.0, "BKG-1000-0002");

        let all = store.find_all(BookingFilter::all()).await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }
}
