//! Notification side-effect behavior: detached dispatch, best-effort
//! delivery, and exactly-which-transitions-send rules.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};

use boxoffice::{
    BookingManager, BookingStatus, InMemoryBookingStore, MockNotifier, NewBooking,
};

fn manager() -> (
    BookingManager<InMemoryBookingStore, MockNotifier>,
    Arc<MockNotifier>,
) {
    let store = Arc::new(InMemoryBookingStore::new());
    let notifier = Arc::new(MockNotifier::new());
    let manager = BookingManager::new(store, notifier.clone());
    (manager, notifier)
}

fn new_booking(email: &str) -> NewBooking {
    NewBooking {
        customer_name: "Asha Rao".to_string(),
        email: email.to_string(),
        phone: "+91-9000000000".to_string(),
        event_name: "Spring Recital".to_string(),
        event_date: Utc.with_ymd_and_hms(2026, 10, 12, 18, 30, 0).unwrap(),
        ticket_type: "VIP".to_string(),
        number_of_tickets: 2,
        price_per_ticket: 500.0,
    }
}

/// Poll until the mock has attempted `n` deliveries, or panic after the
/// timeout. Dispatch is detached, so tests have to wait for it to land.
async fn wait_for_attempts(notifier: &MockNotifier, n: usize) {
    let start = tokio::time::Instant::now();
    let timeout = Duration::from_secs(5);
    while notifier.attempt_count() < n {
        if start.elapsed() > timeout {
            panic!(
                "notifier saw {} attempts within timeout, expected {}",
                notifier.attempt_count(),
                n
            );
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[test_log::test(tokio::test)]
async fn approval_sends_exactly_one_confirmation_email() {
    let (manager, notifier) = manager();

    let receipt = manager
        .create_booking(new_booking("asha@example.com"))
        .await
        .unwrap();
    // Creation sends nothing.
    assert_eq!(notifier.attempt_count(), 0);

    let approved = manager.approve_booking(&receipt.booking_id).await.unwrap();
    wait_for_attempts(&notifier, 1).await;

    let sent = notifier.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "asha@example.com");
    assert_eq!(sent[0].subject, "Booking Confirmed - Spring Recital");
    let ticket_id = approved.ticket_id.unwrap();
    assert!(sent[0].html_body.contains(&ticket_id.0));
}

#[test_log::test(tokio::test)]
async fn rejection_sends_a_rejection_email() {
    let (manager, notifier) = manager();

    let receipt = manager
        .create_booking(new_booking("ben@example.com"))
        .await
        .unwrap();
    manager.reject_booking(&receipt.booking_id).await.unwrap();
    wait_for_attempts(&notifier, 1).await;

    let sent = notifier.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ben@example.com");
    assert_eq!(sent[0].subject, "Booking Declined - Spring Recital");
}

#[test_log::test(tokio::test)]
async fn cancellation_sends_nothing() {
    let (manager, notifier) = manager();

    let receipt = manager
        .create_booking(new_booking("carmen@example.com"))
        .await
        .unwrap();
    manager.cancel_booking(&receipt.booking_id).await.unwrap();

    // Give any stray dispatch a chance to land before asserting silence.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(notifier.attempt_count(), 0);
}

#[test_log::test(tokio::test)]
async fn delivery_failure_does_not_fail_or_roll_back_the_operation() {
    let (manager, notifier) = manager();
    notifier.set_failing(true);

    let receipt = manager
        .create_booking(new_booking("asha@example.com"))
        .await
        .unwrap();

    // Approval succeeds even though the email will fail.
    let approved = manager.approve_booking(&receipt.booking_id).await.unwrap();
    assert_eq!(approved.status, BookingStatus::Confirmed);
    wait_for_attempts(&notifier, 1).await;
    assert_eq!(notifier.sent_count(), 0);

    // The persisted record kept the approval.
    let stored = manager.get_booking(&receipt.booking_id).await.unwrap();
    assert_eq!(stored.status, BookingStatus::Confirmed);
    assert!(stored.ticket_id.is_some());

    // Rejection likewise survives a failing notifier.
    let second = manager
        .create_booking(new_booking("ben@example.com"))
        .await
        .unwrap();
    let rejected = manager.reject_booking(&second.booking_id).await.unwrap();
    assert_eq!(rejected.status, BookingStatus::Rejected);
    wait_for_attempts(&notifier, 2).await;
}
