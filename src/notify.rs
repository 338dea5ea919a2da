//! Notification collaborator abstraction for sending customer emails.
//!
//! This module defines the `Notifier` trait to abstract email delivery,
//! enabling testability with mock implementations. Delivery is always
//! best-effort: the manager dispatches messages through [`dispatch`], a
//! detached task that logs failures and never surfaces them to the caller.

use async_trait::async_trait;

use crate::domain::booking::Booking;
use crate::error::Result;

/// An email to be delivered by a [`Notifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// HTML body
    pub html_body: String,
}

/// Trait for delivering notification emails.
///
/// This abstraction allows for different implementations (production vs.
/// testing) and keeps the manager's side-effect logic testable without
/// talking to a real mail provider.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a single email.
    ///
    /// # Errors
    /// Returns an error if delivery fails; callers going through
    /// [`dispatch`] will only ever see the failure in the logs.
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Spawn a detached, best-effort delivery of `message`.
///
/// The task runs independently of the caller's response path. A failure is
/// logged and dropped; it never rolls back or fails the operation that
/// triggered it. The returned handle is useful in tests; production callers
/// drop it.
pub fn dispatch<N: Notifier + ?Sized + 'static>(
    notifier: std::sync::Arc<N>,
    message: EmailMessage,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match notifier.send(&message).await {
            Ok(()) => {
                tracing::info!(to = %message.to, subject = %message.subject, "Notification sent");
            }
            Err(e) => {
                tracing::error!(
                    to = %message.to,
                    subject = %message.subject,
                    error = %e,
                    "Failed to send notification"
                );
            }
        }
    })
}

// ============================================================================
// Message builders
// ============================================================================

/// Build the confirmation email for an approved booking.
///
/// The booking must already carry its ticket id; the placeholder below only
/// appears if a caller builds the message out of order.
pub fn confirmation_email(booking: &Booking) -> EmailMessage {
    let ticket_id = booking
        .ticket_id
        .as_ref()
        .map(|t| t.to_string())
        .unwrap_or_else(|| "(unassigned)".to_string());
    EmailMessage {
        to: booking.email.clone(),
        subject: format!("Booking Confirmed - {}", booking.event_name),
        html_body: format!(
            "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
             <h2 style=\"color: #4CAF50;\">Booking Confirmed!</h2>\
             <p>Dear {customer},</p>\
             <p>Your booking has been confirmed. Here are your ticket details:</p>\
             <div style=\"background-color: #f5f5f5; padding: 20px; border-radius: 8px;\">\
             <p><strong>Ticket Type:</strong> {ticket_type}</p>\
             <p><strong>Ticket ID:</strong> {ticket_id}</p>\
             <p><strong>Booking ID:</strong> {booking_id}</p>\
             <p><strong>Event:</strong> {event}</p>\
             <p><strong>Event Date:</strong> {event_date}</p>\
             <p><strong>Number of Tickets:</strong> {tickets}</p>\
             <p><strong>Total Amount:</strong> {total}</p>\
             </div>\
             <p>Please save this email for your records. Show your Ticket ID at the venue.</p>\
             <p>Thank you for booking with us!</p>\
             </div>",
            customer = booking.customer_name,
            ticket_type = booking.ticket_type,
            ticket_id = ticket_id,
            booking_id = booking.booking_id,
            event = booking.event_name,
            event_date = booking.event_date.format("%Y-%m-%d"),
            tickets = booking.number_of_tickets,
            total = booking.total_price,
        ),
    }
}

/// Build the rejection email for a declined booking.
pub fn rejection_email(booking: &Booking) -> EmailMessage {
    EmailMessage {
        to: booking.email.clone(),
        subject: format!("Booking Declined - {}", booking.event_name),
        html_body: format!(
            "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
             <h2 style=\"color: #f44336;\">Booking Not Approved</h2>\
             <p>Dear {customer},</p>\
             <p>We regret to inform you that your booking request could not be approved.</p>\
             <div style=\"background-color: #f5f5f5; padding: 20px; border-radius: 8px;\">\
             <p><strong>Booking ID:</strong> {booking_id}</p>\
             <p><strong>Event:</strong> {event}</p>\
             <p><strong>Event Date:</strong> {event_date}</p>\
             </div>\
             <p>This may be due to unavailability or other reasons. Please contact us for more information.</p>\
             <p>We apologize for any inconvenience.</p>\
             </div>",
            customer = booking.customer_name,
            booking_id = booking.booking_id,
            event = booking.event_name,
            event_date = booking.event_date.format("%Y-%m-%d"),
        ),
    }
}

// ============================================================================
// Production implementation using the SendGrid v3 API
// ============================================================================

/// Configuration for [`SendGridNotifier`].
#[derive(Debug, Clone)]
pub struct SendGridConfig {
    /// SendGrid API key
    pub api_key: String,
    /// Verified sender address
    pub from_email: String,
    /// API base URL. Overridable for tests; defaults to the public API.
    pub base_url: String,
}

impl SendGridConfig {
    /// Create a config with the default API base URL.
    pub fn new(api_key: impl Into<String>, from_email: impl Into<String>) -> Self {
        SendGridConfig {
            api_key: api_key.into(),
            from_email: from_email.into(),
            base_url: "https://api.sendgrid.com".to_string(),
        }
    }

    /// Load the config from `SENDGRID_API_KEY` and `SENDGRID_FROM_EMAIL`.
    ///
    /// # Errors
    /// Returns a validation error if either variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("SENDGRID_API_KEY")
            .map_err(|_| crate::BoxofficeError::Validation("SENDGRID_API_KEY is not set".into()))?;
        let from_email = std::env::var("SENDGRID_FROM_EMAIL").map_err(|_| {
            crate::BoxofficeError::Validation("SENDGRID_FROM_EMAIL is not set".into())
        })?;
        if api_key.trim().is_empty() || from_email.trim().is_empty() {
            return Err(crate::BoxofficeError::Validation(
                "SendGrid credentials must be non-empty".into(),
            ));
        }
        Ok(SendGridConfig::new(api_key, from_email))
    }
}

/// Production notifier that posts to the SendGrid v3 mail-send API.
#[derive(Clone)]
pub struct SendGridNotifier {
    client: reqwest::Client,
    config: SendGridConfig,
}

impl SendGridNotifier {
    /// Create a new SendGrid-backed notifier.
    pub fn new(config: SendGridConfig) -> Self {
        SendGridNotifier {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Notifier for SendGridNotifier {
    #[tracing::instrument(skip(self, message), fields(to = %message.to, subject = %message.subject))]
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        let payload = serde_json::json!({
            "personalizations": [{ "to": [{ "email": message.to }] }],
            "from": { "email": self.config.from_email },
            "subject": message.subject,
            "content": [{ "type": "text/html", "value": message.html_body }],
        });

        let response = self
            .client
            .post(format!("{}/v3/mail/send", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "SendGrid returned status {}: {}",
                status,
                body
            )
            .into());
        }

        tracing::debug!(status = %status, "SendGrid accepted message");
        Ok(())
    }
}

// ============================================================================
// Test/Mock implementation
// ============================================================================

use parking_lot::Mutex;
use std::sync::Arc;

/// Mock notifier for testing.
///
/// Records every delivered message and can be flipped into a failing mode to
/// verify that delivery errors stay out of the caller's path.
#[derive(Clone, Default)]
pub struct MockNotifier {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    fail_sends: Arc<Mutex<bool>>,
    attempts: Arc<Mutex<usize>>,
}

impl MockNotifier {
    /// Create a new mock notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages delivered so far (failed attempts are not recorded).
    pub fn sent_messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().clone()
    }

    /// Number of successfully delivered messages.
    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }

    /// Number of delivery attempts, successful or not.
    pub fn attempt_count(&self) -> usize {
        *self.attempts.lock()
    }

    /// Make subsequent sends fail (or succeed again with `false`).
    pub fn set_failing(&self, failing: bool) {
        *self.fail_sends.lock() = failing;
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        *self.attempts.lock() += 1;
        if *self.fail_sends.lock() {
            return Err(anyhow::anyhow!("mock notifier configured to fail").into());
        }
        self.sent.lock().push(message.clone());
        Ok(())
    }
}
