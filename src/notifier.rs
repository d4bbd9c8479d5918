//! Price-drop email over authenticated SMTP
//!
//! Unlike price lookups, delivery failures are never swallowed: the alert
//! is sent exactly once and losing it silently would defeat the tracker.

use crate::config::SmtpSettings;
use crate::error::NotifyError;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::future::Future;
use std::time::Duration;

/// Subject line of every alert
pub const ALERT_SUBJECT: &str = "Amazon Price Drop Alert";

/// Connect/command timeout for the SMTP session
pub const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivers a single plain-text message
pub trait Notifier {
    fn send(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> impl Future<Output = Result<(), NotifyError>>;
}

/// Body of the price-drop alert
pub fn alert_body(current: f64, baseline: f64, url: &str) -> String {
    format!(
        "Great news! The Amazon item you're watching is now ${:.2}.\n\
         Original price: ${:.2}\n\
         Link: {}\n",
        current, baseline, url
    )
}

fn mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address
        .trim()
        .parse::<Mailbox>()
        .map_err(|source| NotifyError::Address {
            address: address.to_string(),
            source,
        })
}

/// SMTP notifier (STARTTLS + login), one connection per message
pub struct EmailNotifier {
    settings: SmtpSettings,
}

impl EmailNotifier {
    pub fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }

    /// Plain-text message from the configured SMTP user to `recipient`
    pub fn build_message(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<Message, NotifyError> {
        Ok(Message::builder()
            .from(mailbox(&self.settings.username)?)
            .to(mailbox(recipient)?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?)
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotifyError> {
        let credentials = Credentials::new(
            self.settings.username.clone(),
            self.settings.password.clone(),
        );

        Ok(
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.settings.server)?
                .port(self.settings.port)
                .credentials(credentials)
                .timeout(Some(SMTP_TIMEOUT))
                .build(),
        )
    }
}

impl Notifier for EmailNotifier {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        let message = self.build_message(recipient, subject, body)?;

        log::info!(
            "Sending '{}' to {} via {}:{}",
            subject,
            recipient,
            self.settings.server,
            self.settings.port
        );

        // The transport is dropped on return, closing the session on every path
        let transport = self.transport()?;
        transport.send(message).await?;

        log::info!("Email delivered to {}", recipient);
        Ok(())
    }
}
