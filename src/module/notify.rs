///! Email notification for visible passes
use anyhow::{Context, Result};
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::{MailCredentials, SmtpConfig};
use crate::module::sat::Coordinate;

/// Authenticated SMTP sender for pass notifications.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    receiver: Mailbox,
}

impl Mailer {
    /// Build the STARTTLS transport and parse both mailboxes up front,
    /// so a bad address fails at startup instead of at the first pass.
    pub fn new(smtp: &SmtpConfig, credentials: MailCredentials) -> Result<Self> {
        let sender: Mailbox = credentials
            .sender
            .parse()
            .with_context(|| format!("Invalid sender address {:?}", credentials.sender))?;
        let receiver: Mailbox = credentials
            .receiver
            .parse()
            .with_context(|| format!("Invalid receiver address {:?}", credentials.receiver))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)
            .with_context(|| format!("Failed to configure SMTP relay {}", smtp.host))?
            .port(smtp.port)
            .credentials(Credentials::new(credentials.sender, credentials.password))
            .build();

        Ok(Self {
            transport,
            sender,
            receiver,
        })
    }

    /// Send the one-shot overhead notification.
    ///
    /// Not retried on failure; the caller logs the error and the loop
    /// carries on.
    pub async fn send_pass_alert(&self, observer: Coordinate, satellite: Coordinate) -> Result<()> {
        let message = Message::builder()
            .from(self.sender.clone())
            .to(self.receiver.clone())
            .subject("ISS overhead notification: look up!")
            .header(ContentType::TEXT_PLAIN)
            .body(alert_body(observer, satellite))
            .context("Failed to build notification message")?;

        self.transport
            .send(message)
            .await
            .context("Failed to send notification message")?;

        Ok(())
    }
}

fn alert_body(observer: Coordinate, satellite: Coordinate) -> String {
    format!(
        "The International Space Station is currently overhead and visible \
         from your location!\n\
         \n\
         Your latitude: {:.4}\n\
         Your longitude: {:.4}\n\
         \n\
         ISS latitude: {:.2}\n\
         ISS longitude: {:.2}\n\
         \n\
         Time to go outside and spot it!\n",
        observer.latitude, observer.longitude, satellite.latitude, satellite.longitude
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(sender: &str, receiver: &str) -> MailCredentials {
        MailCredentials {
            sender: sender.to_string(),
            receiver: receiver.to_string(),
            password: "app-password".to_string(),
        }
    }

    #[test]
    fn test_alert_body_carries_both_coordinates() {
        let body = alert_body(
            Coordinate::new(26.5458, 77.0197),
            Coordinate::new(28.91, 74.33),
        );
        assert!(body.contains("26.5458"));
        assert!(body.contains("77.0197"));
        assert!(body.contains("28.91"));
        assert!(body.contains("74.33"));
    }

    #[tokio::test]
    async fn test_mailer_builds_with_valid_addresses() {
        let smtp = SmtpConfig::default();
        let mailer = Mailer::new(&smtp, credentials("sender@example.com", "receiver@example.com"));
        assert!(mailer.is_ok());
    }

    #[test]
    fn test_mailer_rejects_malformed_sender() {
        let smtp = SmtpConfig::default();
        let mailer = Mailer::new(&smtp, credentials("not an address", "receiver@example.com"));
        assert!(mailer.is_err());
    }
}
