//! src/transport.rs

use crate::configuration::SmtpSettings;
use crate::domain::Notification;
use crate::email_client::EmailClient;
use std::time::Duration;

/// Required notification settings that are absent.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("missing settings: {}", .0.join(", "))]
pub struct ConfigurationError(pub Vec<&'static str>);

#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("The notification could not be delivered")]
    Delivery(#[source] anyhow::Error),
    #[error("Delivering the notification took longer than {0:?}")]
    TimedOut(Duration),
}

/// Outcome of a delivered notification.
#[derive(serde::Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Opaque message identifier assigned by the provider, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl DeliveryReceipt {
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
    }
}

/// Relays a rendered notification to the operations inbox.
#[async_trait::async_trait]
pub trait NotificationTransport: Send + Sync {
    /// Checks that everything needed to deliver is configured, without any network call.
    fn ensure_configured(&self) -> Result<(), ConfigurationError>;

    async fn send_notification(
        &self,
        notification: &Notification,
    ) -> Result<DeliveryReceipt, TransportError>;
}

/// Send `notification` once, failing fast if the transport does not finish within `timeout`.
#[tracing::instrument(name = "Deliver notification", skip(transport, notification))]
pub async fn deliver(
    transport: &dyn NotificationTransport,
    notification: &Notification,
    timeout: Duration,
) -> Result<DeliveryReceipt, TransportError> {
    tokio::time::timeout(timeout, transport.send_notification(notification))
        .await
        .map_err(|_| TransportError::TimedOut(timeout))?
}

fn missing<T>(settings: &mut Vec<&'static str>, name: &'static str, value: Option<&T>) {
    if value.is_none() {
        settings.push(name);
    }
}

/// Delivers through the email provider API.
pub struct ProviderTransport {
    email_client: Option<EmailClient>,
    recipient: Option<String>,
}

impl ProviderTransport {
    pub fn new(email_client: Option<EmailClient>, recipient: Option<String>) -> Self {
        Self {
            email_client,
            recipient: recipient.filter(|r| !r.is_empty()),
        }
    }

    fn configured(&self) -> Result<(&EmailClient, &str), ConfigurationError> {
        match (&self.email_client, &self.recipient) {
            (Some(email_client), Some(recipient)) => Ok((email_client, recipient.as_str())),
            _ => {
                let mut settings = Vec::new();
                missing(&mut settings, "RESEND_API_KEY", self.email_client.as_ref());
                missing(&mut settings, "NOTIFICATION_EMAIL", self.recipient.as_ref());
                Err(ConfigurationError(settings))
            }
        }
    }
}

#[async_trait::async_trait]
impl NotificationTransport for ProviderTransport {
    fn ensure_configured(&self) -> Result<(), ConfigurationError> {
        self.configured().map(|_| ())
    }

    #[tracing::instrument(
        name = "Send notification through the email provider",
        skip(self, notification)
    )]
    async fn send_notification(
        &self,
        notification: &Notification,
    ) -> Result<DeliveryReceipt, TransportError> {
        let (email_client, recipient) = self.configured()?;
        let sent = email_client
            .send_email(
                recipient,
                notification.subject,
                &notification.html_body,
                &notification.text_body,
            )
            .await
            .map_err(|e| TransportError::Delivery(e.into()))?;
        Ok(DeliveryReceipt { id: Some(sent.id) })
    }
}

/// Stand-in for the SMTP relay: checks its settings, logs the notification
/// and reports success without any network call.
pub struct LoggingTransport {
    smtp: SmtpSettings,
    recipient: Option<String>,
}

impl LoggingTransport {
    pub fn new(smtp: SmtpSettings, recipient: Option<String>) -> Self {
        Self {
            smtp,
            recipient: recipient.filter(|r| !r.is_empty()),
        }
    }
}

#[async_trait::async_trait]
impl NotificationTransport for LoggingTransport {
    fn ensure_configured(&self) -> Result<(), ConfigurationError> {
        let mut settings = Vec::new();
        missing(&mut settings, "SMTP_HOST", self.smtp.host.as_ref());
        missing(&mut settings, "SMTP_PORT", self.smtp.port.as_ref());
        missing(&mut settings, "SMTP_USER", self.smtp.user.as_ref());
        missing(&mut settings, "SMTP_PASS", self.smtp.password.as_ref());
        missing(&mut settings, "NOTIFICATION_EMAIL", self.recipient.as_ref());
        if settings.is_empty() {
            Ok(())
        } else {
            Err(ConfigurationError(settings))
        }
    }

    async fn send_notification(
        &self,
        notification: &Notification,
    ) -> Result<DeliveryReceipt, TransportError> {
        self.ensure_configured()?;
        tracing::info!(
            recipient = self.recipient.as_deref().unwrap_or_default(),
            sender = self.smtp.user.as_deref().unwrap_or_default(),
            subject = notification.subject,
            "Sending email"
        );
        Ok(DeliveryReceipt::default())
    }
}
