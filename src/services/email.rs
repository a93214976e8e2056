use crate::config::EmailSettings;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Error type for email delivery failures. All of these are degraded
/// outcomes at the dispatch level, never pipeline-halting errors.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("email build error: {0}")]
    Build(String),

    /// The send did not complete within the configured bound.
    #[error("email send timed out after {0}s")]
    Timeout(u64),
}

/// One-shot email delivery. Implementations make at most one attempt per
/// call; retries are the caller's (non-)policy.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError>;
}

/// SMTP mailer over lettre with a bounded send.
///
/// Construct only when SMTP is configured ([`EmailSettings::smtp_host`] set);
/// an unconfigured deployment short-circuits at the dispatcher without ever
/// opening a connection.
pub struct SmtpMailer {
    host: String,
    port: u16,
    from_address: String,
    user: Option<String>,
    password: Option<String>,
    timeout: Duration,
}

impl SmtpMailer {
    /// Build a mailer from settings. Returns `None` when no SMTP host is
    /// configured.
    pub fn from_settings(settings: &EmailSettings) -> Option<Self> {
        let host = settings.smtp_host.clone()?;
        Some(Self {
            host,
            port: settings.smtp_port,
            from_address: settings.from_address.clone(),
            user: settings.smtp_user.clone(),
            password: settings.smtp_password.clone(),
            timeout: Duration::from_secs(settings.send_timeout_secs),
        })
    }
}

#[async_trait]
impl EmailTransport for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let email = Message::builder()
            .from(self.from_address.parse()?)
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)?
            .port(self.port);

        if let (Some(user), Some(pass)) = (&self.user, &self.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = builder.build();

        match tokio::time::timeout(self.timeout, mailer.send(email)).await {
            Ok(Ok(_)) => {
                tracing::info!(to, "Notification email sent");
                Ok(())
            }
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(EmailError::Timeout(self.timeout.as_secs())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmailSettings;

    #[test]
    fn test_no_mailer_without_smtp_host() {
        let settings = EmailSettings::default();
        assert!(settings.smtp_host.is_none());
        assert!(SmtpMailer::from_settings(&settings).is_none());
    }

    #[test]
    fn test_mailer_built_when_host_configured() {
        let settings = EmailSettings {
            smtp_host: Some("smtp.example.com".to_string()),
            ..EmailSettings::default()
        };
        let mailer = SmtpMailer::from_settings(&settings).unwrap();
        assert_eq!(mailer.host, "smtp.example.com");
        assert_eq!(mailer.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_timeout_error_display() {
        let err = EmailError::Timeout(10);
        assert_eq!(err.to_string(), "email send timed out after 10s");
    }
}
