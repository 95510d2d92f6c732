//! Outbound Mail Implementations
//!
//! `SmtpMailer` delivers over SMTP with lettre. `LogMailer` writes messages
//! to the log instead, for local development without a mail server.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::repository::Mailer;
use crate::error::{AccountsError, AccountsResult};

/// SMTP connection settings
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    /// From address on outbound mail
    pub from: String,
}

/// SMTP-backed mailer
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> AccountsResult<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| AccountsError::Mail(e.to_string()))?
            .credentials(Credentials::new(config.username, config.password))
            .build();

        Ok(Self {
            transport,
            from: config.from,
        })
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AccountsResult<()> {
        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|_| AccountsError::Mail("Invalid from address".to_string()))?,
            )
            .to(to
                .parse()
                .map_err(|_| AccountsError::Mail("Invalid recipient address".to_string()))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| AccountsError::Mail(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AccountsError::Mail(e.to_string()))?;

        tracing::debug!(subject = %subject, "Email sent");

        Ok(())
    }
}

/// Mailer that logs instead of sending, for development
#[derive(Clone, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AccountsResult<()> {
        tracing::info!(to = %to, subject = %subject, body = %body, "Mail (log only)");
        Ok(())
    }
}
