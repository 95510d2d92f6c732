//! Contact Support Use Case
//!
//! Relays a message to the support inbox. The endpoint is public, so the
//! sender identifies themselves with an optional name and phone number.

use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::domain::repository::Mailer;
use crate::error::{AccountsError, AccountsResult};

/// Maximum support message length
const MESSAGE_MAX_LENGTH: usize = 5000;

/// Contact support input
pub struct ContactSupportInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub message: String,
}

/// Contact support use case
pub struct ContactSupportUseCase<M>
where
    M: Mailer,
{
    mailer: Arc<M>,
    config: Arc<AccountsConfig>,
}

impl<M> ContactSupportUseCase<M>
where
    M: Mailer,
{
    pub fn new(mailer: Arc<M>, config: Arc<AccountsConfig>) -> Self {
        Self { mailer, config }
    }

    pub async fn execute(&self, input: ContactSupportInput) -> AccountsResult<()> {
        let message = input.message.trim();

        if message.is_empty() {
            return Err(AccountsError::Validation("Message cannot be empty".into()));
        }
        if message.chars().count() > MESSAGE_MAX_LENGTH {
            return Err(AccountsError::Validation(format!(
                "Message must be at most {} characters",
                MESSAGE_MAX_LENGTH
            )));
        }

        let sender = input
            .name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or_else(|| {
                input
                    .phone
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or("anonymous");

        let body = format!("From: {}\n\n{}", sender, message);
        self.mailer
            .send(&self.config.support_email, "Support request", &body)
            .await?;

        tracing::info!("Support message relayed");

        Ok(())
    }
}
