//! Request Password Reset Use Case
//!
//! Emails a reset code to an account's address. The response is identical
//! whether or not the address is registered, so callers cannot enumerate
//! accounts.

use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::domain::repository::{AccountRepository, CodeStore, Mailer};
use crate::domain::value_object::{
    email::Email,
    verification::{CodePurpose, VerificationCode},
};
use crate::error::AccountsResult;

/// Request password reset input
pub struct RequestPasswordResetInput {
    pub email: String,
}

/// Request password reset use case
pub struct RequestPasswordResetUseCase<R, C, M>
where
    R: AccountRepository,
    C: CodeStore,
    M: Mailer,
{
    repo: Arc<R>,
    codes: Arc<C>,
    mailer: Arc<M>,
    config: Arc<AccountsConfig>,
}

impl<R, C, M> RequestPasswordResetUseCase<R, C, M>
where
    R: AccountRepository,
    C: CodeStore,
    M: Mailer,
{
    pub fn new(repo: Arc<R>, codes: Arc<C>, mailer: Arc<M>, config: Arc<AccountsConfig>) -> Self {
        Self {
            repo,
            codes,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, input: RequestPasswordResetInput) -> AccountsResult<()> {
        // Malformed or unknown addresses get the same empty success
        let Ok(email) = Email::new(input.email) else {
            return Ok(());
        };

        if !self.repo.exists_by_email(&email).await? {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(());
        }

        let code = VerificationCode::generate(self.config.code_length);
        self.codes
            .set(
                CodePurpose::PasswordReset,
                &email,
                &code,
                self.config.code_ttl,
            )
            .await?;

        let body = format!(
            "Your password reset code is {}.\n\nIt expires in {} minutes. \
             If you did not request a reset, you can ignore this email.",
            code,
            self.config.code_ttl_minutes()
        );
        self.mailer
            .send(email.as_str(), "Password reset code", &body)
            .await?;

        tracing::info!("Password reset code sent");

        Ok(())
    }
}
