//! Confirm Password Reset Use Case
//!
//! Validates a reset code and replaces the account password.
//!
//! The new password is policy-checked before the code is consulted, so a
//! rejected password never burns a valid single-use code.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AccountsConfig;
use crate::domain::repository::{AccountRepository, CodeStore};
use crate::domain::value_object::{email::Email, verification::CodePurpose};
use crate::error::{AccountsError, AccountsResult};

/// Confirm password reset input
pub struct ConfirmPasswordResetInput {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

/// Confirm password reset use case
pub struct ConfirmPasswordResetUseCase<R, C>
where
    R: AccountRepository,
    C: CodeStore,
{
    repo: Arc<R>,
    codes: Arc<C>,
    config: Arc<AccountsConfig>,
}

impl<R, C> ConfirmPasswordResetUseCase<R, C>
where
    R: AccountRepository,
    C: CodeStore,
{
    pub fn new(repo: Arc<R>, codes: Arc<C>, config: Arc<AccountsConfig>) -> Self {
        Self {
            repo,
            codes,
            config,
        }
    }

    pub async fn execute(&self, input: ConfirmPasswordResetInput) -> AccountsResult<()> {
        // Policy check first, before any code lookup
        let new_password = ClearTextPassword::new(input.new_password)?;

        let email = Email::new(input.email).map_err(|_| AccountsError::InvalidOrExpiredCode)?;

        let stored = self
            .codes
            .get(CodePurpose::PasswordReset, &email)
            .await?
            .ok_or(AccountsError::InvalidOrExpiredCode)?;

        if !stored.matches(&input.code) {
            return Err(AccountsError::InvalidOrExpiredCode);
        }

        let mut account = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AccountsError::InvalidOrExpiredCode)?;

        let password_hash = new_password.hash(self.config.pepper())?;
        account.set_password(password_hash);
        self.repo.update(&account).await?;

        // Consumed only after the password write sticks; a failed update
        // leaves the code valid for a retry
        self.codes
            .delete(CodePurpose::PasswordReset, &email)
            .await?;

        tracing::info!(account_id = %account.account_id, "Password reset completed");

        Ok(())
    }
}
