//! Verify Email Use Case
//!
//! Confirms a registration code and marks the account verified.

use std::sync::Arc;

use crate::domain::repository::{AccountRepository, CodeStore};
use crate::domain::value_object::{email::Email, verification::CodePurpose};
use crate::error::{AccountsError, AccountsResult};

/// Verify email input
pub struct VerifyEmailInput {
    pub email: String,
    pub code: String,
}

/// Verify email use case
pub struct VerifyEmailUseCase<R, C>
where
    R: AccountRepository,
    C: CodeStore,
{
    repo: Arc<R>,
    codes: Arc<C>,
}

impl<R, C> VerifyEmailUseCase<R, C>
where
    R: AccountRepository,
    C: CodeStore,
{
    pub fn new(repo: Arc<R>, codes: Arc<C>) -> Self {
        Self { repo, codes }
    }

    pub async fn execute(&self, input: VerifyEmailInput) -> AccountsResult<()> {
        // A malformed email cannot have a code, so the error is the same
        let email = Email::new(input.email).map_err(|_| AccountsError::InvalidOrExpiredCode)?;

        let stored = self
            .codes
            .get(CodePurpose::Registration, &email)
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

        account.mark_verified();
        self.repo.update(&account).await?;

        // Consumed only after the account write sticks; a failed update
        // leaves the code valid for a retry
        self.codes.delete(CodePurpose::Registration, &email).await?;

        tracing::info!(account_id = %account.account_id, "Email verified");

        Ok(())
    }
}
