//! Register Use Case
//!
//! Creates a new unverified account and emails a registration code.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AccountsConfig;
use crate::domain::entity::account::Account;
use crate::domain::repository::{AccountRepository, CodeStore, Mailer};
use crate::domain::value_object::{
    email::Email,
    shop_name::ShopName,
    verification::{CodePurpose, VerificationCode},
};
use crate::error::{AccountsError, AccountsResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub shop_name: String,
    pub password: String,
    pub profile_image: Option<String>,
}

/// Register output
pub struct RegisterOutput {
    pub account_id: String,
    pub email: String,
}

/// Register use case
pub struct RegisterUseCase<R, C, M>
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

impl<R, C, M> RegisterUseCase<R, C, M>
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

    pub async fn execute(&self, input: RegisterInput) -> AccountsResult<RegisterOutput> {
        let email =
            Email::new(input.email).map_err(|e| AccountsError::Validation(e.to_string()))?;
        let shop_name =
            ShopName::new(input.shop_name).map_err(|e| AccountsError::Validation(e.to_string()))?;

        if self.repo.exists_by_email(&email).await? {
            return Err(AccountsError::EmailTaken);
        }

        // Validate and hash password
        let password = ClearTextPassword::new(input.password)?;
        let password_hash = password.hash(self.config.pepper())?;

        let account = Account::new(email.clone(), shop_name, password_hash, input.profile_image);

        // Persist first so a mail failure leaves a retriable account behind.
        // The unique index maps a concurrent duplicate to EmailTaken.
        self.repo.create(&account).await?;

        let code = VerificationCode::generate(self.config.code_length);
        self.codes
            .set(CodePurpose::Registration, &email, &code, self.config.code_ttl)
            .await?;

        let body = format!(
            "Welcome! Your verification code is {}.\n\nIt expires in {} minutes.",
            code,
            self.config.code_ttl_minutes()
        );
        self.mailer
            .send(email.as_str(), "Verify your email address", &body)
            .await?;

        tracing::info!(
            account_id = %account.account_id,
            "Account registered, verification code sent"
        );

        Ok(RegisterOutput {
            account_id: account.account_id.to_string(),
            email: account.email.to_string(),
        })
    }
}
