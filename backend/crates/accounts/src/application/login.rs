//! Login Use Case
//!
//! Verifies credentials and issues a JWT token pair.
//!
//! Unknown email, wrong password, and malformed email all produce the same
//! `InvalidCredentials` error so that responses do not reveal whether an
//! address is registered. The unverified-email error is only reachable
//! after the password has been checked.

use std::sync::{Arc, OnceLock};

use platform::password::{ClearTextPassword, HashedPassword};
use platform::token::{TokenIssuer, TokenPair, TokenSubject};

use crate::domain::repository::AccountRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AccountsError, AccountsResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub account_id: String,
    pub email: String,
    pub shop_name: String,
    pub profile_image: Option<String>,
    pub verified: bool,
    pub tokens: TokenPair,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    issuer: Arc<TokenIssuer>,
    pepper: Option<Vec<u8>>,
}

impl<R> LoginUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, issuer: Arc<TokenIssuer>, pepper: Option<Vec<u8>>) -> Self {
        Self {
            repo,
            issuer,
            pepper,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AccountsResult<LoginOutput> {
        let submitted = ClearTextPassword::for_verification(input.password);

        let email = match Email::new(input.email) {
            Ok(email) => email,
            Err(_) => {
                Self::burn_verification(&submitted);
                return Err(AccountsError::InvalidCredentials);
            }
        };

        let account = match self.repo.find_by_email(&email).await? {
            Some(account) => account,
            None => {
                // Equalize timing with the found-account path
                Self::burn_verification(&submitted);
                return Err(AccountsError::InvalidCredentials);
            }
        };

        if !account.password.verify(&submitted, self.pepper.as_deref()) {
            return Err(AccountsError::InvalidCredentials);
        }

        // Deactivated accounts are indistinguishable from bad credentials
        if !account.is_active {
            return Err(AccountsError::InvalidCredentials);
        }

        if !account.verified {
            return Err(AccountsError::EmailNotVerified);
        }

        let account_id = account.account_id.to_string();
        let tokens = self.issuer.issue(TokenSubject {
            account_id: &account_id,
            email: account.email.as_str(),
            verified: account.verified,
        })?;

        tracing::info!(account_id = %account.account_id, "Login succeeded");

        Ok(LoginOutput {
            account_id,
            email: account.email.to_string(),
            shop_name: account.shop_name.to_string(),
            profile_image: account.profile_image,
            verified: account.verified,
            tokens,
        })
    }

    /// Run a hash verification against a fixed dummy hash and discard the
    /// result, so missing accounts cost the same as wrong passwords.
    fn burn_verification(submitted: &ClearTextPassword) {
        static DUMMY: OnceLock<Option<HashedPassword>> = OnceLock::new();
        let dummy = DUMMY.get_or_init(|| {
            ClearTextPassword::for_verification("timing-equalizer".to_string())
                .hash(None)
                .ok()
        });
        if let Some(hash) = dummy {
            let _ = hash.verify(submitted, None);
        }
    }
}
