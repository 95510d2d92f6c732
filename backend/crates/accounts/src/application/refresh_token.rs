//! Refresh Token Use Case
//!
//! Exchanges a valid refresh token for a fresh token pair. The account is
//! reloaded so revoked or changed accounts stop refreshing.

use std::sync::Arc;

use platform::token::{TokenIssuer, TokenPair, TokenSubject};
use uuid::Uuid;

use crate::domain::repository::AccountRepository;
use crate::domain::value_object::account_id::AccountId;
use crate::error::{AccountsError, AccountsResult};

/// Refresh token input
pub struct RefreshTokenInput {
    pub refresh_token: String,
}

/// Refresh token use case
pub struct RefreshTokenUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    issuer: Arc<TokenIssuer>,
}

impl<R> RefreshTokenUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, issuer: Arc<TokenIssuer>) -> Self {
        Self { repo, issuer }
    }

    pub async fn execute(&self, input: RefreshTokenInput) -> AccountsResult<TokenPair> {
        let claims = self.issuer.decode_refresh(&input.refresh_token)?;

        let account_id = Uuid::parse_str(&claims.sub)
            .map(AccountId::from_uuid)
            .map_err(|_| AccountsError::Token("Malformed subject claim".to_string()))?;

        let account = self
            .repo
            .find_by_id(&account_id)
            .await?
            .ok_or_else(|| AccountsError::Token("Account no longer exists".to_string()))?;

        let account_id = account.account_id.to_string();
        let tokens = self.issuer.issue(TokenSubject {
            account_id: &account_id,
            email: account.email.as_str(),
            verified: account.verified,
        })?;

        Ok(tokens)
    }
}
