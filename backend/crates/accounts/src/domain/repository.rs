//! Repository Traits
//!
//! Interfaces for data persistence and outbound mail.
//! Implementations live in the infrastructure layer.

use std::time::Duration;

use crate::domain::entity::account::Account;
use crate::domain::value_object::{
    account_id::AccountId, email::Email, verification::CodePurpose,
    verification::VerificationCode,
};
use crate::error::AccountsResult;

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Create a new account
    async fn create(&self, account: &Account) -> AccountsResult<()>;

    /// Find account by ID
    async fn find_by_id(&self, account_id: &AccountId) -> AccountsResult<Option<Account>>;

    /// Find account by email
    async fn find_by_email(&self, email: &Email) -> AccountsResult<Option<Account>>;

    /// Check if an email is already registered
    async fn exists_by_email(&self, email: &Email) -> AccountsResult<bool>;

    /// Update account (single statement, all mutable fields)
    async fn update(&self, account: &Account) -> AccountsResult<()>;
}

/// Verification code store trait
///
/// Codes are keyed by (purpose, email). `set` overwrites any existing code
/// for the same key, so the newest code always wins. Expired codes behave
/// as absent.
#[trait_variant::make(CodeStore: Send)]
pub trait LocalCodeStore {
    /// Store a code with the given time-to-live, replacing any prior code
    async fn set(
        &self,
        purpose: CodePurpose,
        email: &Email,
        code: &VerificationCode,
        ttl: Duration,
    ) -> AccountsResult<()>;

    /// Fetch the unexpired code for a key, if any
    async fn get(
        &self,
        purpose: CodePurpose,
        email: &Email,
    ) -> AccountsResult<Option<VerificationCode>>;

    /// Remove the code for a key (single use)
    async fn delete(&self, purpose: CodePurpose, email: &Email) -> AccountsResult<()>;

    /// Purge expired codes, returning how many were removed
    async fn cleanup_expired(&self) -> AccountsResult<u64>;
}

/// Outbound mail trait
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    /// Send a plain-text email
    async fn send(&self, to: &str, subject: &str, body: &str) -> AccountsResult<()>;
}
