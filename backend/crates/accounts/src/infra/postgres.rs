//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;
use sqlx::PgPool;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::entity::account::Account;
use crate::domain::repository::{AccountRepository, CodeStore};
use crate::domain::value_object::{
    account_id::AccountId,
    email::Email,
    shop_name::ShopName,
    verification::{CodePurpose, VerificationCode},
};
use crate::error::{AccountsError, AccountsResult};

/// PostgreSQL unique violation code
const PG_UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AccountRepository for PgAccountRepository {
    async fn create(&self, account: &Account) -> AccountsResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                email,
                shop_name,
                password_hash,
                profile_image,
                verified,
                is_active,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.email.as_str())
        .bind(account.shop_name.as_str())
        .bind(account.password.as_phc_string())
        .bind(&account.profile_image)
        .bind(account.verified)
        .bind(account.is_active)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            // A concurrent registration lost the race on the unique email index
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(PG_UNIQUE_VIOLATION) => {
                Err(AccountsError::EmailTaken)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, account_id: &AccountId) -> AccountsResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                email,
                shop_name,
                password_hash,
                profile_image,
                verified,
                is_active,
                created_at,
                updated_at
            FROM accounts
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AccountsResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                email,
                shop_name,
                password_hash,
                profile_image,
                verified,
                is_active,
                created_at,
                updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AccountsResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update(&self, account: &Account) -> AccountsResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE accounts SET
                email = $2,
                shop_name = $3,
                password_hash = $4,
                profile_image = $5,
                verified = $6,
                is_active = $7,
                updated_at = $8
            WHERE account_id = $1
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.email.as_str())
        .bind(account.shop_name.as_str())
        .bind(account.password.as_phc_string())
        .bind(&account.profile_image)
        .bind(account.verified)
        .bind(account.is_active)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            // An email change can collide with another account's address
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(PG_UNIQUE_VIOLATION) => {
                Err(AccountsError::EmailTaken)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Database row for accounts
#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    email: String,
    shop_name: String,
    password_hash: String,
    profile_image: Option<String>,
    verified: bool,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> AccountsResult<Account> {
        let password = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AccountsError::Internal(e.to_string()))?;

        Ok(Account {
            account_id: AccountId::from_uuid(self.account_id),
            email: Email::from_db(self.email),
            shop_name: ShopName::from_db(self.shop_name),
            password,
            profile_image: self.profile_image,
            verified: self.verified,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

// ============================================================================
// Verification Code Store
// ============================================================================

/// PostgreSQL-backed verification code store
///
/// One row per (purpose, email). Inserting over an existing key replaces
/// the code and its deadline, so the most recent code is the only valid one.
#[derive(Clone)]
pub struct PgCodeStore {
    pool: PgPool,
}

impl PgCodeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CodeStore for PgCodeStore {
    async fn set(
        &self,
        purpose: CodePurpose,
        email: &Email,
        code: &VerificationCode,
        ttl: Duration,
    ) -> AccountsResult<()> {
        let expires_at = Utc::now()
            + chrono::Duration::from_std(ttl)
                .map_err(|e| AccountsError::Internal(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO verification_codes (purpose, email, code, expires_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (purpose, email)
            DO UPDATE SET code = EXCLUDED.code, expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(purpose.as_str())
        .bind(email.as_str())
        .bind(code.as_str())
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(
        &self,
        purpose: CodePurpose,
        email: &Email,
    ) -> AccountsResult<Option<VerificationCode>> {
        let code = sqlx::query_scalar::<_, String>(
            r#"
            SELECT code FROM verification_codes
            WHERE purpose = $1 AND email = $2 AND expires_at > $3
            "#,
        )
        .bind(purpose.as_str())
        .bind(email.as_str())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(code.map(VerificationCode::from_stored))
    }

    async fn delete(&self, purpose: CodePurpose, email: &Email) -> AccountsResult<()> {
        sqlx::query("DELETE FROM verification_codes WHERE purpose = $1 AND email = $2")
            .bind(purpose.as_str())
            .bind(email.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> AccountsResult<u64> {
        let deleted = sqlx::query("DELETE FROM verification_codes WHERE expires_at <= $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(codes_deleted = deleted, "Cleaned up expired verification codes");

        Ok(deleted)
    }
}
