//! Error type for the accounts crate.
//!
//! Handlers return [`AccountsError`] directly; at the HTTP boundary it is
//! logged and lowered to [`AppError`] for the problem-document rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type AccountsResult<T> = Result<T, AccountsError>;

#[derive(Debug, Error)]
pub enum AccountsError {
    /// Email already registered
    #[error("An account with this email already exists")]
    EmailTaken,

    /// Invalid credentials (unknown email or wrong password)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Email address not yet verified
    #[error("Email address is not verified")]
    EmailNotVerified,

    /// Verification code absent, mismatched, or expired
    #[error("Invalid or expired verification code")]
    InvalidOrExpiredCode,

    /// Current password does not match during password change
    #[error("Current password is incorrect")]
    CurrentPasswordIncorrect,

    /// New password and confirmation do not match
    #[error("New password and confirmation do not match")]
    PasswordMismatch,

    /// Password policy violation
    #[error("Password validation failed: {0}")]
    PasswordValidation(String),

    /// Request payload validation error
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Account not found
    #[error("Account not found")]
    AccountNotFound,

    /// Email delivery failure
    #[error("Failed to send email: {0}")]
    Mail(String),

    /// Token issuance/validation failure
    #[error("Token error: {0}")]
    Token(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountsError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountsError::EmailTaken => StatusCode::CONFLICT,
            AccountsError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AccountsError::EmailNotVerified => StatusCode::FORBIDDEN,
            AccountsError::InvalidOrExpiredCode
            | AccountsError::CurrentPasswordIncorrect
            | AccountsError::PasswordMismatch
            | AccountsError::PasswordValidation(_)
            | AccountsError::Validation(_) => StatusCode::BAD_REQUEST,
            AccountsError::AccountNotFound => StatusCode::NOT_FOUND,
            AccountsError::Token(_) => StatusCode::UNAUTHORIZED,
            AccountsError::Mail(_) | AccountsError::Database(_) | AccountsError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountsError::EmailTaken => ErrorKind::Conflict,
            AccountsError::InvalidCredentials | AccountsError::Token(_) => ErrorKind::Unauthorized,
            AccountsError::EmailNotVerified => ErrorKind::Forbidden,
            AccountsError::InvalidOrExpiredCode
            | AccountsError::CurrentPasswordIncorrect
            | AccountsError::PasswordMismatch
            | AccountsError::PasswordValidation(_)
            | AccountsError::Validation(_) => ErrorKind::BadRequest,
            AccountsError::AccountNotFound => ErrorKind::NotFound,
            AccountsError::Mail(_) | AccountsError::Database(_) | AccountsError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Server faults at error level, suspicious client input at warn.
    fn log(&self) {
        match self {
            AccountsError::Database(e) => {
                tracing::error!(error = %e, "Accounts database error");
            }
            AccountsError::Mail(msg) => {
                tracing::error!(message = %msg, "Email delivery failed");
            }
            AccountsError::Internal(msg) => {
                tracing::error!(message = %msg, "Accounts internal error");
            }
            AccountsError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AccountsError::InvalidOrExpiredCode => {
                tracing::warn!("Verification code rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Accounts error");
            }
        }
    }
}

impl IntoResponse for AccountsError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AccountsError {
    fn from(err: AppError) -> Self {
        AccountsError::Internal(err.to_string())
    }
}

impl From<platform::password::PasswordPolicyError> for AccountsError {
    fn from(err: platform::password::PasswordPolicyError) -> Self {
        AccountsError::PasswordValidation(err.to_string())
    }
}

impl From<platform::password::PasswordHashError> for AccountsError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AccountsError::Internal(err.to_string())
    }
}

impl From<platform::token::TokenError> for AccountsError {
    fn from(err: platform::token::TokenError) -> Self {
        match err {
            platform::token::TokenError::EncodingFailed(msg) => AccountsError::Internal(msg),
            _ => AccountsError::Token(err.to_string()),
        }
    }
}
