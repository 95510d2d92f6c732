//! Error type for the catalog crate, mirroring the accounts crate's
//! log-then-lower pattern at the HTTP boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Product does not exist, or belongs to another seller
    #[error("Product not found")]
    ProductNotFound,

    /// Reel does not exist
    #[error("Reel not found")]
    ReelNotFound,

    /// No rating by this buyer on the product
    #[error("Rating not found")]
    RatingNotFound,

    /// Comment does not exist, or belongs to another account
    #[error("Comment not found")]
    CommentNotFound,

    /// Action requires a verified seller account
    #[error("Account is not permitted to perform this action")]
    PermissionDenied,

    /// Request payload validation error
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::ProductNotFound
            | CatalogError::ReelNotFound
            | CatalogError::RatingNotFound
            | CatalogError::CommentNotFound => StatusCode::NOT_FOUND,
            CatalogError::PermissionDenied => StatusCode::FORBIDDEN,
            CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::ProductNotFound
            | CatalogError::ReelNotFound
            | CatalogError::RatingNotFound
            | CatalogError::CommentNotFound => ErrorKind::NotFound,
            CatalogError::PermissionDenied => ErrorKind::Forbidden,
            CatalogError::Validation(_) => ErrorKind::BadRequest,
            CatalogError::Database(_) | CatalogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for CatalogError {
    fn from(err: AppError) -> Self {
        CatalogError::Internal(err.to_string())
    }
}
