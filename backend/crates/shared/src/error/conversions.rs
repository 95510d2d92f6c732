//! Boundary conversions for [`AppError`].
//!
//! The sqlx mapping and the axum response rendering live behind features so
//! domain crates that want neither do not pull the dependencies in.

use super::app_error::AppError;

/// Maps database failures onto the taxonomy. Constraint violations are the
/// caller's fault (conflict or bad request); connectivity problems are ours.
#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let mapped = match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found"),
            sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
                AppError::service_unavailable("Database unavailable")
            }
            sqlx::Error::Database(db) => match db.code().as_deref() {
                // unique_violation, foreign_key_violation
                Some("23505") => AppError::conflict("Duplicate key value"),
                Some("23503") => AppError::conflict("Referenced record does not exist"),
                // not_null_violation, check_violation
                Some("23502") => AppError::bad_request("Required field is null"),
                Some("23514") => AppError::bad_request("Check constraint violated"),
                _ => AppError::internal("Database error"),
            },
            _ => AppError::internal("Database error"),
        };
        mapped.with_source(err)
    }
}

/// Renders the error as an RFC 7807 problem document.
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(all(test, feature = "sqlx"))]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;

    #[test]
    fn row_not_found_becomes_404() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn pool_timeout_becomes_503() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
    }
}
