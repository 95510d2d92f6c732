//! Error classification.
//!
//! [`ErrorKind`] is the machine-checkable category every error carries.
//! Handlers never pick raw status codes; they pick a kind and the kind
//! decides the wire status.

use serde::Serialize;

/// Stable error category, one per HTTP status the API can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Malformed or invalid request (400)
    BadRequest,
    /// Authentication missing or failed (401)
    Unauthorized,
    /// Authenticated but not allowed (403)
    Forbidden,
    /// Resource does not exist (404)
    NotFound,
    /// Request conflicts with current state, e.g. a duplicate email (409)
    Conflict,
    /// Unexpected server-side failure (500)
    InternalServerError,
    /// A backing service is down or exhausted (503)
    ServiceUnavailable,
}

impl ErrorKind {
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::InternalServerError => 500,
            ErrorKind::ServiceUnavailable => 503,
        }
    }

    /// Reason phrase used as the problem title.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::InternalServerError => "Internal Server Error",
            ErrorKind::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// 5xx kinds. These get logged with their source attached.
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
