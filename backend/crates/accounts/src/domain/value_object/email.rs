//! Email address value object.
//!
//! Syntactic checks only; proof of ownership comes from the verification
//! code flow. Addresses are stored exactly as entered apart from trimming,
//! so lookups are case-sensitive.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// RFC 5321 limits
const MAX_TOTAL: usize = 254;
const MAX_LOCAL: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn new(email: impl Into<String>) -> AppResult<Self> {
        let email = email.into().trim().to_string();

        if email.is_empty() {
            return Err(AppError::bad_request("Email address is required"));
        }
        if email.len() > MAX_TOTAL {
            return Err(AppError::bad_request(format!(
                "Email address exceeds {MAX_TOTAL} characters"
            )));
        }

        let Some((local, domain)) = email.split_once('@') else {
            return Err(AppError::bad_request("Email address is not valid"));
        };

        let local_ok = !local.is_empty() && local.len() <= MAX_LOCAL;

        // A second '@' lands in the domain and fails the charset check
        let domain_ok = domain.contains('.')
            && domain
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
            && !domain.starts_with(['.', '-'])
            && !domain.ends_with(['.', '-']);

        if !local_ok || !domain_ok {
            return Err(AppError::bad_request("Email address is not valid"));
        }

        Ok(Self(email))
    }

    /// Wrap a stored value without re-validating.
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }
}

impl FromStr for Email {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
