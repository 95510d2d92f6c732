//! Verification Code Value Objects
//!
//! One-time numeric codes emailed to sellers for registration confirmation
//! and password reset. Codes are keyed by (purpose, email), short-lived,
//! and compared in constant time.

use platform::crypto::{constant_time_eq, generate_numeric_code};
use serde::{Deserialize, Serialize};

/// What a verification code authorizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodePurpose {
    /// Confirm ownership of the email used at registration
    Registration,
    /// Authorize a password reset
    PasswordReset,
}

impl CodePurpose {
    /// Stable string form used as part of the storage key
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::Registration => "registration",
            CodePurpose::PasswordReset => "password-reset",
        }
    }
}

impl std::fmt::Display for CodePurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A generated verification code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Generate a fresh numeric code of the given length
    pub fn generate(length: usize) -> Self {
        Self(generate_numeric_code(length))
    }

    /// Wrap a stored code value
    pub fn from_stored(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Constant-time comparison against a submitted code
    pub fn matches(&self, submitted: &str) -> bool {
        constant_time_eq(self.0.as_bytes(), submitted.as_bytes())
    }

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_length() {
        let code = VerificationCode::generate(6);
        assert_eq!(code.as_str().len(), 6);
        assert!(code.as_str().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_matches() {
        let code = VerificationCode::from_stored("123456");
        assert!(code.matches("123456"));
        assert!(!code.matches("123457"));
        assert!(!code.matches("12345"));
        assert!(!code.matches(""));
    }

    #[test]
    fn test_purpose_as_str() {
        assert_eq!(CodePurpose::Registration.as_str(), "registration");
        assert_eq!(CodePurpose::PasswordReset.as_str(), "password-reset");
    }
}
