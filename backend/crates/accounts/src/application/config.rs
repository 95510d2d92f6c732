//! Application Configuration
//!
//! Configuration for the Accounts application layer.

use std::time::Duration;

/// Accounts application configuration
#[derive(Debug, Clone)]
pub struct AccountsConfig {
    /// Number of digits in verification codes
    pub code_length: usize,
    /// How long a verification code stays valid
    pub code_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Address support requests are relayed to
    pub support_email: String,
    /// From address on outbound mail
    pub mail_from: String,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            code_ttl: Duration::from_secs(15 * 60), // 15 minutes
            password_pepper: None,
            support_email: "support@marketplace.example".to_string(),
            mail_from: "no-reply@marketplace.example".to_string(),
        }
    }
}

impl AccountsConfig {
    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Code TTL in whole minutes, for use in email copy
    pub fn code_ttl_minutes(&self) -> u64 {
        self.code_ttl.as_secs() / 60
    }
}
