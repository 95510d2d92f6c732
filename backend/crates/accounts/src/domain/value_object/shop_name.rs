//! Shop Name Value Object

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Maximum shop name length
const SHOP_NAME_MAX_LENGTH: usize = 100;

/// Seller's shop display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopName(String);

impl ShopName {
    /// Create a new shop name with validation
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        let name = name.into().trim().to_string();

        if name.is_empty() {
            return Err(AppError::bad_request("Shop name cannot be empty"));
        }

        if name.chars().count() > SHOP_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Shop name must be at most {} characters",
                SHOP_NAME_MAX_LENGTH
            )));
        }

        if name.chars().any(|c| c.is_control()) {
            return Err(AppError::bad_request(
                "Shop name contains invalid characters",
            ));
        }

        Ok(Self(name))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the shop name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to string for database storage
    pub fn into_db(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ShopName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ShopName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shop_name_valid() {
        assert!(ShopName::new("Vintage Corner").is_ok());
        assert!(ShopName::new("  padded  ").is_ok());
    }

    #[test]
    fn test_shop_name_invalid() {
        assert!(ShopName::new("").is_err());
        assert!(ShopName::new("   ").is_err());
        assert!(ShopName::new("a".repeat(SHOP_NAME_MAX_LENGTH + 1)).is_err());
        assert!(ShopName::new("bad\u{0000}name").is_err());
    }

    #[test]
    fn test_shop_name_trimmed() {
        let name = ShopName::new("  Vintage Corner  ").unwrap();
        assert_eq!(name.as_str(), "Vintage Corner");
    }
}
