//! Account Entity
//!
//! A seller account. The email address is the login identity; `verified`
//! flips to true once the registration code has been confirmed.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::value_object::{account_id::AccountId, email::Email, shop_name::ShopName};

/// Seller account entity
#[derive(Debug, Clone)]
pub struct Account {
    pub account_id: AccountId,
    pub email: Email,
    pub shop_name: ShopName,
    pub password: HashedPassword,
    /// Profile image URL; upload and storage happen elsewhere
    pub profile_image: Option<String>,
    pub verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new unverified, active account
    pub fn new(
        email: Email,
        shop_name: ShopName,
        password: HashedPassword,
        profile_image: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            account_id: AccountId::new(),
            email,
            shop_name,
            password,
            profile_image,
            verified: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the account's email as verified
    pub fn mark_verified(&mut self) {
        self.verified = true;
        self.updated_at = Utc::now();
    }

    /// Replace the password hash
    pub fn set_password(&mut self, password: HashedPassword) {
        self.password = password;
        self.updated_at = Utc::now();
    }

    /// Replace the shop name
    pub fn set_shop_name(&mut self, shop_name: ShopName) {
        self.shop_name = shop_name;
        self.updated_at = Utc::now();
    }

    /// Replace the login email. The verified flag is left untouched; there
    /// is no transition back to unverified.
    pub fn set_email(&mut self, email: Email) {
        self.email = email;
        self.updated_at = Utc::now();
    }

    /// Replace the profile image URL
    pub fn set_profile_image(&mut self, profile_image: Option<String>) {
        self.profile_image = profile_image;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;

    fn test_account() -> Account {
        let password = ClearTextPassword::new("Sturdy#Pass99".to_string())
            .unwrap()
            .hash(None)
            .unwrap();
        Account::new(
            Email::new("seller@example.com").unwrap(),
            ShopName::new("Vintage Corner").unwrap(),
            password,
            None,
        )
    }

    #[test]
    fn test_new_account_unverified_and_active() {
        let account = test_account();
        assert!(!account.verified);
        assert!(account.is_active);
    }

    #[test]
    fn test_mark_verified() {
        let mut account = test_account();
        account.mark_verified();
        assert!(account.verified);
        assert!(account.updated_at >= account.created_at);
    }
}
