//! Update Profile Use Case
//!
//! Partial update of shop name, email, profile image, and password. A
//! password change requires the full triple (current, new, confirmation);
//! supplying only part of it is a validation error naming the missing
//! fields. Changing the email does not reset the verified flag. All
//! changes land in one repository update.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AccountsConfig;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{account_id::AccountId, email::Email, shop_name::ShopName};
use crate::error::{AccountsError, AccountsResult};

/// Update profile input
pub struct UpdateProfileInput {
    pub account_id: AccountId,
    pub shop_name: Option<String>,
    pub email: Option<String>,
    pub profile_image: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Updated account view
#[derive(Debug)]
pub struct UpdateProfileOutput {
    pub account_id: String,
    pub email: String,
    pub shop_name: String,
    pub profile_image: Option<String>,
    pub verified: bool,
}

/// Update profile use case
pub struct UpdateProfileUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AccountsConfig>,
}

impl<R> UpdateProfileUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountsConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: UpdateProfileInput) -> AccountsResult<UpdateProfileOutput> {
        let password_change = Self::password_triple(&input)?;

        let mut account = self
            .repo
            .find_by_id(&input.account_id)
            .await?
            .ok_or(AccountsError::AccountNotFound)?;

        if let Some((current, new, confirm)) = password_change {
            let submitted = ClearTextPassword::for_verification(current);
            if !account.password.verify(&submitted, self.config.pepper()) {
                return Err(AccountsError::CurrentPasswordIncorrect);
            }

            if new != confirm {
                return Err(AccountsError::PasswordMismatch);
            }

            let new_password = ClearTextPassword::new(new)?;
            let password_hash = new_password.hash(self.config.pepper())?;
            account.set_password(password_hash);
        }

        if let Some(shop_name) = input.shop_name {
            let shop_name =
                ShopName::new(shop_name).map_err(|e| AccountsError::Validation(e.to_string()))?;
            account.set_shop_name(shop_name);
        }

        if let Some(email) = input.email {
            let email = Email::new(email).map_err(|e| AccountsError::Validation(e.to_string()))?;
            if email.as_str() != account.email.as_str() {
                if self.repo.exists_by_email(&email).await? {
                    return Err(AccountsError::EmailTaken);
                }
                account.set_email(email);
            }
        }

        if let Some(profile_image) = input.profile_image {
            account.set_profile_image(Some(profile_image));
        }

        // The unique email index maps a concurrent claim to EmailTaken
        self.repo.update(&account).await?;

        tracing::info!(account_id = %account.account_id, "Profile updated");

        Ok(UpdateProfileOutput {
            account_id: account.account_id.to_string(),
            email: account.email.to_string(),
            shop_name: account.shop_name.to_string(),
            profile_image: account.profile_image,
            verified: account.verified,
        })
    }

    /// Extract the password triple, requiring all-or-none of its fields
    fn password_triple(
        input: &UpdateProfileInput,
    ) -> AccountsResult<Option<(String, String, String)>> {
        match (
            &input.current_password,
            &input.new_password,
            &input.confirm_password,
        ) {
            (None, None, None) => Ok(None),
            (Some(current), Some(new), Some(confirm)) => {
                Ok(Some((current.clone(), new.clone(), confirm.clone())))
            }
            (current, new, confirm) => {
                let mut missing = Vec::new();
                if current.is_none() {
                    missing.push("current_password");
                }
                if new.is_none() {
                    missing.push("new_password");
                }
                if confirm.is_none() {
                    missing.push("confirm_password");
                }
                Err(AccountsError::Validation(format!(
                    "Password change requires all of current_password, new_password, \
                     confirm_password; missing: {}",
                    missing.join(", ")
                )))
            }
        }
    }
}
