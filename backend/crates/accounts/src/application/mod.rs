//! Application Layer
//!
//! Use cases orchestrating domain logic over the repository traits.

pub mod config;
pub mod confirm_password_reset;
pub mod contact_support;
pub mod login;
pub mod refresh_token;
pub mod register;
pub mod request_password_reset;
pub mod update_profile;
pub mod verify_email;

pub use confirm_password_reset::{ConfirmPasswordResetInput, ConfirmPasswordResetUseCase};
pub use contact_support::{ContactSupportInput, ContactSupportUseCase};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use refresh_token::{RefreshTokenInput, RefreshTokenUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use request_password_reset::{RequestPasswordResetInput, RequestPasswordResetUseCase};
pub use update_profile::{UpdateProfileInput, UpdateProfileOutput, UpdateProfileUseCase};
pub use verify_email::{VerifyEmailInput, VerifyEmailUseCase};
