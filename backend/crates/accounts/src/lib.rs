//! Seller accounts: registration, email verification, login, password
//! reset, profile management, and support contact.
//!
//! Layered like the rest of the workspace: `domain` holds entities, value
//! objects, and the repository/mailer traits; `application` holds one use
//! case per file; `infra` provides the Postgres and SMTP implementations;
//! `presentation` is the axum surface.
//!
//! Security posture worth knowing about up front: passwords are Argon2id
//! PHC strings, one-time codes expire and burn on first use, and a failed
//! login never reveals whether the email exists.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use application::config::AccountsConfig;
pub use error::{AccountsError, AccountsResult};
pub use infra::postgres::{PgAccountRepository, PgCodeStore};
pub use infra::smtp::{LogMailer, SmtpMailer};
pub use presentation::router::{accounts_router, accounts_router_generic};

pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
