//! Accounts Router

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use platform::token::TokenIssuer;
use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::domain::repository::{AccountRepository, CodeStore, Mailer};
use crate::infra::postgres::{PgAccountRepository, PgCodeStore};
use crate::infra::smtp::SmtpMailer;
use crate::presentation::handlers::{self, AccountsAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_auth};

/// Create the accounts router with PostgreSQL repositories and SMTP mail
pub fn accounts_router(
    repo: PgAccountRepository,
    codes: PgCodeStore,
    mailer: SmtpMailer,
    issuer: TokenIssuer,
    config: AccountsConfig,
) -> Router {
    accounts_router_generic(repo, codes, mailer, issuer, config)
}

/// Create a generic accounts router for any implementations
pub fn accounts_router_generic<R, C, M>(
    repo: R,
    codes: C,
    mailer: M,
    issuer: TokenIssuer,
    config: AccountsConfig,
) -> Router
where
    R: AccountRepository + Clone + Send + Sync + 'static,
    C: CodeStore + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let issuer = Arc::new(issuer);
    let state = AccountsAppState {
        repo: Arc::new(repo),
        codes: Arc::new(codes),
        mailer: Arc::new(mailer),
        issuer: issuer.clone(),
        config: Arc::new(config),
    };

    let auth_state = AuthMiddlewareState { issuer };

    // /settings serves the same profile resource under its legacy path
    let protected = Router::new()
        .route(
            "/profile",
            get(handlers::get_profile::<R, C, M>).put(handlers::update_profile::<R, C, M>),
        )
        .route(
            "/settings",
            get(handlers::get_profile::<R, C, M>).put(handlers::update_profile::<R, C, M>),
        )
        .layer(axum_middleware::from_fn(move |req, next| {
            require_auth(auth_state.clone(), req, next)
        }));

    Router::new()
        .route("/register", post(handlers::register::<R, C, M>))
        .route("/verify-email", post(handlers::verify_email::<R, C, M>))
        .route("/login", post(handlers::login::<R, C, M>))
        .route("/token/refresh", post(handlers::refresh_token::<R, C, M>))
        .route(
            "/password-reset/request",
            post(handlers::request_password_reset::<R, C, M>),
        )
        .route(
            "/password-reset/confirm",
            post(handlers::confirm_password_reset::<R, C, M>),
        )
        .route("/support", post(handlers::contact_support::<R, C, M>))
        .merge(protected)
        .with_state(state)
}
