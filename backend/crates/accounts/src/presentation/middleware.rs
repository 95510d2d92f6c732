//! Auth Middleware
//!
//! Bearer-token authentication for protected routes. On success the decoded
//! account identity is stored in request extensions as `CurrentAccount`.

use axum::body::Body;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use platform::token::TokenIssuer;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::value_object::account_id::AccountId;
use crate::error::AccountsError;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub issuer: Arc<TokenIssuer>,
}

/// Authenticated account identity from a validated access token
#[derive(Debug, Clone)]
pub struct CurrentAccount {
    pub account_id: AccountId,
    pub email: String,
    pub verified: bool,
}

/// Middleware that requires a valid Bearer access token
pub async fn require_auth(
    state: AuthMiddlewareState,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let current = match authenticate(&state, &req) {
        Ok(current) => current,
        Err(e) => return Err(e.into_response()),
    };

    req.extensions_mut().insert(current);

    Ok(next.run(req).await)
}

fn authenticate(
    state: &AuthMiddlewareState,
    req: &Request<Body>,
) -> Result<CurrentAccount, AccountsError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AccountsError::Token("Missing Bearer token".to_string()))?;

    let claims = state.issuer.decode_access(token)?;

    let account_id = Uuid::parse_str(&claims.sub)
        .map(AccountId::from_uuid)
        .map_err(|_| AccountsError::Token("Malformed subject claim".to_string()))?;

    Ok(CurrentAccount {
        account_id,
        email: claims.email,
        verified: claims.verified,
    })
}
