//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use platform::token::TokenIssuer;
use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::application::{
    ConfirmPasswordResetInput, ConfirmPasswordResetUseCase, ContactSupportInput,
    ContactSupportUseCase, LoginInput, LoginUseCase, RefreshTokenInput, RefreshTokenUseCase,
    RegisterInput, RegisterUseCase, RequestPasswordResetInput, RequestPasswordResetUseCase,
    UpdateProfileInput, UpdateProfileUseCase, VerifyEmailInput, VerifyEmailUseCase,
};
use crate::domain::repository::{AccountRepository, CodeStore, Mailer};
use crate::error::{AccountsError, AccountsResult};
use crate::presentation::dto::{
    ConfirmPasswordResetRequest, ContactSupportRequest, LoginRequest, LoginResponse,
    MessageResponse, ProfileResponse, RefreshTokenRequest, RegisterRequest, RegisterResponse,
    RequestPasswordResetRequest, TokenResponse, UpdateProfileRequest, VerifyEmailRequest,
};
use crate::presentation::middleware::CurrentAccount;

/// Shared state for accounts handlers
#[derive(Clone)]
pub struct AccountsAppState<R, C, M>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
    C: CodeStore + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub codes: Arc<C>,
    pub mailer: Arc<M>,
    pub issuer: Arc<TokenIssuer>,
    pub config: Arc<AccountsConfig>,
}

// ============================================================================
// Registration and Verification
// ============================================================================

/// POST /api/accounts/register
pub async fn register<R, C, M>(
    State(state): State<AccountsAppState<R, C, M>>,
    Json(req): Json<RegisterRequest>,
) -> AccountsResult<(StatusCode, Json<RegisterResponse>)>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
    C: CodeStore + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.codes.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(RegisterInput {
            email: req.email,
            shop_name: req.shop_name,
            password: req.password,
            profile_image: req.profile_image,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            detail: "Verification code sent".to_string(),
            email: output.email,
        }),
    ))
}

/// POST /api/accounts/verify-email
pub async fn verify_email<R, C, M>(
    State(state): State<AccountsAppState<R, C, M>>,
    Json(req): Json<VerifyEmailRequest>,
) -> AccountsResult<Json<MessageResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
    C: CodeStore + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = VerifyEmailUseCase::new(state.repo.clone(), state.codes.clone());

    use_case
        .execute(VerifyEmailInput {
            email: req.email,
            code: req.code,
        })
        .await?;

    Ok(Json(MessageResponse {
        message: "Email verified".to_string(),
    }))
}

// ============================================================================
// Login and Tokens
// ============================================================================

/// POST /api/accounts/login
pub async fn login<R, C, M>(
    State(state): State<AccountsAppState<R, C, M>>,
    Json(req): Json<LoginRequest>,
) -> AccountsResult<Json<LoginResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
    C: CodeStore + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.issuer.clone(),
        state.config.password_pepper.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        user: ProfileResponse {
            account_id: output.account_id,
            email: output.email,
            shop_name: output.shop_name,
            profile_image: output.profile_image,
            verified: output.verified,
        },
        tokens: TokenResponse {
            access_token: output.tokens.access_token,
            refresh_token: output.tokens.refresh_token,
            expires_in: output.tokens.expires_in,
            token_type: output.tokens.token_type,
        },
    }))
}

/// POST /api/accounts/token/refresh
pub async fn refresh_token<R, C, M>(
    State(state): State<AccountsAppState<R, C, M>>,
    Json(req): Json<RefreshTokenRequest>,
) -> AccountsResult<Json<TokenResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
    C: CodeStore + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = RefreshTokenUseCase::new(state.repo.clone(), state.issuer.clone());

    let tokens = use_case
        .execute(RefreshTokenInput {
            refresh_token: req.refresh_token,
        })
        .await?;

    Ok(Json(TokenResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: tokens.expires_in,
        token_type: tokens.token_type,
    }))
}

// ============================================================================
// Password Reset
// ============================================================================

/// POST /api/accounts/password-reset/request
pub async fn request_password_reset<R, C, M>(
    State(state): State<AccountsAppState<R, C, M>>,
    Json(req): Json<RequestPasswordResetRequest>,
) -> AccountsResult<Json<MessageResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
    C: CodeStore + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = RequestPasswordResetUseCase::new(
        state.repo.clone(),
        state.codes.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    use_case
        .execute(RequestPasswordResetInput { email: req.email })
        .await?;

    // Same body whether or not the address is registered
    Ok(Json(MessageResponse {
        message: "If the address is registered, a reset code has been sent".to_string(),
    }))
}

/// POST /api/accounts/password-reset/confirm
pub async fn confirm_password_reset<R, C, M>(
    State(state): State<AccountsAppState<R, C, M>>,
    Json(req): Json<ConfirmPasswordResetRequest>,
) -> AccountsResult<Json<MessageResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
    C: CodeStore + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = ConfirmPasswordResetUseCase::new(
        state.repo.clone(),
        state.codes.clone(),
        state.config.clone(),
    );

    use_case
        .execute(ConfirmPasswordResetInput {
            email: req.email,
            code: req.code,
            new_password: req.new_password,
        })
        .await?;

    Ok(Json(MessageResponse {
        message: "Password updated".to_string(),
    }))
}

// ============================================================================
// Profile
// ============================================================================

/// GET /api/accounts/profile
pub async fn get_profile<R, C, M>(
    State(state): State<AccountsAppState<R, C, M>>,
    Extension(current): Extension<CurrentAccount>,
) -> AccountsResult<Json<ProfileResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
    C: CodeStore + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let account = state
        .repo
        .find_by_id(&current.account_id)
        .await?
        .ok_or(AccountsError::AccountNotFound)?;

    Ok(Json(ProfileResponse {
        account_id: account.account_id.to_string(),
        email: account.email.to_string(),
        shop_name: account.shop_name.to_string(),
        profile_image: account.profile_image,
        verified: account.verified,
    }))
}

/// PUT /api/accounts/profile
pub async fn update_profile<R, C, M>(
    State(state): State<AccountsAppState<R, C, M>>,
    Extension(current): Extension<CurrentAccount>,
    Json(req): Json<UpdateProfileRequest>,
) -> AccountsResult<Json<ProfileResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
    C: CodeStore + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = UpdateProfileUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(UpdateProfileInput {
            account_id: current.account_id,
            shop_name: req.shop_name,
            email: req.email,
            profile_image: req.profile_image,
            current_password: req.current_password,
            new_password: req.new_password,
            confirm_password: req.confirm_password,
        })
        .await?;

    Ok(Json(ProfileResponse {
        account_id: output.account_id,
        email: output.email,
        shop_name: output.shop_name,
        profile_image: output.profile_image,
        verified: output.verified,
    }))
}

// ============================================================================
// Support
// ============================================================================

/// POST /api/accounts/support
///
/// Public; sender identity is whatever the caller supplies.
pub async fn contact_support<R, C, M>(
    State(state): State<AccountsAppState<R, C, M>>,
    Json(req): Json<ContactSupportRequest>,
) -> AccountsResult<Json<MessageResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
    C: CodeStore + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = ContactSupportUseCase::new(state.mailer.clone(), state.config.clone());

    use_case
        .execute(ContactSupportInput {
            name: req.name,
            phone: req.phone,
            message: req.message,
        })
        .await?;

    Ok(Json(MessageResponse {
        message: "Message sent".to_string(),
    }))
}
