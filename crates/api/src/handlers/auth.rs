//! Handlers for registration, login, and password recovery.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use warraq_core::error::CoreError;
use warraq_db::models::user::{CreateUser, UserResponse};
use warraq_db::repositories::UserRepo;

use crate::auth::password::{
    generate_reset_token, hash_password, hash_reset_token, validate_password_strength,
    verify_password,
};
use crate::bootstrap;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Reset tokens are usable for ten minutes.
const RESET_TOKEN_TTL_MINUTES: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, serde::Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

/// POST /api/v1/auth/register
///
/// New accounts get the seeded default role. Duplicate emails surface as
/// 409 through `uq_users_email`.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AuthResponse>>)> {
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name must not be empty".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let role_id = bootstrap::default_role_id(&state.pool).await?;
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email.trim().to_lowercase(),
            name: input.name.trim().to_string(),
            provider: "local".to_string(),
            password_hash: Some(password_hash),
            role_id,
        },
    )
    .await?;

    let token = crate::auth::jwt::generate_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(AuthResponse {
            token,
            user: user.into(),
        })),
    ))
}

/// POST /api/v1/auth/login
///
/// The same vague message covers unknown emails and wrong passwords.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let invalid =
        || AppError::Core(CoreError::Unauthenticated("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, &input.email.trim().to_lowercase())
        .await?
        .ok_or_else(invalid)?;

    let hash = user.password_hash.as_deref().ok_or_else(invalid)?;
    let verified = verify_password(&input.password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !verified {
        return Err(invalid());
    }

    let token = crate::auth::jwt::generate_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    Ok(Json(DataResponse::new(AuthResponse {
        token,
        user: user.into(),
    })))
}

/// GET /api/v1/auth/me
pub async fn me(user: AuthUser) -> Json<DataResponse<UserResponse>> {
    Json(DataResponse::new(user.user.into()))
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// POST /api/v1/auth/forgot-password
///
/// Always answers 200 so the endpoint cannot be used to probe for accounts.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(input): Json<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let email = input.email.trim().to_lowercase();
    if let Some(user) = UserRepo::find_by_email(&state.pool, &email).await? {
        let (plaintext, token_hash) = generate_reset_token();
        let expires = chrono::Utc::now() + chrono::Duration::minutes(RESET_TOKEN_TTL_MINUTES);
        UserRepo::set_reset_token(&state.pool, user.id, &token_hash, expires).await?;

        let reset_url = format!("{}/reset-password?token={plaintext}", state.config.public_url);
        if let Err(err) = state.mailer.send_password_reset(&user.email, &reset_url).await {
            tracing::error!(error = %err, "Failed to send password reset mail");
        }
    }

    Ok(Json(MessageResponse::new(
        "If that email exists, a reset link has been sent",
    )))
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

/// POST /api/v1/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let user = UserRepo::find_by_reset_token(&state.pool, &hash_reset_token(&input.token))
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthenticated(
                "Invalid or expired reset token".into(),
            ))
        })?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &password_hash).await?;

    Ok(Json(MessageResponse::new("Password updated")))
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// POST /api/v1/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hash = user.user.password_hash.as_deref().ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "This account has no local password".into(),
        ))
    })?;
    let verified = verify_password(&input.current_password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !verified {
        return Err(AppError::Core(CoreError::Unauthenticated(
            "Current password is incorrect".into(),
        )));
    }

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    UserRepo::update_password(&state.pool, user.id(), &password_hash).await?;

    Ok(Json(MessageResponse::new("Password updated")))
}
