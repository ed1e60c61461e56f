//! Handlers for the `/users` resource: administration, profile editing,
//! and ban management.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use warraq_core::attachments::{replaced_file, OwnedAttachments};
use warraq_core::error::CoreError;
use warraq_core::permissions::{Action, Resource};
use warraq_core::types::{DbId, Timestamp};
use warraq_db::models::user::{UpdateProfile, UpdateUser, User, UserResponse};
use warraq_db::repositories::UserRepo;
use warraq_db::cascade;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/v1/users
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    user.require(Resource::Users, Action::View)?;
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if user.id() != id {
        user.require(Resource::Users, Action::View)?;
    }
    let found = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse::new(found.into())))
}

/// PUT /api/v1/users/me
///
/// Self-service profile edit. Replacing the profile image removes the old
/// file after the row update has succeeded.
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let old_image = user.user.image.clone();
    let id = user.id();

    let updated = UserRepo::update_profile(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    if let Some(file) = replaced_file(
        User::FIELDS[0],
        old_image.as_deref(),
        updated.image.as_deref(),
    ) {
        state.storage.remove(&file).await;
    }

    Ok(Json(DataResponse::new(updated.into())))
}

/// PUT /api/v1/users/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    user.require(Resource::Users, Action::Edit)?;
    let updated = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse::new(updated.into())))
}

/// DELETE /api/v1/users/{id}
///
/// Full account cascade; the files owned by deleted rows are removed after
/// the transaction commits.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if user.id() != id {
        user.require(Resource::Users, Action::Delete)?;
    }
    let files = cascade::delete_user(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    state.storage.remove_all(&files).await;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct BanRequest {
    pub reason: Option<String>,
    /// Absent for a permanent ban.
    pub expire_at: Option<Timestamp>,
}

/// POST /api/v1/users/{id}/ban
pub async fn ban(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<BanRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    user.require(Resource::Users, Action::Manage)?;
    if user.id() == id {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot ban yourself".into(),
        )));
    }
    let banned = UserRepo::ban(&state.pool, id, input.reason.as_deref(), input.expire_at)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse::new(banned.into())))
}

/// POST /api/v1/users/{id}/unban
pub async fn unban(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    user.require(Resource::Users, Action::Manage)?;
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    UserRepo::clear_ban(&state.pool, id).await?;
    Ok(Json(MessageResponse::new("Ban cleared")))
}
