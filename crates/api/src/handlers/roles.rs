//! Handlers for the `/roles` resource.
//!
//! The seeded `SuperAdmin` and `User` roles are immutable: edits and
//! deletes against them are refused, not ignored.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use warraq_core::error::CoreError;
use warraq_core::permissions::{Action, Resource};
use warraq_core::types::DbId;
use warraq_db::models::role::{CreateRole, Role, UpdateRole};
use warraq_db::repositories::RoleRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/roles
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateRole>,
) -> AppResult<(StatusCode, Json<DataResponse<Role>>)> {
    user.require(Resource::RolesPermissions, Action::Create)?;
    let role = RoleRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(role))))
}

/// GET /api/v1/roles
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Role>>>> {
    user.require(Resource::RolesPermissions, Action::View)?;
    let roles = RoleRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(roles)))
}

/// GET /api/v1/roles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Role>>> {
    user.require(Resource::RolesPermissions, Action::View)?;
    let role = RoleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Role", id }))?;
    Ok(Json(DataResponse::new(role)))
}

/// PUT /api/v1/roles/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRole>,
) -> AppResult<Json<DataResponse<Role>>> {
    user.require(Resource::RolesPermissions, Action::Edit)?;
    let existing = RoleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Role", id }))?;
    if existing.immutable {
        return Err(AppError::Core(CoreError::Forbidden(
            "Built-in roles cannot be modified".into(),
        )));
    }
    let role = RoleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Role", id }))?;
    Ok(Json(DataResponse::new(role)))
}

/// DELETE /api/v1/roles/{id}
///
/// Users holding the role keep their `role_id`; the dangling reference
/// denies everything until an admin reassigns them.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    user.require(Resource::RolesPermissions, Action::Delete)?;
    let existing = RoleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Role", id }))?;
    if existing.immutable {
        return Err(AppError::Core(CoreError::Forbidden(
            "Built-in roles cannot be deleted".into(),
        )));
    }
    RoleRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
