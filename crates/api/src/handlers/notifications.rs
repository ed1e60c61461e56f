//! Handlers for the `/notifications` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use warraq_core::attachments::{replaced_file, OwnedAttachments};
use warraq_core::error::CoreError;
use warraq_core::exclusive::validate_exactly_one;
use warraq_core::permissions::{Action, Resource};
use warraq_core::types::DbId;
use warraq_db::cascade;
use warraq_db::models::notification::{CreateNotification, Notification, UpdateNotification};
use warraq_db::repositories::{NotificationRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/notifications
///
/// A notification targets everyone or exactly one user, never both.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateNotification>,
) -> AppResult<(StatusCode, Json<DataResponse<Notification>>)> {
    user.require(Resource::Notifications, Action::Create)?;
    validate_exactly_one(&[
        ("to_all", input.to_all),
        ("to_one", input.to_one.is_some()),
    ])
    .map_err(AppError::Core)?;
    if input.end_at < input.begin_at {
        return Err(AppError::Core(CoreError::Validation(
            "Window end must not precede its begin".into(),
        )));
    }
    if let Some(target) = input.to_one {
        UserRepo::find_by_id(&state.pool, target)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "User",
                id: target,
            }))?;
    }

    let notification = NotificationRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(notification))))
}

/// GET /api/v1/notifications
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    user.require(Resource::Notifications, Action::View)?;
    let notifications = NotificationRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(notifications)))
}

/// GET /api/v1/notifications/me
///
/// Active notifications inside their window addressed to everyone or to the
/// caller.
pub async fn mine(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let notifications = NotificationRepo::list_active_for_user(&state.pool, user.id()).await?;
    Ok(Json(DataResponse::new(notifications)))
}

/// PUT /api/v1/notifications/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNotification>,
) -> AppResult<Json<DataResponse<Notification>>> {
    user.require(Resource::Notifications, Action::Edit)?;
    let retarget = input.to_all.is_some() || input.to_one.is_some();
    if retarget {
        validate_exactly_one(&[
            ("to_all", input.to_all.unwrap_or(false)),
            ("to_one", input.to_one.is_some()),
        ])
        .map_err(AppError::Core)?;
        if let Some(target) = input.to_one {
            UserRepo::find_by_id(&state.pool, target)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "User",
                    id: target,
                }))?;
        }
    }

    let existing = NotificationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }))?;

    let updated = NotificationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }))?;

    if let Some(file) = replaced_file(
        Notification::FIELDS[0],
        existing.image.as_deref(),
        updated.image.as_deref(),
    ) {
        state.storage.remove(&file).await;
    }

    Ok(Json(DataResponse::new(updated)))
}

/// DELETE /api/v1/notifications/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    user.require(Resource::Notifications, Action::Delete)?;
    let files = cascade::delete_notification(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }))?;
    state.storage.remove_all(&files).await;
    Ok(StatusCode::NO_CONTENT)
}
