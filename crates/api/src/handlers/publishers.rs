//! Handlers for the `/publishers` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use warraq_core::attachments::{replaced_file, OwnedAttachments};
use warraq_core::error::CoreError;
use warraq_core::permissions::{Action, Resource};
use warraq_core::types::DbId;
use warraq_db::cascade;
use warraq_db::models::publisher::{CreatePublisher, Publisher, UpdatePublisher};
use warraq_db::repositories::PublisherRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/publishers
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreatePublisher>,
) -> AppResult<(StatusCode, Json<DataResponse<Publisher>>)> {
    user.require(Resource::Publishers, Action::Create)?;
    let publisher = PublisherRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(publisher))))
}

/// GET /api/v1/publishers
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Publisher>>>> {
    let publishers = PublisherRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(publishers)))
}

/// GET /api/v1/publishers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Publisher>>> {
    let publisher = PublisherRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Publisher",
            id,
        }))?;
    Ok(Json(DataResponse::new(publisher)))
}

/// PUT /api/v1/publishers/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePublisher>,
) -> AppResult<Json<DataResponse<Publisher>>> {
    user.require(Resource::Publishers, Action::Edit)?;
    let existing = PublisherRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Publisher",
            id,
        }))?;

    let updated = PublisherRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Publisher",
            id,
        }))?;

    if let Some(file) = replaced_file(
        Publisher::FIELDS[0],
        existing.image.as_deref(),
        updated.image.as_deref(),
    ) {
        state.storage.remove(&file).await;
    }

    Ok(Json(DataResponse::new(updated)))
}

/// DELETE /api/v1/publishers/{id}
///
/// Books referencing the publisher are detached, not deleted.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    user.require(Resource::Publishers, Action::Delete)?;
    let files = cascade::delete_publisher(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Publisher",
            id,
        }))?;
    state.storage.remove_all(&files).await;
    Ok(StatusCode::NO_CONTENT)
}
