//! Handlers for the `/authors` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use warraq_core::attachments::{replaced_file, OwnedAttachments};
use warraq_core::error::CoreError;
use warraq_core::permissions::{Action, Resource};
use warraq_core::types::DbId;
use warraq_db::cascade;
use warraq_db::models::author::{Author, CreateAuthor, UpdateAuthor};
use warraq_db::models::book::BookSales;
use warraq_db::repositories::AuthorRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/authors
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateAuthor>,
) -> AppResult<(StatusCode, Json<DataResponse<Author>>)> {
    user.require(Resource::Authors, Action::Create)?;
    let author = AuthorRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(author))))
}

/// GET /api/v1/authors
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Author>>>> {
    let authors = AuthorRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(authors)))
}

/// GET /api/v1/authors/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Author>>> {
    let author = AuthorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Author",
            id,
        }))?;
    Ok(Json(DataResponse::new(author)))
}

/// PUT /api/v1/authors/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAuthor>,
) -> AppResult<Json<DataResponse<Author>>> {
    user.require(Resource::Authors, Action::Edit)?;
    let existing = AuthorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Author",
            id,
        }))?;

    let updated = AuthorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Author",
            id,
        }))?;

    if let Some(file) = replaced_file(
        Author::FIELDS[0],
        existing.image.as_deref(),
        updated.image.as_deref(),
    ) {
        state.storage.remove(&file).await;
    }

    Ok(Json(DataResponse::new(updated)))
}

/// DELETE /api/v1/authors/{id}
///
/// Books referencing the author are detached, not deleted.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    user.require(Resource::Authors, Action::Delete)?;
    let files = cascade::delete_author(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Author",
            id,
        }))?;
    state.storage.remove_all(&files).await;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/authors/{id}/sales
pub async fn sales(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<BookSales>>>> {
    user.require(Resource::Authors, Action::Manage)?;
    AuthorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Author",
            id,
        }))?;
    let sales = AuthorRepo::sales(&state.pool, id).await?;
    Ok(Json(DataResponse::new(sales)))
}
