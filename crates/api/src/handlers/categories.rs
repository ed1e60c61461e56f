//! Handlers for the `/categories` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use warraq_core::attachments::{replaced_file, OwnedAttachments};
use warraq_core::error::CoreError;
use warraq_core::permissions::{Action, Resource};
use warraq_core::types::DbId;
use warraq_db::cascade;
use warraq_db::models::category::{
    Category, CategoryWithBookCount, CreateCategory, UpdateCategory,
};
use warraq_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/categories
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<Category>>)> {
    user.require(Resource::Categories, Action::Create)?;
    let category = CategoryRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(category))))
}

/// GET /api/v1/categories
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(categories)))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Category>>> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(DataResponse::new(category)))
}

/// PUT /api/v1/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<DataResponse<Category>>> {
    user.require(Resource::Categories, Action::Edit)?;
    let existing = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    let updated = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    if let Some(file) = replaced_file(
        Category::FIELDS[0],
        existing.image.as_deref(),
        updated.image.as_deref(),
    ) {
        state.storage.remove(&file).await;
    }

    Ok(Json(DataResponse::new(updated)))
}

/// DELETE /api/v1/categories/{id}
///
/// Books referencing the category are detached; user interests in the
/// category are removed.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    user.require(Resource::Categories, Action::Delete)?;
    let files = cascade::delete_category(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    state.storage.remove_all(&files).await;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    pub limit: Option<i64>,
}

/// GET /api/v1/categories/top
pub async fn top(
    State(state): State<AppState>,
    Query(query): Query<TopQuery>,
) -> AppResult<Json<DataResponse<Vec<CategoryWithBookCount>>>> {
    let limit = query.limit.unwrap_or(5).clamp(1, 50);
    let categories = CategoryRepo::top_by_book_count(&state.pool, limit).await?;
    Ok(Json(DataResponse::new(categories)))
}
