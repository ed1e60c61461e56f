//! Handlers for the `/slides` banner resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use warraq_core::attachments::{replaced_file, OwnedAttachments};
use warraq_core::error::CoreError;
use warraq_core::exclusive::validate_exactly_one;
use warraq_core::permissions::{Action, Resource};
use warraq_core::types::DbId;
use warraq_db::cascade;
use warraq_db::models::slide::{CreateSlide, Slide, UpdateSlide};
use warraq_db::repositories::{AuthorRepo, BookRepo, PublisherRepo, SlideRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Resolve the slide target ids that were actually provided, rejecting
/// dangling references.
async fn check_targets(
    state: &AppState,
    author_id: Option<DbId>,
    publisher_id: Option<DbId>,
    book_id: Option<DbId>,
) -> AppResult<()> {
    if let Some(id) = author_id {
        AuthorRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Author",
                id,
            }))?;
    }
    if let Some(id) = publisher_id {
        PublisherRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Publisher",
                id,
            }))?;
    }
    if let Some(id) = book_id {
        BookRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: "Book", id }))?;
    }
    Ok(())
}

/// POST /api/v1/slides
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateSlide>,
) -> AppResult<(StatusCode, Json<DataResponse<Slide>>)> {
    user.require(Resource::Slides, Action::Create)?;
    validate_exactly_one(&[
        ("author_id", input.author_id.is_some()),
        ("publisher_id", input.publisher_id.is_some()),
        ("book_id", input.book_id.is_some()),
    ])
    .map_err(AppError::Core)?;
    check_targets(&state, input.author_id, input.publisher_id, input.book_id).await?;

    let slide = SlideRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(slide))))
}

/// GET /api/v1/slides
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Slide>>>> {
    let slides = SlideRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(slides)))
}

/// GET /api/v1/slides/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Slide>>> {
    let slide = SlideRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Slide",
            id,
        }))?;
    Ok(Json(DataResponse::new(slide)))
}

/// PUT /api/v1/slides/{id}
///
/// Supplying a new target replaces the previous one whole; the repository
/// clears the other target columns in the same statement.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSlide>,
) -> AppResult<Json<DataResponse<Slide>>> {
    user.require(Resource::Slides, Action::Edit)?;
    let retarget =
        input.author_id.is_some() || input.publisher_id.is_some() || input.book_id.is_some();
    if retarget {
        validate_exactly_one(&[
            ("author_id", input.author_id.is_some()),
            ("publisher_id", input.publisher_id.is_some()),
            ("book_id", input.book_id.is_some()),
        ])
        .map_err(AppError::Core)?;
        check_targets(&state, input.author_id, input.publisher_id, input.book_id).await?;
    }

    let existing = SlideRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Slide",
            id,
        }))?;

    let updated = SlideRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Slide",
            id,
        }))?;

    if let Some(file) = replaced_file(Slide::FIELDS[0], Some(&existing.image), Some(&updated.image))
    {
        state.storage.remove(&file).await;
    }

    Ok(Json(DataResponse::new(updated)))
}

/// DELETE /api/v1/slides/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    user.require(Resource::Slides, Action::Delete)?;
    let files = cascade::delete_slide(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Slide",
            id,
        }))?;
    state.storage.remove_all(&files).await;
    Ok(StatusCode::NO_CONTENT)
}
