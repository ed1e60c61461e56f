//! Handlers for the public `/books` resource.
//!
//! Educational books live in the same table but are served by their own
//! handler module; everything here pins `is_educational = false`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use warraq_core::attachments::{replaced_file, OwnedAttachments};
use warraq_core::error::CoreError;
use warraq_core::permissions::{Action, Resource};
use warraq_core::types::DbId;
use warraq_db::cascade;
use warraq_db::models::book::{Book, CreateBook, UpdateBook};
use warraq_db::repositories::{BookRepo, BookUserRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// POST /api/v1/books
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut input): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<DataResponse<Book>>)> {
    user.require(Resource::PublicBooks, Action::Create)?;
    input.is_educational = Some(false);
    let book = BookRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(book))))
}

/// GET /api/v1/books
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Book>>>> {
    let books = BookRepo::list(&state.pool, false).await?;
    Ok(Json(DataResponse::new(books)))
}

/// GET /api/v1/books/{id}
///
/// Public detail view. Only active books are visible here, and each hit
/// bumps the view counter.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Book>>> {
    let book = BookRepo::find_active(&state.pool, id, false)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Book", id }))?;
    BookRepo::increment_views(&state.pool, id).await?;
    Ok(Json(DataResponse::new(book)))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// GET /api/v1/books/search?q=term
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<DataResponse<Vec<Book>>>> {
    let books = BookRepo::search(&state.pool, false, query.q.trim()).await?;
    Ok(Json(DataResponse::new(books)))
}

/// GET /api/v1/books/me
pub async fn mine(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Book>>>> {
    let books = BookRepo::list_owned(&state.pool, user.id()).await?;
    Ok(Json(DataResponse::new(books)))
}

/// PUT /api/v1/books/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBook>,
) -> AppResult<Json<DataResponse<Book>>> {
    user.require(Resource::PublicBooks, Action::Edit)?;
    let existing = BookRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Book", id }))?;

    let updated = BookRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Book", id }))?;

    // Book::FIELDS is [pdf, image]; both are NOT NULL columns.
    if let Some(file) = replaced_file(Book::FIELDS[0], Some(&existing.pdf), Some(&updated.pdf)) {
        state.storage.remove(&file).await;
    }
    if let Some(file) = replaced_file(Book::FIELDS[1], Some(&existing.image), Some(&updated.image))
    {
        state.storage.remove(&file).await;
    }

    Ok(Json(DataResponse::new(updated)))
}

/// DELETE /api/v1/books/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    user.require(Resource::PublicBooks, Action::Delete)?;
    let files = cascade::delete_book(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Book", id }))?;
    state.storage.remove_all(&files).await;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct GiftRequest {
    pub recipient_id: DbId,
}

/// POST /api/v1/books/{id}/gift
///
/// Moves the giver's own grant to the recipient. A recipient who already
/// owns the book trips `uq_book_users_user_book` and the gift fails whole.
pub async fn gift(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<GiftRequest>,
) -> AppResult<Json<MessageResponse>> {
    if input.recipient_id == user.id() {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot gift a book to yourself".into(),
        )));
    }
    UserRepo::find_by_id(&state.pool, input.recipient_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.recipient_id,
        }))?;

    let grant = BookUserRepo::find(&state.pool, user.id(), id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden("You do not own this book".into()))
        })?;

    BookUserRepo::reassign(&state.pool, grant.id, input.recipient_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Book", id }))?;
    UserRepo::increment_offered(&state.pool, user.id()).await?;

    Ok(Json(MessageResponse::new("Book gifted")))
}
