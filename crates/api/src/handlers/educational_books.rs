//! Handlers for the `/educational-books` resource.
//!
//! Same table as public books with `is_educational = true`, plus the PDF
//! text extraction endpoint used by the in-app reader.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use warraq_core::error::CoreError;
use warraq_core::permissions::{Action, Resource};
use warraq_core::types::DbId;
use warraq_db::cascade;
use warraq_db::models::book::{Book, CreateBook, UpdateBook};
use warraq_db::repositories::{BookRepo, BookUserRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::books::SearchQuery;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/educational-books
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut input): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<DataResponse<Book>>)> {
    user.require(Resource::EducationalBooks, Action::Create)?;
    input.is_educational = Some(true);
    let book = BookRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(book))))
}

/// GET /api/v1/educational-books
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Book>>>> {
    let books = BookRepo::list(&state.pool, true).await?;
    Ok(Json(DataResponse::new(books)))
}

/// GET /api/v1/educational-books/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Book>>> {
    let book = BookRepo::find_active(&state.pool, id, true)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Book", id }))?;
    BookRepo::increment_views(&state.pool, id).await?;
    Ok(Json(DataResponse::new(book)))
}

/// GET /api/v1/educational-books/search?q=term
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<DataResponse<Vec<Book>>>> {
    let books = BookRepo::search(&state.pool, true, query.q.trim()).await?;
    Ok(Json(DataResponse::new(books)))
}

/// PUT /api/v1/educational-books/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBook>,
) -> AppResult<Json<DataResponse<Book>>> {
    user.require(Resource::EducationalBooks, Action::Edit)?;
    let updated = BookRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Book", id }))?;
    Ok(Json(DataResponse::new(updated)))
}

/// DELETE /api/v1/educational-books/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    user.require(Resource::EducationalBooks, Action::Delete)?;
    let files = cascade::delete_book(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Book", id }))?;
    state.storage.remove_all(&files).await;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/educational-books/{id}/text
///
/// Extracts the PDF text for the in-app reader. Free books are readable by
/// any signed-in user; paid books need an ownership grant.
pub async fn extract_text(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<String>>> {
    let book = BookRepo::find_active(&state.pool, id, true)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Book", id }))?;

    if !book.free {
        BookUserRepo::find(&state.pool, user.id(), id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Forbidden("You do not own this book".into()))
            })?;
    }

    if !book.pdf.to_lowercase().ends_with(".pdf") {
        return Err(AppError::Core(CoreError::Validation(
            "This book has no PDF attachment".into(),
        )));
    }

    let path = state.storage.path("books/pdfs", &book.pdf);
    // pdf-extract is CPU-bound and synchronous; keep it off the runtime.
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&path))
        .await
        .map_err(|e| AppError::InternalError(format!("Extraction task failed: {e}")))?
        .map_err(|e| AppError::InternalError(format!("PDF extraction failed: {e}")))?;

    Ok(Json(DataResponse::new(text)))
}
