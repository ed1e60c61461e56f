//! Handlers for book reviews and read history.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use warraq_core::error::CoreError;
use warraq_core::types::DbId;
use warraq_db::models::review::{BookRead, BookReview, CreateReview, TopReader};
use warraq_db::repositories::{BookRepo, ReviewRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// POST /api/v1/reviews
///
/// One review per (user, book); a second attempt surfaces as 409 through
/// `uq_book_reviews_user_book`.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateReview>,
) -> AppResult<(StatusCode, Json<DataResponse<BookReview>>)> {
    if !(1..=5).contains(&input.rating) {
        return Err(AppError::Core(CoreError::Validation(
            "Rating must be between 1 and 5".into(),
        )));
    }
    BookRepo::find_by_id(&state.pool, input.book_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Book",
            id: input.book_id,
        }))?;
    let review = ReviewRepo::create(&state.pool, user.id(), &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(review))))
}

/// GET /api/v1/books/{id}/reviews
pub async fn list_for_book(
    State(state): State<AppState>,
    Path(book_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<BookReview>>>> {
    let reviews = ReviewRepo::list_for_book(&state.pool, book_id).await?;
    Ok(Json(DataResponse::new(reviews)))
}

/// DELETE /api/v1/reviews/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ReviewRepo::delete_own(&state.pool, id, user.id()).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/books/{id}/read
///
/// Records a completed read. Re-reading the same book changes nothing.
pub async fn record_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(book_id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    BookRepo::find_by_id(&state.pool, book_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Book",
            id: book_id,
        }))?;
    ReviewRepo::record_read(&state.pool, user.id(), book_id).await?;
    Ok(Json(MessageResponse::new("Read recorded")))
}

/// GET /api/v1/reads/me
pub async fn my_reads(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<BookRead>>>> {
    let reads = ReviewRepo::list_reads(&state.pool, user.id()).await?;
    Ok(Json(DataResponse::new(reads)))
}

#[derive(Debug, Deserialize)]
pub struct TopReadersQuery {
    pub days: Option<i32>,
    pub limit: Option<i64>,
}

/// GET /api/v1/reads/top?days=7&limit=10
pub async fn top_readers(
    State(state): State<AppState>,
    Query(query): Query<TopReadersQuery>,
) -> AppResult<Json<DataResponse<Vec<TopReader>>>> {
    let days = query.days.unwrap_or(7).clamp(1, 365);
    let limit = query.limit.unwrap_or(10).clamp(1, 100);
    let readers = ReviewRepo::top_readers(&state.pool, days, limit).await?;
    Ok(Json(DataResponse::new(readers)))
}
