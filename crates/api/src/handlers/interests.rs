//! Handlers for the caller's category interests.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use warraq_core::error::CoreError;
use warraq_core::types::DbId;
use warraq_db::models::interest::{CreateInterest, UserInterest};
use warraq_db::repositories::{CategoryRepo, InterestRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// POST /api/v1/interests
///
/// Declaring the same interest twice is a no-op.
pub async fn add(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateInterest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    CategoryRepo::find_by_id(&state.pool, input.category_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: input.category_id,
        }))?;
    InterestRepo::add(&state.pool, user.id(), input.category_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Interest saved")),
    ))
}

/// GET /api/v1/interests
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<UserInterest>>>> {
    let interests = InterestRepo::list_for_user(&state.pool, user.id()).await?;
    Ok(Json(DataResponse::new(interests)))
}

/// DELETE /api/v1/interests/{category_id}
pub async fn remove(
    State(state): State<AppState>,
    user: AuthUser,
    Path(category_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !InterestRepo::remove(&state.pool, user.id(), category_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Interest",
            id: category_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
