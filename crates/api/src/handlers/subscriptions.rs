//! Handlers for the `/subscriptions` plan resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use warraq_core::error::CoreError;
use warraq_core::permissions::{Action, Resource};
use warraq_core::subscription::validate_icon;
use warraq_core::types::DbId;
use warraq_db::models::subscription::{CreateSubscription, Subscription, UpdateSubscription};
use warraq_db::repositories::SubscriptionRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/subscriptions
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateSubscription>,
) -> AppResult<(StatusCode, Json<DataResponse<Subscription>>)> {
    user.require(Resource::Subscriptions, Action::Create)?;
    validate_icon(&input.icon).map_err(AppError::Core)?;
    if input.months < 1 {
        return Err(AppError::Core(CoreError::Validation(
            "Duration must be at least one month".into(),
        )));
    }
    let plan = SubscriptionRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(plan))))
}

/// GET /api/v1/subscriptions
///
/// Public listing of purchasable plans.
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Subscription>>>> {
    let plans = SubscriptionRepo::list(&state.pool, true).await?;
    Ok(Json(DataResponse::new(plans)))
}

/// GET /api/v1/subscriptions/all
pub async fn list_all(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Subscription>>>> {
    user.require(Resource::Subscriptions, Action::View)?;
    let plans = SubscriptionRepo::list(&state.pool, false).await?;
    Ok(Json(DataResponse::new(plans)))
}

/// GET /api/v1/subscriptions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Subscription>>> {
    let plan = SubscriptionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subscription",
            id,
        }))?;
    Ok(Json(DataResponse::new(plan)))
}

/// PUT /api/v1/subscriptions/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSubscription>,
) -> AppResult<Json<DataResponse<Subscription>>> {
    user.require(Resource::Subscriptions, Action::Edit)?;
    if let Some(icon) = input.icon.as_deref() {
        validate_icon(icon).map_err(AppError::Core)?;
    }
    if matches!(input.months, Some(months) if months < 1) {
        return Err(AppError::Core(CoreError::Validation(
            "Duration must be at least one month".into(),
        )));
    }
    let plan = SubscriptionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subscription",
            id,
        }))?;
    Ok(Json(DataResponse::new(plan)))
}
