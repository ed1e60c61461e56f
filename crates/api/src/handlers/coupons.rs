//! Handlers for the `/coupons` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use warraq_core::error::CoreError;
use warraq_core::exclusive::validate_exactly_one;
use warraq_core::permissions::{Action, Resource};
use warraq_core::subscription::expiry_from;
use warraq_core::types::DbId;
use warraq_db::models::coupon::{Coupon, CreateCoupons};
use warraq_db::repositories::{BookRepo, BookUserRepo, CouponRepo, SubscriptionRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Upper bound on one generation batch.
const MAX_BATCH: i64 = 1000;

/// POST /api/v1/coupons
///
/// Batch-generates identical coupons targeting exactly one of a book or a
/// subscription plan.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateCoupons>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<Coupon>>>)> {
    user.require(Resource::Coupons, Action::Create)?;
    if !(1..=MAX_BATCH).contains(&input.count) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Count must be between 1 and {MAX_BATCH}"
        ))));
    }
    validate_exactly_one(&[
        ("book_id", input.book_id.is_some()),
        ("subscription_id", input.subscription_id.is_some()),
    ])
    .map_err(AppError::Core)?;

    if let Some(book_id) = input.book_id {
        BookRepo::find_by_id(&state.pool, book_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Book",
                id: book_id,
            }))?;
    }
    if let Some(plan_id) = input.subscription_id {
        SubscriptionRepo::find_by_id(&state.pool, plan_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Subscription",
                id: plan_id,
            }))?;
    }

    let coupons = CouponRepo::create_batch(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(coupons))))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub used: Option<bool>,
}

/// GET /api/v1/coupons?used=false
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<DataResponse<Vec<Coupon>>>> {
    user.require(Resource::Coupons, Action::View)?;
    let coupons = CouponRepo::list(&state.pool, query.used).await?;
    Ok(Json(DataResponse::new(coupons)))
}

#[derive(Debug, Deserialize)]
pub struct DeleteManyRequest {
    pub ids: Vec<DbId>,
}

/// DELETE /api/v1/coupons
///
/// All-or-nothing: one unknown id fails the whole batch.
pub async fn delete_many(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<DeleteManyRequest>,
) -> AppResult<StatusCode> {
    user.require(Resource::Coupons, Action::Delete)?;
    if !CouponRepo::delete_many(&state.pool, &input.ids).await? {
        return Err(AppError::Core(CoreError::Validation(
            "One or more coupons do not exist".into(),
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct RedeemRequest {
    pub coupon_id: DbId,
}

/// POST /api/v1/coupons/redeem
///
/// Consuming the coupon and applying its benefit: a book coupon grants the
/// book, a plan coupon activates the subscription. The `used_at IS NULL`
/// guard in the repository makes concurrent redemption single-winner.
pub async fn redeem(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<RedeemRequest>,
) -> AppResult<Json<DataResponse<Coupon>>> {
    let coupon = CouponRepo::redeem(&state.pool, input.coupon_id, user.id())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Coupon does not exist or was already used".into(),
            ))
        })?;

    if let Some(book_id) = coupon.book_id {
        BookUserRepo::grant(&state.pool, user.id(), book_id).await?;
    } else if let Some(plan_id) = coupon.subscription_id {
        let plan = SubscriptionRepo::find_by_id(&state.pool, plan_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Subscription",
                id: plan_id,
            }))?;
        let expires_at = expiry_from(chrono::Utc::now(), plan.months).map_err(AppError::Core)?;
        UserRepo::set_subscription(&state.pool, user.id(), plan.id, expires_at).await?;
    }

    Ok(Json(DataResponse::new(coupon)))
}
