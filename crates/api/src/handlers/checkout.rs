//! Checkout initiation and the payment webhook.
//!
//! The webhook never trusts the delivered payload: the checkout is
//! re-fetched from the provider by id and only the fetched status and
//! metadata drive settlement. Settlement itself is idempotent at the SQL
//! level, so replayed deliveries settle zero rows.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use warraq_core::error::CoreError;
use warraq_core::types::DbId;
use warraq_core::{pricing, subscription};
use warraq_db::repositories::{BookUserRepo, CartRepo, SubscriptionRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::payments::{log_payload_divergence, CHECKOUT_STATUS_PAID};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub checkout_id: String,
    pub checkout_url: Option<String>,
    pub amount: f64,
}

/// POST /api/v1/checkout
///
/// Creates a provider session over the caller's unpaid cart. Each row
/// records the session id and the price it will settle at; any session from
/// an earlier, abandoned checkout is expired at the provider first.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<CheckoutResponse>>> {
    let items = CartRepo::list_unpaid_items(&state.pool, user.id()).await?;
    if items.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Your cart is empty".into(),
        )));
    }

    let amount = pricing::cart_total(
        items
            .iter()
            .map(|i| (i.book_price, i.book_discount, i.book_free)),
    );
    pricing::validate_checkout_amount(amount).map_err(AppError::Core)?;

    // Expire any session an earlier, abandoned initiation left behind. A
    // superseded session that stays payable would take money and settle
    // nothing, so it must die; failure here is logged, never fatal.
    let mut stale: Vec<&str> = items.iter().filter_map(|i| i.chargily_id.as_deref()).collect();
    stale.sort_unstable();
    stale.dedup();
    for session in stale {
        if let Err(err) = state.payments.expire_checkout(session).await {
            tracing::warn!(session, error = %err, "Failed to expire superseded checkout session");
        }
    }

    let checkout = state
        .payments
        .create_checkout(
            amount,
            serde_json::json!({ "user_id": user.id() }),
            &format!("{}/payment/success", state.config.public_url),
            &format!("{}/payment/failure", state.config.public_url),
        )
        .await?;

    for item in &items {
        let price =
            pricing::effective_price(item.book_price, item.book_discount, item.book_free);
        CartRepo::set_checkout(&state.pool, item.id, &checkout.id, price).await?;
    }

    Ok(Json(DataResponse::new(CheckoutResponse {
        checkout_id: checkout.id,
        checkout_url: checkout.checkout_url,
        amount,
    })))
}

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub subscription_id: DbId,
}

/// POST /api/v1/checkout/subscription
///
/// Creates a provider session for a plan purchase. Refused while the caller
/// still has an unexpired subscription.
pub async fn subscribe(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<SubscribeRequest>,
) -> AppResult<Json<DataResponse<CheckoutResponse>>> {
    if subscription::is_active(user.user.subscription_expires_at, chrono::Utc::now()) {
        return Err(AppError::Core(CoreError::Conflict(
            "You already have an active subscription".into(),
        )));
    }

    let plan = SubscriptionRepo::find_by_id(&state.pool, input.subscription_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subscription",
            id: input.subscription_id,
        }))?;
    if !plan.is_active {
        return Err(AppError::Core(CoreError::Validation(
            "This plan is not available".into(),
        )));
    }
    pricing::validate_checkout_amount(plan.price).map_err(AppError::Core)?;

    let checkout = state
        .payments
        .create_checkout(
            plan.price,
            serde_json::json!({ "user_id": user.id(), "subscription_id": plan.id }),
            &format!("{}/payment/success", state.config.public_url),
            &format!("{}/payment/failure", state.config.public_url),
        )
        .await?;

    Ok(Json(DataResponse::new(CheckoutResponse {
        checkout_id: checkout.id,
        checkout_url: checkout.checkout_url,
        amount: plan.price,
    })))
}

/// POST /api/v1/webhook/chargily
///
/// Always answers 200 once the delivery parses: a non-2xx would only make
/// the provider redeliver a payload we have already decided about.
pub async fn webhook(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> AppResult<StatusCode> {
    let Some(delivered) = payload.get("data") else {
        tracing::warn!("Webhook delivery without a data object");
        return Ok(StatusCode::OK);
    };
    let Some(checkout_id) = delivered.get("id").and_then(Value::as_str) else {
        tracing::warn!("Webhook delivery without a checkout id");
        return Ok(StatusCode::OK);
    };

    let checkout = state.payments.get_checkout(checkout_id).await?;
    // Compare the delivery against the fetched state on the fields
    // settlement cares about.
    let delivered_view = serde_json::json!({
        "id": delivered.get("id"),
        "status": delivered.get("status"),
        "amount": delivered.get("amount"),
        "metadata": delivered.get("metadata"),
    });
    let fetched = serde_json::json!({
        "id": checkout.id,
        "status": checkout.status,
        "amount": checkout.amount,
        "metadata": checkout.metadata,
    });
    log_payload_divergence(checkout_id, &delivered_view, &fetched);

    if checkout.status != CHECKOUT_STATUS_PAID {
        tracing::info!(checkout_id, status = %checkout.status, "Ignoring non-paid checkout event");
        return Ok(StatusCode::OK);
    }

    let Some(user_id) = checkout
        .metadata
        .as_ref()
        .and_then(|m| m.get("user_id"))
        .and_then(Value::as_i64)
    else {
        tracing::error!(checkout_id, "Paid checkout carries no user_id metadata");
        return Ok(StatusCode::OK);
    };

    let subscription_id = checkout
        .metadata
        .as_ref()
        .and_then(|m| m.get("subscription_id"))
        .and_then(Value::as_i64);

    match subscription_id {
        Some(plan_id) => settle_subscription(&state, checkout_id, user_id, plan_id).await?,
        None => settle_books(&state, checkout_id, user_id).await?,
    }

    Ok(StatusCode::OK)
}

/// Mark matching cart rows paid, grant the books, and bump the purchase
/// counter by the number of rows this delivery actually settled.
async fn settle_books(state: &AppState, checkout_id: &str, user_id: DbId) -> AppResult<()> {
    let settled = CartRepo::settle(&state.pool, user_id, checkout_id).await?;
    if settled.is_empty() {
        tracing::info!(checkout_id, user_id, "Nothing to settle, delivery replayed or stale");
        return Ok(());
    }

    let book_ids: Vec<DbId> = settled.iter().map(|c| c.book_id).collect();
    BookUserRepo::grant_many(&state.pool, user_id, &book_ids).await?;
    UserRepo::increment_purchased(&state.pool, user_id, settled.len() as i32).await?;

    tracing::info!(checkout_id, user_id, count = settled.len(), "Settled paid checkout");
    Ok(())
}

/// Activate the purchased plan on the user's account.
async fn settle_subscription(
    state: &AppState,
    checkout_id: &str,
    user_id: DbId,
    plan_id: DbId,
) -> AppResult<()> {
    let Some(plan) = SubscriptionRepo::find_by_id(&state.pool, plan_id).await? else {
        tracing::error!(checkout_id, plan_id, "Paid checkout references a missing plan");
        return Ok(());
    };
    let expires_at =
        subscription::expiry_from(chrono::Utc::now(), plan.months).map_err(AppError::Core)?;
    UserRepo::set_subscription(&state.pool, user_id, plan.id, expires_at).await?;

    tracing::info!(checkout_id, user_id, plan_id, "Activated purchased subscription");
    Ok(())
}
