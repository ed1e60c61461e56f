//! Route definitions for checkout and the payment webhook.

use axum::routing::post;
use axum::Router;

use crate::handlers::checkout;
use crate::state::AppState;

/// Routes mounted at `/checkout`. Both require authentication.
///
/// ```text
/// POST /              -> create (cart checkout session)
/// POST /subscription  -> subscribe (plan checkout session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::create))
        .route("/subscription", post(checkout::subscribe))
}

/// Routes mounted at `/webhook`. Unauthenticated: the handler trusts
/// nothing in the delivery and re-fetches the checkout from the provider.
///
/// ```text
/// POST /chargily  -> webhook (idempotent settlement)
/// ```
pub fn webhook_router() -> Router<AppState> {
    Router::new().route("/chargily", post(checkout::webhook))
}
