//! Route definitions for the `/subscriptions` plan resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::subscriptions;
use crate::state::AppState;

/// Routes mounted at `/subscriptions`.
///
/// ```text
/// GET  /      -> list (public, active plans only)
/// POST /      -> create (subscriptions.create)
/// GET  /all   -> list_all (subscriptions.view, includes inactive)
/// GET  /{id}  -> get_by_id (public)
/// PUT  /{id}  -> update (subscriptions.edit)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(subscriptions::list).post(subscriptions::create))
        .route("/all", get(subscriptions::list_all))
        .route(
            "/{id}",
            get(subscriptions::get_by_id).put(subscriptions::update),
        )
}
