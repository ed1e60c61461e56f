//! Route definitions for the `/interests` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::interests;
use crate::state::AppState;

/// Routes mounted at `/interests`. All require authentication.
///
/// ```text
/// GET    /                -> list (caller's followed categories)
/// POST   /                -> add (idempotent)
/// DELETE /{category_id}   -> remove
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(interests::list).post(interests::add))
        .route("/{category_id}", delete(interests::remove))
}
