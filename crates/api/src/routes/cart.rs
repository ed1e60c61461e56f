//! Route definitions for the `/cart` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::cart;
use crate::state::AppState;

/// Routes mounted at `/cart`. All require authentication.
///
/// ```text
/// GET    /      -> list (items + effective total)
/// POST   /      -> add (rejects owned or duplicate-unpaid books)
/// DELETE /      -> clear (unpaid rows only)
/// DELETE /{id}  -> remove (own unpaid row)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::list).post(cart::add).delete(cart::clear))
        .route("/{id}", delete(cart::remove))
}
