//! Route definitions for reviews and read history.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::reviews;
use crate::state::AppState;

/// Routes mounted at `/reviews`. Per-book listing lives under `/books`.
///
/// ```text
/// POST   /      -> create (one per user per book)
/// DELETE /{id}  -> delete (own review only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(reviews::create))
        .route("/{id}", delete(reviews::delete))
}

/// Routes mounted at `/reads`.
///
/// ```text
/// GET /me   -> my_reads (own read history)
/// GET /top  -> top_readers (?days=7&limit=10)
/// ```
pub fn reads_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(reviews::my_reads))
        .route("/top", get(reviews::top_readers))
}
