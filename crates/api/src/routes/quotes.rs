//! Route definitions for the `/quotes` feed.
//!
//! Quotes share the post handlers with the subtype pinned; editing, liking,
//! and commenting reuse the shared post implementations since ids are
//! global across both subtypes.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::posts;
use crate::state::AppState;

/// Routes mounted at `/quotes`.
///
/// ```text
/// GET    /                -> quote_feed (approved quotes)
/// POST   /                -> create_quote (lands pending)
/// GET    /me              -> my_quotes (all statuses)
/// GET    /admin?status=   -> admin_list_quotes (quotes.manage)
/// PUT    /{id}            -> update (owner, resets to pending)
/// DELETE /{id}            -> delete_quote (owner or quotes.manage)
/// POST   /{id}/moderate   -> moderate_quote (quotes.manage)
/// POST   /{id}/like       -> toggle_like
/// POST   /{id}/comments   -> add_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::quote_feed).post(posts::create_quote))
        .route("/me", get(posts::my_quotes))
        .route("/admin", get(posts::admin_list_quotes))
        .route("/{id}", put(posts::update).delete(posts::delete_quote))
        .route("/{id}/moderate", post(posts::moderate_quote))
        .route("/{id}/like", post(posts::toggle_like))
        .route("/{id}/comments", post(posts::add_comment))
}
