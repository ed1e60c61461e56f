//! Route definitions for the `/posts` feed and its comments.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::posts;
use crate::state::AppState;

/// Routes mounted at `/posts`.
///
/// ```text
/// GET    /                -> feed (approved posts, viewer-annotated)
/// POST   /                -> create (lands pending)
/// GET    /me              -> mine (all statuses)
/// GET    /admin?status=   -> admin_list (posts.manage)
/// PUT    /{id}            -> update (owner, resets to pending)
/// DELETE /{id}            -> delete (owner or posts.manage)
/// POST   /{id}/moderate   -> moderate (posts.manage)
/// POST   /{id}/like       -> toggle_like
/// POST   /{id}/comments   -> add_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::feed).post(posts::create))
        .route("/me", get(posts::mine))
        .route("/admin", get(posts::admin_list))
        .route("/{id}", put(posts::update).delete(posts::delete))
        .route("/{id}/moderate", post(posts::moderate))
        .route("/{id}/like", post(posts::toggle_like))
        .route("/{id}/comments", post(posts::add_comment))
}

/// Routes mounted at `/comments`.
///
/// ```text
/// DELETE /{id}  -> delete_comment (own comment only)
/// ```
pub fn comments_router() -> Router<AppState> {
    Router::new().route("/{id}", delete(posts::delete_comment))
}
