//! Route definitions for the public `/books` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{books, reviews};
use crate::state::AppState;

/// Routes mounted at `/books`.
///
/// ```text
/// GET    /               -> list (public)
/// POST   /               -> create (public_books.create)
/// GET    /search?q=      -> search (public)
/// GET    /me             -> mine (owned books via grants)
/// GET    /{id}           -> get_by_id (active only, bumps views)
/// PUT    /{id}           -> update (public_books.edit)
/// DELETE /{id}           -> delete (public_books.delete, full cascade)
/// POST   /{id}/gift      -> gift (must own the grant)
/// GET    /{id}/reviews   -> reviews for the book (public)
/// POST   /{id}/read      -> record a completed read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(books::list).post(books::create))
        .route("/search", get(books::search))
        .route("/me", get(books::mine))
        .route(
            "/{id}",
            get(books::get_by_id).put(books::update).delete(books::delete),
        )
        .route("/{id}/gift", post(books::gift))
        .route("/{id}/reviews", get(reviews::list_for_book))
        .route("/{id}/read", post(reviews::record_read))
}
