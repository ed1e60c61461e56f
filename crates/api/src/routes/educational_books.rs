//! Route definitions for the `/educational-books` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::educational_books;
use crate::state::AppState;

/// Routes mounted at `/educational-books`.
///
/// ```text
/// GET    /           -> list (public)
/// POST   /           -> create (educational_books.create)
/// GET    /search?q=  -> search (public)
/// GET    /{id}       -> get_by_id (active only, bumps views)
/// PUT    /{id}       -> update (educational_books.edit)
/// DELETE /{id}       -> delete (educational_books.delete, full cascade)
/// GET    /{id}/text  -> extract_text (owned or free, PDF reader)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(educational_books::list).post(educational_books::create),
        )
        .route("/search", get(educational_books::search))
        .route(
            "/{id}",
            get(educational_books::get_by_id)
                .put(educational_books::update)
                .delete(educational_books::delete),
        )
        .route("/{id}/text", get(educational_books::extract_text))
}
