//! Route definitions for the `/authors` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::authors;
use crate::state::AppState;

/// Routes mounted at `/authors`.
///
/// ```text
/// GET    /            -> list (public)
/// POST   /            -> create (authors.create)
/// GET    /{id}        -> get_by_id (public)
/// PUT    /{id}        -> update (authors.edit)
/// DELETE /{id}        -> delete (authors.delete, detaches books)
/// GET    /{id}/sales  -> sales (authors.manage)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(authors::list).post(authors::create))
        .route(
            "/{id}",
            get(authors::get_by_id)
                .put(authors::update)
                .delete(authors::delete),
        )
        .route("/{id}/sales", get(authors::sales))
}
