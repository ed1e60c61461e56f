//! Route definitions for the `/publishers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::publishers;
use crate::state::AppState;

/// Routes mounted at `/publishers`.
///
/// ```text
/// GET    /      -> list (public)
/// POST   /      -> create (publishers.create)
/// GET    /{id}  -> get_by_id (public)
/// PUT    /{id}  -> update (publishers.edit)
/// DELETE /{id}  -> delete (publishers.delete, detaches books)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(publishers::list).post(publishers::create))
        .route(
            "/{id}",
            get(publishers::get_by_id)
                .put(publishers::update)
                .delete(publishers::delete),
        )
}
