//! Route definitions for the `/categories` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /      -> list (public, display order)
/// POST   /      -> create (categories.create)
/// GET    /top   -> top (public, by active-book count)
/// GET    /{id}  -> get_by_id (public)
/// PUT    /{id}  -> update (categories.edit)
/// DELETE /{id}  -> delete (categories.delete, detaches books)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::list).post(categories::create))
        .route("/top", get(categories::top))
        .route(
            "/{id}",
            get(categories::get_by_id)
                .put(categories::update)
                .delete(categories::delete),
        )
}
