//! Route definitions for the `/slides` banner resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::slides;
use crate::state::AppState;

/// Routes mounted at `/slides`.
///
/// ```text
/// GET    /      -> list (public)
/// POST   /      -> create (slides.create, exactly one target)
/// GET    /{id}  -> get_by_id (public)
/// PUT    /{id}  -> update (slides.edit, retarget replaces whole)
/// DELETE /{id}  -> delete (slides.delete)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(slides::list).post(slides::create))
        .route(
            "/{id}",
            get(slides::get_by_id).put(slides::update).delete(slides::delete),
        )
}
