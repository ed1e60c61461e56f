//! Route definitions for the `/currencies` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::currencies;
use crate::state::AppState;

/// Routes mounted at `/currencies`.
///
/// ```text
/// GET    /      -> list (public)
/// POST   /      -> create (currencies.create)
/// PUT    /{id}  -> update (currencies.edit)
/// DELETE /{id}  -> delete (currencies.delete)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(currencies::list).post(currencies::create))
        .route(
            "/{id}",
            put(currencies::update).delete(currencies::delete),
        )
}
