//! Route definitions for the `/notifications` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::notifications;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /      -> list (notifications.view)
/// POST   /      -> create (notifications.create, to_all xor to_one)
/// GET    /me    -> mine (active, in window, addressed to caller)
/// PUT    /{id}  -> update (notifications.edit)
/// DELETE /{id}  -> delete (notifications.delete)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notifications::list).post(notifications::create))
        .route("/me", get(notifications::mine))
        .route(
            "/{id}",
            put(notifications::update).delete(notifications::delete),
        )
}
