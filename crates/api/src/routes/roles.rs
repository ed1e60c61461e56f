//! Route definitions for the `/roles` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::roles;
use crate::state::AppState;

/// Routes mounted at `/roles`. All gated by `roles_permissions` capabilities.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update (immutable roles refused)
/// DELETE /{id}  -> delete (immutable roles refused)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(roles::list).post(roles::create))
        .route(
            "/{id}",
            get(roles::get_by_id).put(roles::update).delete(roles::delete),
        )
}
