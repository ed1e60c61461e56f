//! Route definitions for the `/users` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /            -> list (users.view)
/// GET    /{id}        -> get_by_id (self or users.view)
/// PUT    /me          -> update_profile (self)
/// PUT    /{id}        -> update (users.edit)
/// DELETE /{id}        -> delete (self or users.delete)
/// POST   /{id}/ban    -> ban (users.manage)
/// POST   /{id}/unban  -> unban (users.manage)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list))
        .route("/me", put(users::update_profile))
        .route(
            "/{id}",
            get(users::get_by_id).put(users::update).delete(users::delete),
        )
        .route("/{id}/ban", post(users::ban))
        .route("/{id}/unban", post(users::unban))
}
