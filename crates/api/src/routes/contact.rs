//! Route definitions for the `/contact` inbox.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// Routes mounted at `/contact`.
///
/// ```text
/// POST   /      -> submit (anonymous allowed, signed-in attributed)
/// GET    /      -> list (contactUs.view)
/// DELETE /{id}  -> delete (contactUs.delete)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contact::list).post(contact::submit))
        .route("/{id}", delete(contact::delete))
}
