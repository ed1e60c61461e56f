//! Route definitions for the `/uploads` endpoint.

use axum::routing::post;
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// Routes mounted at `/uploads`. Requires authentication.
///
/// ```text
/// POST /{kind}  -> upload (multipart `file` field, whitelisted kinds)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{kind}", post(uploads::upload))
}
