//! Route definitions for the admin analytics.

use axum::routing::get;
use axum::Router;

use crate::handlers::analytics;
use crate::state::AppState;

/// Routes mounted at `/analytics`. Gated by dashboard access.
///
/// ```text
/// GET /dashboard  -> dashboard (counts, latest books, top categories, top readers)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(analytics::dashboard))
}
