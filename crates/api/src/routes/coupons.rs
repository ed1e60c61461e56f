//! Route definitions for the `/coupons` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::coupons;
use crate::state::AppState;

/// Routes mounted at `/coupons`.
///
/// ```text
/// GET    /?used=   -> list (coupons.view)
/// POST   /         -> create (coupons.create, batch 1..=1000)
/// DELETE /         -> delete_many (coupons.delete, all-or-nothing)
/// POST   /redeem   -> redeem (any signed-in user)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(coupons::list)
                .post(coupons::create)
                .delete(coupons::delete_many),
        )
        .route("/redeem", post(coupons::redeem))
}
