//! Handlers for the caller's cart.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use warraq_core::error::CoreError;
use warraq_core::pricing;
use warraq_core::types::DbId;
use warraq_db::models::cart::{AddToCart, Cart, CartItem};
use warraq_db::repositories::{BookRepo, BookUserRepo, CartRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub total: f64,
}

/// GET /api/v1/cart
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<CartView>>> {
    let items = CartRepo::list_unpaid_items(&state.pool, user.id()).await?;
    let total = pricing::cart_total(
        items
            .iter()
            .map(|i| (i.book_price, i.book_discount, i.book_free)),
    );
    Ok(Json(DataResponse::new(CartView { items, total })))
}

/// POST /api/v1/cart
///
/// A book already owned or already sitting unpaid in the cart cannot be
/// added again; the unpaid duplicate is also enforced by
/// `uq_carts_user_book_unpaid` under concurrency.
pub async fn add(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<AddToCart>,
) -> AppResult<(StatusCode, Json<DataResponse<Cart>>)> {
    let book = BookRepo::find_by_id(&state.pool, input.book_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Book",
            id: input.book_id,
        }))?;
    if !book.is_active {
        return Err(AppError::Core(CoreError::Validation(
            "This book is not available".into(),
        )));
    }
    if BookUserRepo::find(&state.pool, user.id(), input.book_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "You already own this book".into(),
        )));
    }

    let cart = CartRepo::create(&state.pool, user.id(), input.book_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(cart))))
}

/// DELETE /api/v1/cart/{id}
pub async fn remove(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CartRepo::delete_own(&state.pool, id, user.id()).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Cart item",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/cart
pub async fn clear(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<MessageResponse>> {
    CartRepo::clear_unpaid(&state.pool, user.id()).await?;
    Ok(Json(MessageResponse::new("Cart cleared")))
}
