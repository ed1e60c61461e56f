//! Cart entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use warraq_core::types::{DbId, Timestamp};

/// A cart row from the `carts` table.
///
/// State machine: unpaid -> checkout initiated (`chargily_id` set) -> paid
/// (`is_paid = true`). Settled rows are kept as purchase history.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Cart {
    pub id: DbId,
    pub user_id: DbId,
    pub book_id: DbId,
    pub chargily_id: Option<String>,
    pub is_paid: bool,
    pub price: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a book to the caller's cart.
#[derive(Debug, Deserialize)]
pub struct AddToCart {
    pub book_id: DbId,
}

/// One unpaid cart row joined with the pricing fields of its book, used to
/// compute the checkout amount.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CartItem {
    pub id: DbId,
    pub user_id: DbId,
    pub book_id: DbId,
    pub chargily_id: Option<String>,
    pub book_title: String,
    pub book_price: f64,
    pub book_discount: f64,
    pub book_free: bool,
}
