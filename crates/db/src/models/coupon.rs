//! Coupon entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use warraq_core::types::{DbId, Timestamp};

/// A coupon row from the `coupons` table.
///
/// Targets exactly one of a book or a subscription; `user_id` + `used_at`
/// record consumption.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Coupon {
    pub id: DbId,
    pub book_id: Option<DbId>,
    pub subscription_id: Option<DbId>,
    pub discount: f64,
    pub user_id: Option<DbId>,
    pub used_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for batch-generating coupons: `count` identical coupons targeting
/// exactly one of `book_id` / `subscription_id`.
#[derive(Debug, Deserialize)]
pub struct CreateCoupons {
    pub count: i64,
    pub discount: f64,
    pub book_id: Option<DbId>,
    pub subscription_id: Option<DbId>,
}
