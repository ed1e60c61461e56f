//! Subscription plan model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use warraq_core::types::{DbId, Timestamp};

/// A plan row from the `subscriptions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subscription {
    pub id: DbId,
    pub name: String,
    pub icon: String,
    pub price: f64,
    pub months: i32,
    pub reduction: f64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a plan.
#[derive(Debug, Deserialize)]
pub struct CreateSubscription {
    pub name: String,
    pub icon: String,
    pub price: Option<f64>,
    pub months: i32,
    pub reduction: Option<f64>,
    pub is_active: Option<bool>,
}

/// DTO for updating a plan. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSubscription {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub price: Option<f64>,
    pub months: Option<i32>,
    pub reduction: Option<f64>,
    pub is_active: Option<bool>,
}
