//! Currency entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use warraq_core::types::{DbId, Timestamp};

/// A currency row from the `currencies` table, with its conversion rate to
/// Algerian dinar.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Currency {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub rate_to_dz: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a currency.
#[derive(Debug, Deserialize)]
pub struct CreateCurrency {
    pub code: String,
    pub name: String,
    pub rate_to_dz: f64,
}

/// DTO for updating a currency.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCurrency {
    pub code: Option<String>,
    pub name: Option<String>,
    pub rate_to_dz: Option<f64>,
}
