//! User interest model: categories a user follows.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use warraq_core::types::{DbId, Timestamp};

/// An interest row from the `user_interests` table. Unique per
/// (user, category).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserInterest {
    pub id: DbId,
    pub user_id: DbId,
    pub category_id: DbId,
    pub created_at: Timestamp,
}

/// DTO for declaring interests.
#[derive(Debug, Deserialize)]
pub struct CreateInterest {
    pub category_id: DbId,
}
