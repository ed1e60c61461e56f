//! Contact-us message model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use warraq_core::types::{DbId, Timestamp};

/// A message row from the `contact_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactMessage {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub kind: String,
    pub user_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for submitting a contact message.
#[derive(Debug, Deserialize)]
pub struct CreateContactMessage {
    pub title: String,
    pub description: String,
    pub kind: Option<String>,
}
