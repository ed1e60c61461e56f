//! Ownership grant model: one `book_users` row means "this user owns this
//! book", whether purchased or gifted.

use serde::Serialize;
use sqlx::FromRow;
use warraq_core::types::{DbId, Timestamp};

/// A grant row from the `book_users` table. Unique per (user, book).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookUser {
    pub id: DbId,
    pub user_id: DbId,
    pub book_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
