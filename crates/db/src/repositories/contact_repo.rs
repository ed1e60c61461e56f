//! Repository for the `contact_messages` table.

use sqlx::PgPool;
use warraq_core::types::DbId;

use crate::models::contact::{ContactMessage, CreateContactMessage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, kind, user_id, created_at, updated_at";

/// Provides operations for contact-us messages.
pub struct ContactRepo;

impl ContactRepo {
    /// Insert a message, optionally attributed to a signed-in user.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContactMessage,
        user_id: Option<DbId>,
    ) -> Result<ContactMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_messages (title, description, kind, user_id)
             VALUES ($1, $2, COALESCE($3, 'other'), $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.kind)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// List all messages for administration, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ContactMessage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contact_messages ORDER BY created_at DESC");
        sqlx::query_as::<_, ContactMessage>(&query)
            .fetch_all(pool)
            .await
    }

    /// Delete a message. Returns `false` when no such row exists.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
