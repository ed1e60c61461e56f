//! Repository for the `book_users` ownership grants.

use sqlx::PgPool;
use warraq_core::types::DbId;

use crate::models::book_user::BookUser;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, book_id, created_at, updated_at";

/// Provides grant operations for book ownership.
pub struct BookUserRepo;

impl BookUserRepo {
    /// Grant ownership of a book to a user. Granting an already-owned book
    /// is a no-op thanks to `uq_book_users_user_book`, so settlement replay
    /// and repeated gifting stay safe.
    pub async fn grant(pool: &PgPool, user_id: DbId, book_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO book_users (user_id, book_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_book_users_user_book DO NOTHING",
        )
        .bind(user_id)
        .bind(book_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Grant ownership of several books at once, returning how many grants
    /// were actually new.
    pub async fn grant_many(
        pool: &PgPool,
        user_id: DbId,
        book_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        if book_ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            "INSERT INTO book_users (user_id, book_id)
             SELECT $1, unnest($2::BIGINT[])
             ON CONFLICT ON CONSTRAINT uq_book_users_user_book DO NOTHING",
        )
        .bind(user_id)
        .bind(book_ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Find a grant row for (user, book).
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        book_id: DbId,
    ) -> Result<Option<BookUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM book_users WHERE user_id = $1 AND book_id = $2");
        sqlx::query_as::<_, BookUser>(&query)
            .bind(user_id)
            .bind(book_id)
            .fetch_optional(pool)
            .await
    }

    /// Move an existing grant to a different user, for gifting a book the
    /// giver already owns. Fails with a unique violation when the recipient
    /// already owns the book.
    pub async fn reassign(
        pool: &PgPool,
        grant_id: DbId,
        to_user_id: DbId,
    ) -> Result<Option<BookUser>, sqlx::Error> {
        let query = format!(
            "UPDATE book_users SET user_id = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BookUser>(&query)
            .bind(grant_id)
            .bind(to_user_id)
            .fetch_optional(pool)
            .await
    }
}
