//! Repository for book reviews and read history.

use sqlx::PgPool;
use warraq_core::types::DbId;

use crate::models::review::{BookRead, BookReview, CreateReview, TopReader};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, book_id, rating, comment, created_at, updated_at";

/// Provides review and read-history operations.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Submit a review. One review per (user, book); a second attempt hits
    /// `uq_book_reviews_user_book` and surfaces as a conflict.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateReview,
    ) -> Result<BookReview, sqlx::Error> {
        let query = format!(
            "INSERT INTO book_reviews (user_id, book_id, rating, comment)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BookReview>(&query)
            .bind(user_id)
            .bind(input.book_id)
            .bind(input.rating)
            .bind(&input.comment)
            .fetch_one(pool)
            .await
    }

    /// All reviews for one book, newest first.
    pub async fn list_for_book(pool: &PgPool, book_id: DbId) -> Result<Vec<BookReview>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM book_reviews
             WHERE book_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, BookReview>(&query)
            .bind(book_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a review the caller owns. Returns `false` when no such row
    /// exists.
    pub async fn delete_own(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM book_reviews WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record that a user read a book. Re-reading is a no-op thanks to
    /// `uq_book_reads_user_book`, so a book counts once per reader.
    pub async fn record_read(pool: &PgPool, user_id: DbId, book_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO book_reads (user_id, book_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_book_reads_user_book DO NOTHING",
        )
        .bind(user_id)
        .bind(book_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One user's read history, newest first.
    pub async fn list_reads(pool: &PgPool, user_id: DbId) -> Result<Vec<BookRead>, sqlx::Error> {
        sqlx::query_as::<_, BookRead>(
            "SELECT id, user_id, book_id, created_at
             FROM book_reads
             WHERE user_id = $1
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Readers ranked by distinct books read within the last `days` days.
    pub async fn top_readers(
        pool: &PgPool,
        days: i32,
        limit: i64,
    ) -> Result<Vec<TopReader>, sqlx::Error> {
        sqlx::query_as::<_, TopReader>(
            "SELECT u.id AS user_id, u.name AS user_name, u.image AS user_image,
                    COUNT(r.id) AS books_read
             FROM users u
             JOIN book_reads r ON r.user_id = u.id
             WHERE r.created_at >= NOW() - make_interval(days => $1)
             GROUP BY u.id
             ORDER BY books_read DESC
             LIMIT $2",
        )
        .bind(days)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
