//! Book review and read-history models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use warraq_core::types::{DbId, Timestamp};

/// A review row from the `book_reviews` table. Unique per (user, book).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookReview {
    pub id: DbId,
    pub user_id: DbId,
    pub book_id: DbId,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for submitting a review.
#[derive(Debug, Deserialize)]
pub struct CreateReview {
    pub book_id: DbId,
    pub rating: i32,
    pub comment: Option<String>,
}

/// A read-history row from the `book_reads` table. Unique per (user, book).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookRead {
    pub id: DbId,
    pub user_id: DbId,
    pub book_id: DbId,
    pub created_at: Timestamp,
}

/// A reader ranked by books read within a period.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TopReader {
    pub user_id: DbId,
    pub user_name: String,
    pub user_image: Option<String>,
    pub books_read: i64,
}
