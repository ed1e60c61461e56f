//! Repository for the `slides` table.

use sqlx::PgPool;
use warraq_core::types::DbId;

use crate::models::slide::{CreateSlide, Slide, UpdateSlide};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, image, author_id, publisher_id, book_id, created_at, updated_at";

/// Provides CRUD operations for promotional slides.
pub struct SlideRepo;

impl SlideRepo {
    /// Insert a new slide, returning the created row. The caller validates
    /// that exactly one target is set; `ck_slides_single_target` backstops.
    pub async fn create(pool: &PgPool, input: &CreateSlide) -> Result<Slide, sqlx::Error> {
        let query = format!(
            "INSERT INTO slides (image, author_id, publisher_id, book_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Slide>(&query)
            .bind(&input.image)
            .bind(input.author_id)
            .bind(input.publisher_id)
            .bind(input.book_id)
            .fetch_one(pool)
            .await
    }

    /// Find a slide by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Slide>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM slides WHERE id = $1");
        sqlx::query_as::<_, Slide>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all slides, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Slide>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM slides ORDER BY created_at DESC");
        sqlx::query_as::<_, Slide>(&query).fetch_all(pool).await
    }

    /// Update a slide. When a new target is supplied, all three target
    /// columns are rewritten in the same statement so the previous target
    /// is cleared and the single-target invariant holds.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSlide,
    ) -> Result<Option<Slide>, sqlx::Error> {
        let retarget =
            input.author_id.is_some() || input.publisher_id.is_some() || input.book_id.is_some();
        let query = if retarget {
            format!(
                "UPDATE slides SET
                    image = COALESCE($2, image),
                    author_id = $3,
                    publisher_id = $4,
                    book_id = $5,
                    updated_at = NOW()
                 WHERE id = $1
                 RETURNING {COLUMNS}"
            )
        } else {
            format!(
                "UPDATE slides SET
                    image = COALESCE($2, image),
                    author_id = COALESCE($3, author_id),
                    publisher_id = COALESCE($4, publisher_id),
                    book_id = COALESCE($5, book_id),
                    updated_at = NOW()
                 WHERE id = $1
                 RETURNING {COLUMNS}"
            )
        };
        sqlx::query_as::<_, Slide>(&query)
            .bind(id)
            .bind(&input.image)
            .bind(input.author_id)
            .bind(input.publisher_id)
            .bind(input.book_id)
            .fetch_optional(pool)
            .await
    }
}
