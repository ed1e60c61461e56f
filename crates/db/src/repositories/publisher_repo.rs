//! Repository for the `publishers` table.

use sqlx::PgPool;
use warraq_core::types::DbId;

use crate::models::publisher::{CreatePublisher, Publisher, UpdatePublisher};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, image, description, is_verified, created_at, updated_at";

/// Provides CRUD operations for publishers.
pub struct PublisherRepo;

impl PublisherRepo {
    /// Insert a new publisher, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePublisher) -> Result<Publisher, sqlx::Error> {
        let query = format!(
            "INSERT INTO publishers (name, image, description, is_verified)
             VALUES ($1, $2, $3, COALESCE($4, FALSE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Publisher>(&query)
            .bind(&input.name)
            .bind(&input.image)
            .bind(&input.description)
            .bind(input.is_verified)
            .fetch_one(pool)
            .await
    }

    /// Find a publisher by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Publisher>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM publishers WHERE id = $1");
        sqlx::query_as::<_, Publisher>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all publishers, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Publisher>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM publishers ORDER BY created_at DESC");
        sqlx::query_as::<_, Publisher>(&query).fetch_all(pool).await
    }

    /// Update a publisher. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePublisher,
    ) -> Result<Option<Publisher>, sqlx::Error> {
        let query = format!(
            "UPDATE publishers SET
                name = COALESCE($2, name),
                image = COALESCE($3, image),
                description = COALESCE($4, description),
                is_verified = COALESCE($5, is_verified),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Publisher>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.image)
            .bind(&input.description)
            .bind(input.is_verified)
            .fetch_optional(pool)
            .await
    }
}
