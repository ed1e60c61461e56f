//! Repository for the `authors` table.

use sqlx::PgPool;
use warraq_core::types::DbId;

use crate::models::author::{Author, CreateAuthor, UpdateAuthor};
use crate::models::book::BookSales;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, image, description, facebook, youtube, telegram, whatsapp, \
                       instagram, is_verified, created_at, updated_at";

/// Provides CRUD operations for authors.
pub struct AuthorRepo;

impl AuthorRepo {
    /// Insert a new author, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAuthor) -> Result<Author, sqlx::Error> {
        let query = format!(
            "INSERT INTO authors (name, image, description, facebook, youtube, telegram,
                whatsapp, instagram, is_verified)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, FALSE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Author>(&query)
            .bind(&input.name)
            .bind(&input.image)
            .bind(&input.description)
            .bind(&input.facebook)
            .bind(&input.youtube)
            .bind(&input.telegram)
            .bind(&input.whatsapp)
            .bind(&input.instagram)
            .bind(input.is_verified)
            .fetch_one(pool)
            .await
    }

    /// Find an author by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Author>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM authors WHERE id = $1");
        sqlx::query_as::<_, Author>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all authors, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Author>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM authors ORDER BY created_at DESC");
        sqlx::query_as::<_, Author>(&query).fetch_all(pool).await
    }

    /// Update an author. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAuthor,
    ) -> Result<Option<Author>, sqlx::Error> {
        let query = format!(
            "UPDATE authors SET
                name = COALESCE($2, name),
                image = COALESCE($3, image),
                description = COALESCE($4, description),
                facebook = COALESCE($5, facebook),
                youtube = COALESCE($6, youtube),
                telegram = COALESCE($7, telegram),
                whatsapp = COALESCE($8, whatsapp),
                instagram = COALESCE($9, instagram),
                is_verified = COALESCE($10, is_verified),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Author>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.image)
            .bind(&input.description)
            .bind(&input.facebook)
            .bind(&input.youtube)
            .bind(&input.telegram)
            .bind(&input.whatsapp)
            .bind(&input.instagram)
            .bind(input.is_verified)
            .fetch_optional(pool)
            .await
    }

    /// Per-book sales figures for one author, computed from settled cart
    /// rows in a single query, best sellers first.
    pub async fn sales(pool: &PgPool, author_id: DbId) -> Result<Vec<BookSales>, sqlx::Error> {
        sqlx::query_as::<_, BookSales>(
            "SELECT b.id, b.title, b.price, b.free, b.discount, b.views, b.image,
                    COUNT(c.id) FILTER (WHERE c.is_paid) AS total_sales,
                    COALESCE(SUM(c.price) FILTER (WHERE c.is_paid), 0) AS total_revenue
             FROM books b
             LEFT JOIN carts c ON c.book_id = b.id
             WHERE b.author_id = $1
             GROUP BY b.id
             ORDER BY total_sales DESC",
        )
        .bind(author_id)
        .fetch_all(pool)
        .await
    }
}
