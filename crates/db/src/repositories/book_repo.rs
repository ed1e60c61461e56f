//! Repository for the `books` table.
//!
//! Every listing method takes the `is_educational` flag so the public and
//! educational subtypes never leak into each other's results.

use sqlx::PgPool;
use warraq_core::types::DbId;

use crate::models::book::{Book, CreateBook, UpdateBook};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, isbn, title, description, price, language, pages, views, sort_order, \
                       is_active, is_educational, discount, free, country, level, subject, \
                       school_year, content_type, trimester, publication_date, pdf, image, \
                       category_id, author_id, publisher_id, created_at, updated_at";

/// Provides CRUD operations for books.
pub struct BookRepo;

impl BookRepo {
    /// Insert a new book, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBook) -> Result<Book, sqlx::Error> {
        let query = format!(
            "INSERT INTO books (isbn, title, description, price, language, pages, sort_order,
                is_active, is_educational, discount, free, country, level, subject, school_year,
                content_type, trimester, publication_date, pdf, image, category_id, author_id,
                publisher_id)
             VALUES ($1, $2, $3, COALESCE($4, 0), $5, COALESCE($6, 0), COALESCE($7, 0),
                COALESCE($8, TRUE), COALESCE($9, FALSE), COALESCE($10, 0), COALESCE($11, FALSE),
                $12, $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(&input.isbn)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.language)
            .bind(input.pages)
            .bind(input.sort_order)
            .bind(input.is_active)
            .bind(input.is_educational)
            .bind(input.discount)
            .bind(input.free)
            .bind(&input.country)
            .bind(&input.level)
            .bind(&input.subject)
            .bind(input.school_year)
            .bind(&input.content_type)
            .bind(&input.trimester)
            .bind(input.publication_date)
            .bind(&input.pdf)
            .bind(&input.image)
            .bind(input.category_id)
            .bind(input.author_id)
            .bind(input.publisher_id)
            .fetch_one(pool)
            .await
    }

    /// Find a book by ID regardless of subtype or active state.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE id = $1");
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active book of the given subtype.
    pub async fn find_active(
        pool: &PgPool,
        id: DbId,
        is_educational: bool,
    ) -> Result<Option<Book>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM books
             WHERE id = $1 AND is_active AND is_educational = $2"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(is_educational)
            .fetch_optional(pool)
            .await
    }

    /// List all books of one subtype, newest first.
    pub async fn list(pool: &PgPool, is_educational: bool) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM books
             WHERE is_educational = $1
             ORDER BY sort_order ASC, created_at DESC"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(is_educational)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive title/description search within one subtype.
    pub async fn search(
        pool: &PgPool,
        is_educational: bool,
        term: &str,
    ) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM books
             WHERE is_educational = $1
               AND (title ILIKE $2 OR description ILIKE $2)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(is_educational)
            .bind(format!("%{}%", term))
            .fetch_all(pool)
            .await
    }

    /// Books owned by a user through active grants.
    pub async fn list_owned(pool: &PgPool, user_id: DbId) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM books
             WHERE id IN (SELECT book_id FROM book_users WHERE user_id = $1)
               AND is_active
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a book. Only non-`None` fields are applied; the subtype flag
    /// is never changed through updates.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBook,
    ) -> Result<Option<Book>, sqlx::Error> {
        let query = format!(
            "UPDATE books SET
                isbn = COALESCE($2, isbn),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                language = COALESCE($6, language),
                pages = COALESCE($7, pages),
                sort_order = COALESCE($8, sort_order),
                is_active = COALESCE($9, is_active),
                discount = COALESCE($10, discount),
                free = COALESCE($11, free),
                country = COALESCE($12, country),
                level = COALESCE($13, level),
                subject = COALESCE($14, subject),
                school_year = COALESCE($15, school_year),
                content_type = COALESCE($16, content_type),
                trimester = COALESCE($17, trimester),
                publication_date = COALESCE($18, publication_date),
                pdf = COALESCE($19, pdf),
                image = COALESCE($20, image),
                category_id = COALESCE($21, category_id),
                author_id = COALESCE($22, author_id),
                publisher_id = COALESCE($23, publisher_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(&input.isbn)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.language)
            .bind(input.pages)
            .bind(input.sort_order)
            .bind(input.is_active)
            .bind(input.discount)
            .bind(input.free)
            .bind(&input.country)
            .bind(&input.level)
            .bind(&input.subject)
            .bind(input.school_year)
            .bind(&input.content_type)
            .bind(&input.trimester)
            .bind(input.publication_date)
            .bind(&input.pdf)
            .bind(&input.image)
            .bind(input.category_id)
            .bind(input.author_id)
            .bind(input.publisher_id)
            .fetch_optional(pool)
            .await
    }

    /// Increment the view counter.
    pub async fn increment_views(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE books SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// The five most recently added books across both subtypes.
    pub async fn latest(pool: &PgPool, limit: i64) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books ORDER BY created_at DESC LIMIT $1");
        sqlx::query_as::<_, Book>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
