//! Repository for the `carts` table.

use sqlx::PgPool;
use warraq_core::types::DbId;

use crate::models::cart::{Cart, CartItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, book_id, chargily_id, is_paid, price, created_at, updated_at";

/// Provides cart operations, including checkout bookkeeping and settlement.
pub struct CartRepo;

impl CartRepo {
    /// Insert an unpaid cart row for (user, book).
    ///
    /// The partial unique index `uq_carts_user_book_unpaid` rejects a second
    /// unpaid row for the same pair; callers surface that as a conflict.
    pub async fn create(pool: &PgPool, user_id: DbId, book_id: DbId) -> Result<Cart, sqlx::Error> {
        let query = format!(
            "INSERT INTO carts (user_id, book_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Cart>(&query)
            .bind(user_id)
            .bind(book_id)
            .fetch_one(pool)
            .await
    }

    /// Find an unpaid cart row for (user, book).
    pub async fn find_unpaid(
        pool: &PgPool,
        user_id: DbId,
        book_id: DbId,
    ) -> Result<Option<Cart>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM carts
             WHERE user_id = $1 AND book_id = $2 AND NOT is_paid"
        );
        sqlx::query_as::<_, Cart>(&query)
            .bind(user_id)
            .bind(book_id)
            .fetch_optional(pool)
            .await
    }

    /// The caller's unpaid cart rows.
    pub async fn list_unpaid(pool: &PgPool, user_id: DbId) -> Result<Vec<Cart>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM carts
             WHERE user_id = $1 AND NOT is_paid
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Cart>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// The caller's unpaid cart rows joined with book pricing fields, for
    /// checkout amount computation.
    pub async fn list_unpaid_items(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<CartItem>, sqlx::Error> {
        sqlx::query_as::<_, CartItem>(
            "SELECT c.id, c.user_id, c.book_id, c.chargily_id,
                    b.title AS book_title, b.price AS book_price,
                    b.discount AS book_discount, b.free AS book_free
             FROM carts c
             JOIN books b ON b.id = c.book_id
             WHERE c.user_id = $1 AND NOT c.is_paid
             ORDER BY c.created_at ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Record a freshly issued checkout session and the price charged for
    /// this row.
    pub async fn set_checkout(
        pool: &PgPool,
        cart_id: DbId,
        chargily_id: &str,
        price: f64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE carts SET chargily_id = $2, price = $3, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(cart_id)
        .bind(chargily_id)
        .bind(price)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Mark matching unpaid rows paid, returning the rows settled by this
    /// call. Matching on `(user, session, unpaid)` makes webhook replay a
    /// no-op: the second delivery settles zero rows.
    pub async fn settle(
        pool: &PgPool,
        user_id: DbId,
        chargily_id: &str,
    ) -> Result<Vec<Cart>, sqlx::Error> {
        let query = format!(
            "UPDATE carts SET is_paid = TRUE, updated_at = NOW()
             WHERE user_id = $1 AND chargily_id = $2 AND NOT is_paid
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Cart>(&query)
            .bind(user_id)
            .bind(chargily_id)
            .fetch_all(pool)
            .await
    }

    /// Delete one of the caller's own unpaid cart rows. Returns `false`
    /// when no such row exists.
    pub async fn delete_own(pool: &PgPool, cart_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM carts WHERE id = $1 AND user_id = $2 AND NOT is_paid")
                .bind(cart_id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Empty the caller's unpaid cart.
    pub async fn clear_unpaid(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM carts WHERE user_id = $1 AND NOT is_paid")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
