//! Repository for the `currencies` table.

use sqlx::PgPool;
use warraq_core::types::DbId;

use crate::models::currency::{CreateCurrency, Currency, UpdateCurrency};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, code, name, rate_to_dz, created_at, updated_at";

/// Provides CRUD operations for currencies.
pub struct CurrencyRepo;

impl CurrencyRepo {
    /// Insert a new currency, returning the created row. Duplicate codes
    /// hit `uq_currencies_code` and surface as a conflict.
    pub async fn create(pool: &PgPool, input: &CreateCurrency) -> Result<Currency, sqlx::Error> {
        let query = format!(
            "INSERT INTO currencies (code, name, rate_to_dz)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Currency>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(input.rate_to_dz)
            .fetch_one(pool)
            .await
    }

    /// Find a currency by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Currency>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM currencies WHERE id = $1");
        sqlx::query_as::<_, Currency>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all currencies by code.
    pub async fn list(pool: &PgPool) -> Result<Vec<Currency>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM currencies ORDER BY code ASC");
        sqlx::query_as::<_, Currency>(&query).fetch_all(pool).await
    }

    /// Update a currency. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCurrency,
    ) -> Result<Option<Currency>, sqlx::Error> {
        let query = format!(
            "UPDATE currencies SET
                code = COALESCE($2, code),
                name = COALESCE($3, name),
                rate_to_dz = COALESCE($4, rate_to_dz),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Currency>(&query)
            .bind(id)
            .bind(&input.code)
            .bind(&input.name)
            .bind(input.rate_to_dz)
            .fetch_optional(pool)
            .await
    }

    /// Delete a currency. Returns `false` when no such row exists.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM currencies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
