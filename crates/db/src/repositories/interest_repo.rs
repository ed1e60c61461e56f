//! Repository for the `user_interests` table.

use sqlx::PgPool;
use warraq_core::types::DbId;

use crate::models::interest::UserInterest;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, category_id, created_at";

/// Provides operations for the categories a user follows.
pub struct InterestRepo;

impl InterestRepo {
    /// Follow a category. Re-following is a no-op thanks to
    /// `uq_user_interests_user_category`.
    pub async fn add(pool: &PgPool, user_id: DbId, category_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO user_interests (user_id, category_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_user_interests_user_category DO NOTHING",
        )
        .bind(user_id)
        .bind(category_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The caller's followed categories.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<UserInterest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_interests
             WHERE user_id = $1
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, UserInterest>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Unfollow a category. Returns `false` when it was not followed.
    pub async fn remove(
        pool: &PgPool,
        user_id: DbId,
        category_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM user_interests WHERE user_id = $1 AND category_id = $2")
                .bind(user_id)
                .bind(category_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
