//! Repository for the `coupons` table.

use sqlx::PgPool;
use warraq_core::types::DbId;

use crate::models::coupon::{Coupon, CreateCoupons};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, book_id, subscription_id, discount, user_id, used_at, created_at, updated_at";

/// Provides batch generation and redemption for coupons.
pub struct CouponRepo;

impl CouponRepo {
    /// Generate `count` identical coupons in one statement. The target
    /// exclusivity is validated by the caller and backstopped by
    /// `ck_coupons_single_target`.
    pub async fn create_batch(
        pool: &PgPool,
        input: &CreateCoupons,
    ) -> Result<Vec<Coupon>, sqlx::Error> {
        let query = format!(
            "INSERT INTO coupons (book_id, subscription_id, discount)
             SELECT $1, $2, $3 FROM generate_series(1, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Coupon>(&query)
            .bind(input.book_id)
            .bind(input.subscription_id)
            .bind(input.discount)
            .bind(input.count)
            .fetch_all(pool)
            .await
    }

    /// Find a coupon by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Coupon>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM coupons WHERE id = $1");
        sqlx::query_as::<_, Coupon>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List coupons, optionally filtered to used or unused only.
    pub async fn list(pool: &PgPool, used: Option<bool>) -> Result<Vec<Coupon>, sqlx::Error> {
        let filter = match used {
            Some(true) => "WHERE used_at IS NOT NULL",
            Some(false) => "WHERE used_at IS NULL",
            None => "",
        };
        let query = format!("SELECT {COLUMNS} FROM coupons {filter} ORDER BY created_at DESC");
        sqlx::query_as::<_, Coupon>(&query).fetch_all(pool).await
    }

    /// Consume an unused coupon for a user, returning the coupon or `None`
    /// when it does not exist or was already used. The `used_at IS NULL`
    /// guard makes concurrent redemption race-free: only one caller wins.
    pub async fn redeem(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Coupon>, sqlx::Error> {
        let query = format!(
            "UPDATE coupons SET user_id = $2, used_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND used_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Coupon>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a set of coupons. Returns `false` without deleting anything
    /// when any of the IDs does not exist, so partial deletes never happen.
    pub async fn delete_many(pool: &PgPool, ids: &[DbId]) -> Result<bool, sqlx::Error> {
        if ids.is_empty() {
            return Ok(true);
        }
        let mut tx = pool.begin().await?;
        let (found,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM coupons WHERE id = ANY($1::BIGINT[])")
                .bind(ids)
                .fetch_one(&mut *tx)
                .await?;
        if found != ids.len() as i64 {
            tx.rollback().await?;
            return Ok(false);
        }
        sqlx::query("DELETE FROM coupons WHERE id = ANY($1::BIGINT[])")
            .bind(ids)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(true)
    }
}
