//! Repository for the `subscriptions` table.

use sqlx::PgPool;
use warraq_core::types::DbId;

use crate::models::subscription::{CreateSubscription, Subscription, UpdateSubscription};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, icon, price, months, reduction, is_active, created_at, updated_at";

/// Provides CRUD operations for subscription plans.
pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// Insert a new plan, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSubscription,
    ) -> Result<Subscription, sqlx::Error> {
        let query = format!(
            "INSERT INTO subscriptions (name, icon, price, months, reduction, is_active)
             VALUES ($1, $2, COALESCE($3, 0), $4, COALESCE($5, 0), COALESCE($6, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(&input.name)
            .bind(&input.icon)
            .bind(input.price)
            .bind(input.months)
            .bind(input.reduction)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a plan by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Subscription>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subscriptions WHERE id = $1");
        sqlx::query_as::<_, Subscription>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List plans, optionally limited to active ones.
    pub async fn list(pool: &PgPool, active_only: bool) -> Result<Vec<Subscription>, sqlx::Error> {
        let filter = if active_only { "WHERE is_active" } else { "" };
        let query = format!("SELECT {COLUMNS} FROM subscriptions {filter} ORDER BY price ASC");
        sqlx::query_as::<_, Subscription>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a plan. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSubscription,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        let query = format!(
            "UPDATE subscriptions SET
                name = COALESCE($2, name),
                icon = COALESCE($3, icon),
                price = COALESCE($4, price),
                months = COALESCE($5, months),
                reduction = COALESCE($6, reduction),
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.icon)
            .bind(input.price)
            .bind(input.months)
            .bind(input.reduction)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }
}
