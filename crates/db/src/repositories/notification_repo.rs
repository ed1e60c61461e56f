//! Repository for the `notifications` table.

use sqlx::PgPool;
use warraq_core::types::DbId;

use crate::models::notification::{CreateNotification, Notification, UpdateNotification};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, image, to_all, to_one, begin_at, end_at, \
                       is_active, created_at, updated_at";

/// Provides CRUD operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a new notification, returning the created row. The caller
    /// validates target exclusivity; `ck_notifications_single_target`
    /// backstops.
    pub async fn create(
        pool: &PgPool,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (title, description, image, to_all, to_one,
                begin_at, end_at, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image)
            .bind(input.to_all)
            .bind(input.to_one)
            .bind(input.begin_at)
            .bind(input.end_at)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a notification by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notifications WHERE id = $1");
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all notifications for administration, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notifications ORDER BY created_at DESC");
        sqlx::query_as::<_, Notification>(&query)
            .fetch_all(pool)
            .await
    }

    /// Notifications visible to one user right now: active, inside their
    /// display window, and either broadcast or addressed to this user.
    pub async fn list_active_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications
             WHERE is_active
               AND begin_at <= NOW() AND end_at >= NOW()
               AND (to_all OR to_one = $1)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a notification. When the target changes, both target columns
    /// are rewritten together so the invariant holds.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNotification,
    ) -> Result<Option<Notification>, sqlx::Error> {
        let retarget = input.to_all.is_some() || input.to_one.is_some();
        let query = if retarget {
            format!(
                "UPDATE notifications SET
                    title = COALESCE($2, title),
                    description = COALESCE($3, description),
                    image = COALESCE($4, image),
                    to_all = COALESCE($5, FALSE),
                    to_one = $6,
                    begin_at = COALESCE($7, begin_at),
                    end_at = COALESCE($8, end_at),
                    is_active = COALESCE($9, is_active),
                    updated_at = NOW()
                 WHERE id = $1
                 RETURNING {COLUMNS}"
            )
        } else {
            format!(
                "UPDATE notifications SET
                    title = COALESCE($2, title),
                    description = COALESCE($3, description),
                    image = COALESCE($4, image),
                    to_all = COALESCE($5, to_all),
                    to_one = COALESCE($6, to_one),
                    begin_at = COALESCE($7, begin_at),
                    end_at = COALESCE($8, end_at),
                    is_active = COALESCE($9, is_active),
                    updated_at = NOW()
                 WHERE id = $1
                 RETURNING {COLUMNS}"
            )
        };
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image)
            .bind(input.to_all)
            .bind(input.to_one)
            .bind(input.begin_at)
            .bind(input.end_at)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }
}
