//! Repository for the `users` table.

use sqlx::PgPool;
use warraq_core::types::{DbId, Timestamp};

use crate::models::user::{CreateUser, UpdateProfile, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, name, provider, password_hash, image, country, gender, bio, \
                       role_id, author_id, publisher_id, subscription_id, subscription_expires_at, \
                       purchased_books, offered_books, is_active, banned_at, ban_expire_at, \
                       ban_reason, password_reset_token, password_reset_expires, created_at, updated_at";

/// Provides CRUD and account-state operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, name, provider, password_hash, role_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.provider)
            .bind(&input.password_hash)
            .bind(input.role_id)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (emails are stored lowercased).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// The most recently registered users.
    pub async fn latest(pool: &PgPool, limit: i64) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC LIMIT $1");
        sqlx::query_as::<_, User>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Self-service profile update. Only non-`None` fields are applied.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                country = COALESCE($3, country),
                gender = COALESCE($4, gender),
                bio = COALESCE($5, bio),
                image = COALESCE($6, image),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.country)
            .bind(&input.gender)
            .bind(&input.bio)
            .bind(&input.image)
            .fetch_optional(pool)
            .await
    }

    /// Admin update of a user row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                role_id = COALESCE($3, role_id),
                author_id = COALESCE($4, author_id),
                publisher_id = COALESCE($5, publisher_id),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.role_id)
            .bind(input.author_id)
            .bind(input.publisher_id)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Update a user's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, password_reset_token = NULL,
                password_reset_expires = NULL, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Store a hashed password-reset token with its expiry.
    pub async fn set_reset_token(
        pool: &PgPool,
        id: DbId,
        token_hash: &str,
        expires: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET password_reset_token = $2, password_reset_expires = $3,
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(token_hash)
        .bind(expires)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find the user holding an unexpired reset token hash.
    pub async fn find_by_reset_token(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE password_reset_token = $1 AND password_reset_expires > NOW()"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Ban a user, optionally until `expire_at` (permanent when `None`).
    /// Also deactivates the account.
    pub async fn ban(
        pool: &PgPool,
        id: DbId,
        reason: Option<&str>,
        expire_at: Option<Timestamp>,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET banned_at = NOW(), ban_expire_at = $2, ban_reason = $3,
                is_active = FALSE, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(expire_at)
            .bind(reason)
            .fetch_optional(pool)
            .await
    }

    /// Clear all ban fields and reactivate the account.
    ///
    /// Called by the authorization guard when a temporary ban's expiry has
    /// passed, and by the admin unban endpoint. Idempotent; last-write-wins
    /// under concurrent guard evaluations is acceptable.
    pub async fn clear_ban(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET banned_at = NULL, ban_expire_at = NULL, ban_reason = NULL,
                is_active = TRUE, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Assign a subscription and its computed expiry.
    pub async fn set_subscription(
        pool: &PgPool,
        id: DbId,
        subscription_id: DbId,
        expires_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET subscription_id = $2, subscription_expires_at = $3,
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(subscription_id)
        .bind(expires_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Increment the purchased-books counter by `count` newly settled items.
    pub async fn increment_purchased(
        pool: &PgPool,
        id: DbId,
        count: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET purchased_books = purchased_books + $2, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(count)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Increment the offered-books counter after a successful gift.
    pub async fn increment_offered(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET offered_books = offered_books + 1, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
