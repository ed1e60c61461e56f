//! Repository for posts, likes, and comments.
//!
//! Feed listings aggregate like counts and the viewer's own like in the main
//! query, then attach comments with one batched fetch. No per-item lookups.

use std::collections::HashMap;

use sqlx::PgPool;
use warraq_core::types::DbId;

use crate::models::post::{
    CreatePost, FeedPost, Post, PostComment, UpdatePost, POST_STATUS_APPROVED,
    POST_STATUS_PENDING, POST_STATUS_REJECTED,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, body, image, status, rejection_note, is_quote, \
                       created_at, updated_at";

/// Provides post operations: CRUD, moderation, likes, comments, and feeds.
pub struct PostRepo;

impl PostRepo {
    /// Insert a new post or quote in the pending state.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreatePost,
        is_quote: bool,
    ) -> Result<Post, sqlx::Error> {
        let query = format!(
            "INSERT INTO posts (user_id, title, body, image, status, is_quote)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.body)
            .bind(&input.image)
            .bind(POST_STATUS_PENDING)
            .bind(is_quote)
            .fetch_one(pool)
            .await
    }

    /// Find a post by ID regardless of status or subtype.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The approved feed of one subtype, annotated for the viewer, newest
    /// first.
    pub async fn list_feed(
        pool: &PgPool,
        viewer_id: DbId,
        is_quote: bool,
    ) -> Result<Vec<FeedPost>, sqlx::Error> {
        let mut posts = sqlx::query_as::<_, FeedPost>(
            "SELECT p.id, p.user_id, u.name AS user_name, u.image AS user_image,
                    p.title, p.body, p.image, p.status, p.is_quote, p.created_at,
                    (SELECT COUNT(*) FROM post_likes l WHERE l.post_id = p.id) AS likes_count,
                    EXISTS (SELECT 1 FROM post_likes l
                            WHERE l.post_id = p.id AND l.user_id = $1) AS liked
             FROM posts p
             JOIN users u ON u.id = p.user_id
             WHERE p.status = $2 AND p.is_quote = $3
             ORDER BY p.created_at DESC",
        )
        .bind(viewer_id)
        .bind(POST_STATUS_APPROVED)
        .bind(is_quote)
        .fetch_all(pool)
        .await?;

        Self::attach_comments(pool, &mut posts).await?;
        Ok(posts)
    }

    /// The caller's own posts of one subtype in every status, so authors see
    /// pending and rejected entries alongside approved ones.
    pub async fn list_own(
        pool: &PgPool,
        user_id: DbId,
        is_quote: bool,
    ) -> Result<Vec<Post>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM posts
             WHERE user_id = $1 AND is_quote = $2
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(user_id)
            .bind(is_quote)
            .fetch_all(pool)
            .await
    }

    /// All posts of one subtype for moderators, optionally filtered by
    /// status.
    pub async fn list_admin(
        pool: &PgPool,
        is_quote: bool,
        status: Option<&str>,
    ) -> Result<Vec<Post>, sqlx::Error> {
        let filter = if status.is_some() { "AND status = $2" } else { "" };
        let query = format!(
            "SELECT {COLUMNS} FROM posts
             WHERE is_quote = $1 {filter}
             ORDER BY created_at DESC"
        );
        let mut q = sqlx::query_as::<_, Post>(&query).bind(is_quote);
        if let Some(status) = status {
            q = q.bind(status.to_owned());
        }
        q.fetch_all(pool).await
    }

    /// Owner edit. Editing resets the post to pending so it goes through
    /// moderation again.
    pub async fn update_own(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdatePost,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET
                title = COALESCE($3, title),
                body = COALESCE($4, body),
                image = COALESCE($5, image),
                status = $6,
                rejection_note = NULL,
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.body)
            .bind(&input.image)
            .bind(POST_STATUS_PENDING)
            .fetch_optional(pool)
            .await
    }

    /// Moderator decision: approve, or reject with a note.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        rejection_note: Option<&str>,
    ) -> Result<Option<Post>, sqlx::Error> {
        let note = if status == POST_STATUS_REJECTED {
            rejection_note
        } else {
            None
        };
        let query = format!(
            "UPDATE posts SET status = $2, rejection_note = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(status)
            .bind(note)
            .fetch_optional(pool)
            .await
    }

    /// Toggle the viewer's like on a post. Returns `true` when the post is
    /// now liked, `false` when the like was removed. The unique constraint
    /// on (user, post) keeps concurrent toggles consistent.
    pub async fn toggle_like(pool: &PgPool, post_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let inserted = sqlx::query(
            "INSERT INTO post_likes (user_id, post_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_post_likes_user_post DO NOTHING",
        )
        .bind(user_id)
        .bind(post_id)
        .execute(pool)
        .await?;
        if inserted.rows_affected() > 0 {
            return Ok(true);
        }
        sqlx::query("DELETE FROM post_likes WHERE user_id = $1 AND post_id = $2")
            .bind(user_id)
            .bind(post_id)
            .execute(pool)
            .await?;
        Ok(false)
    }

    /// Add a comment to a post.
    pub async fn add_comment(
        pool: &PgPool,
        post_id: DbId,
        user_id: DbId,
        comment: &str,
    ) -> Result<PostComment, sqlx::Error> {
        sqlx::query_as::<_, PostComment>(
            "INSERT INTO post_comments (user_id, post_id, comment)
             VALUES ($1, $2, $3)
             RETURNING id, user_id, post_id, comment, created_at, updated_at",
        )
        .bind(user_id)
        .bind(post_id)
        .bind(comment)
        .fetch_one(pool)
        .await
    }

    /// Delete a comment the caller owns. Returns `false` when no such row
    /// exists.
    pub async fn delete_comment(
        pool: &PgPool,
        comment_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM post_comments WHERE id = $1 AND user_id = $2")
            .bind(comment_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch comments for all listed posts in one query and group them in
    /// memory.
    async fn attach_comments(pool: &PgPool, posts: &mut [FeedPost]) -> Result<(), sqlx::Error> {
        if posts.is_empty() {
            return Ok(());
        }
        let ids: Vec<DbId> = posts.iter().map(|p| p.id).collect();
        let comments = sqlx::query_as::<_, PostComment>(
            "SELECT id, user_id, post_id, comment, created_at, updated_at
             FROM post_comments
             WHERE post_id = ANY($1::BIGINT[])
             ORDER BY created_at ASC",
        )
        .bind(&ids)
        .fetch_all(pool)
        .await?;

        let mut by_post: HashMap<DbId, Vec<PostComment>> = HashMap::new();
        for comment in comments {
            by_post.entry(comment.post_id).or_default().push(comment);
        }
        for post in posts.iter_mut() {
            post.comments = by_post.remove(&post.id).unwrap_or_default();
        }
        Ok(())
    }
}
