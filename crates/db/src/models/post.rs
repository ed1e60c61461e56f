//! Post, like, and comment models.
//!
//! Quotes share the `posts` table, flagged by `is_quote`. Likes and comments
//! are strictly owned by their post: deleting the post cascades to both.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use warraq_core::attachments::{AttachmentField, OwnedAttachments};
use warraq_core::types::{DbId, Timestamp};

/// Moderation states of a post.
pub const POST_STATUS_PENDING: &str = "pending";
pub const POST_STATUS_APPROVED: &str = "approved";
pub const POST_STATUS_REJECTED: &str = "rejected";

/// A post row from the `posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub body: String,
    pub image: Option<String>,
    pub status: String,
    pub rejection_note: Option<String>,
    pub is_quote: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OwnedAttachments for Post {
    const FIELDS: &'static [AttachmentField] = &[AttachmentField {
        column: "image",
        subdir: "posts",
    }];
}

/// DTO for creating a post or quote.
#[derive(Debug, Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub body: String,
    pub image: Option<String>,
}

/// DTO for the owner editing their post.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub body: Option<String>,
    pub image: Option<String>,
}

/// A like row from the `post_likes` table. Unique per (user, post).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostLike {
    pub id: DbId,
    pub user_id: DbId,
    pub post_id: DbId,
    pub created_at: Timestamp,
}

/// A comment row from the `post_comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostComment {
    pub id: DbId,
    pub user_id: DbId,
    pub post_id: DbId,
    pub comment: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One feed entry: a post annotated with its aggregate social counters for
/// the requesting viewer. Computed in a single query (no per-item lookups).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FeedPost {
    pub id: DbId,
    pub user_id: DbId,
    pub user_name: String,
    pub user_image: Option<String>,
    pub title: String,
    pub body: String,
    pub image: Option<String>,
    pub status: String,
    pub is_quote: bool,
    pub created_at: Timestamp,
    /// Total number of likes on this post.
    pub likes_count: i64,
    /// Whether the requesting viewer has liked this post.
    pub liked: bool,
    /// Embedded comments, attached after the main query by a single batched
    /// fetch.
    #[sqlx(skip)]
    #[serde(default)]
    pub comments: Vec<PostComment>,
}
