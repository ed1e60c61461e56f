//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use warraq_core::attachments::{AttachmentField, OwnedAttachments};
use warraq_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash and reset token -- NEVER serialize this to API
/// responses directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub provider: String,
    pub password_hash: Option<String>,
    pub image: Option<String>,
    pub country: Option<String>,
    pub gender: Option<String>,
    pub bio: Option<String>,
    pub role_id: Option<DbId>,
    pub author_id: Option<DbId>,
    pub publisher_id: Option<DbId>,
    pub subscription_id: Option<DbId>,
    pub subscription_expires_at: Option<Timestamp>,
    pub purchased_books: i32,
    pub offered_books: i32,
    pub is_active: bool,
    pub banned_at: Option<Timestamp>,
    pub ban_expire_at: Option<Timestamp>,
    pub ban_reason: Option<String>,
    pub password_reset_token: Option<String>,
    pub password_reset_expires: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OwnedAttachments for User {
    const FIELDS: &'static [AttachmentField] = &[AttachmentField {
        column: "image",
        subdir: "profile",
    }];
}

/// Safe user representation for API responses (no credentials).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub provider: String,
    pub image: Option<String>,
    pub country: Option<String>,
    pub gender: Option<String>,
    pub bio: Option<String>,
    pub role_id: Option<DbId>,
    pub author_id: Option<DbId>,
    pub publisher_id: Option<DbId>,
    pub subscription_id: Option<DbId>,
    pub subscription_expires_at: Option<Timestamp>,
    pub purchased_books: i32,
    pub offered_books: i32,
    pub is_active: bool,
    pub banned_at: Option<Timestamp>,
    pub ban_expire_at: Option<Timestamp>,
    pub ban_reason: Option<String>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            name: user.name,
            provider: user.provider,
            image: user.image,
            country: user.country,
            gender: user.gender,
            bio: user.bio,
            role_id: user.role_id,
            author_id: user.author_id,
            publisher_id: user.publisher_id,
            subscription_id: user.subscription_id,
            subscription_expires_at: user.subscription_expires_at,
            purchased_books: user.purchased_books,
            offered_books: user.offered_books,
            is_active: user.is_active,
            banned_at: user.banned_at,
            ban_expire_at: user.ban_expire_at,
            ban_reason: user.ban_reason,
            created_at: user.created_at,
        }
    }
}

/// DTO for inserting a new user. The password is already hashed by the
/// caller.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    pub provider: String,
    pub password_hash: Option<String>,
    pub role_id: Option<DbId>,
}

/// DTO for a user editing their own profile.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub country: Option<String>,
    pub gender: Option<String>,
    pub bio: Option<String>,
    pub image: Option<String>,
}

/// DTO for admin edits to a user row.
#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub role_id: Option<DbId>,
    pub author_id: Option<DbId>,
    pub publisher_id: Option<DbId>,
    pub is_active: Option<bool>,
}
