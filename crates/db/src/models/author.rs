//! Author entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use warraq_core::attachments::{AttachmentField, OwnedAttachments};
use warraq_core::types::{DbId, Timestamp};

/// An author row from the `authors` table.
///
/// Books reference authors weakly: deleting an author nullifies
/// `books.author_id`, never the books themselves.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Author {
    pub id: DbId,
    pub name: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub facebook: Option<String>,
    pub youtube: Option<String>,
    pub telegram: Option<String>,
    pub whatsapp: Option<String>,
    pub instagram: Option<String>,
    pub is_verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OwnedAttachments for Author {
    const FIELDS: &'static [AttachmentField] = &[AttachmentField {
        column: "image",
        subdir: "author",
    }];
}

/// DTO for creating a new author.
#[derive(Debug, Deserialize)]
pub struct CreateAuthor {
    pub name: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub facebook: Option<String>,
    pub youtube: Option<String>,
    pub telegram: Option<String>,
    pub whatsapp: Option<String>,
    pub instagram: Option<String>,
    pub is_verified: Option<bool>,
}

/// DTO for updating an author. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAuthor {
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub facebook: Option<String>,
    pub youtube: Option<String>,
    pub telegram: Option<String>,
    pub whatsapp: Option<String>,
    pub instagram: Option<String>,
    pub is_verified: Option<bool>,
}
