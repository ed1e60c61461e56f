//! Publisher entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use warraq_core::attachments::{AttachmentField, OwnedAttachments};
use warraq_core::types::{DbId, Timestamp};

/// A publisher row from the `publishers` table. Referenced weakly by books.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Publisher {
    pub id: DbId,
    pub name: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub is_verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OwnedAttachments for Publisher {
    const FIELDS: &'static [AttachmentField] = &[AttachmentField {
        column: "image",
        subdir: "publisher",
    }];
}

/// DTO for creating a new publisher.
#[derive(Debug, Deserialize)]
pub struct CreatePublisher {
    pub name: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub is_verified: Option<bool>,
}

/// DTO for updating a publisher. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePublisher {
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub is_verified: Option<bool>,
}
