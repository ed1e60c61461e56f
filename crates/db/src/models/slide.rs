//! Slide entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use warraq_core::attachments::{AttachmentField, OwnedAttachments};
use warraq_core::types::{DbId, Timestamp};

/// A slide row from the `slides` table: a promotional banner pointing at
/// exactly one of an author, a publisher, or a book.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Slide {
    pub id: DbId,
    pub image: String,
    pub author_id: Option<DbId>,
    pub publisher_id: Option<DbId>,
    pub book_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OwnedAttachments for Slide {
    const FIELDS: &'static [AttachmentField] = &[AttachmentField {
        column: "image",
        subdir: "slides",
    }];
}

/// DTO for creating a slide.
#[derive(Debug, Deserialize)]
pub struct CreateSlide {
    pub image: String,
    pub author_id: Option<DbId>,
    pub publisher_id: Option<DbId>,
    pub book_id: Option<DbId>,
}

/// DTO for updating a slide. Supplying a new target clears the previous one
/// in the same statement.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSlide {
    pub image: Option<String>,
    pub author_id: Option<DbId>,
    pub publisher_id: Option<DbId>,
    pub book_id: Option<DbId>,
}
