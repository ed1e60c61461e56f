//! Category entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use warraq_core::attachments::{AttachmentField, OwnedAttachments};
use warraq_core::types::{DbId, Timestamp};

/// A category row from the `categories` table. Referenced weakly by books.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OwnedAttachments for Category {
    const FIELDS: &'static [AttachmentField] = &[AttachmentField {
        column: "image",
        subdir: "category",
    }];
}

/// DTO for creating a new category.
#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
}

/// DTO for updating a category. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
}

/// A category annotated with its active-book count, for the analytics view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryWithBookCount {
    pub id: DbId,
    pub name: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub sort_order: i32,
    pub books_count: i64,
}
