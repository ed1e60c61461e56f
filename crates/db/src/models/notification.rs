//! Notification entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use warraq_core::attachments::{AttachmentField, OwnedAttachments};
use warraq_core::types::{DbId, Timestamp};

/// A notification row from the `notifications` table.
///
/// Targets everyone (`to_all`) or one user (`to_one`), never both; visible
/// while active and inside its `[begin_at, end_at]` window.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub to_all: bool,
    pub to_one: Option<DbId>,
    pub begin_at: Timestamp,
    pub end_at: Timestamp,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OwnedAttachments for Notification {
    const FIELDS: &'static [AttachmentField] = &[AttachmentField {
        column: "image",
        subdir: "notification",
    }];
}

/// DTO for creating a notification.
#[derive(Debug, Deserialize)]
pub struct CreateNotification {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub to_all: bool,
    pub to_one: Option<DbId>,
    pub begin_at: Timestamp,
    pub end_at: Timestamp,
    pub is_active: Option<bool>,
}

/// DTO for updating a notification.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateNotification {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub to_all: Option<bool>,
    pub to_one: Option<DbId>,
    pub begin_at: Option<Timestamp>,
    pub end_at: Option<Timestamp>,
    pub is_active: Option<bool>,
}
