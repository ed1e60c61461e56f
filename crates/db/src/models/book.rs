//! Book entity model and DTOs.
//!
//! One physical table holds both public and educational books, split by
//! `is_educational`; repository queries always filter on that flag so the two
//! logical subtypes never leak into each other's listings.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use warraq_core::attachments::{AttachmentField, OwnedAttachments};
use warraq_core::types::{DbId, Timestamp};

/// A book row from the `books` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Book {
    pub id: DbId,
    pub isbn: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub language: String,
    pub pages: i32,
    pub views: i32,
    pub sort_order: i32,
    pub is_active: bool,
    pub is_educational: bool,
    pub discount: f64,
    pub free: bool,
    pub country: Option<String>,
    pub level: Option<String>,
    pub subject: Option<String>,
    pub school_year: Option<i32>,
    pub content_type: Option<String>,
    pub trimester: Option<String>,
    pub publication_date: Option<Timestamp>,
    pub pdf: String,
    pub image: String,
    pub category_id: Option<DbId>,
    pub author_id: Option<DbId>,
    pub publisher_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OwnedAttachments for Book {
    const FIELDS: &'static [AttachmentField] = &[
        AttachmentField {
            column: "pdf",
            subdir: "books/pdfs",
        },
        AttachmentField {
            column: "image",
            subdir: "books/images",
        },
    ];
}

/// DTO for creating a book. File names come from the upload service, the
/// rest from the multipart text fields.
#[derive(Debug, Deserialize)]
pub struct CreateBook {
    pub isbn: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub language: String,
    pub pages: Option<i32>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
    pub is_educational: Option<bool>,
    pub discount: Option<f64>,
    pub free: Option<bool>,
    pub country: Option<String>,
    pub level: Option<String>,
    pub subject: Option<String>,
    pub school_year: Option<i32>,
    pub content_type: Option<String>,
    pub trimester: Option<String>,
    pub publication_date: Option<Timestamp>,
    pub pdf: String,
    pub image: String,
    pub category_id: Option<DbId>,
    pub author_id: Option<DbId>,
    pub publisher_id: Option<DbId>,
}

/// DTO for updating a book. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBook {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub language: Option<String>,
    pub pages: Option<i32>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
    pub discount: Option<f64>,
    pub free: Option<bool>,
    pub country: Option<String>,
    pub level: Option<String>,
    pub subject: Option<String>,
    pub school_year: Option<i32>,
    pub content_type: Option<String>,
    pub trimester: Option<String>,
    pub publication_date: Option<Timestamp>,
    pub pdf: Option<String>,
    pub image: Option<String>,
    pub category_id: Option<DbId>,
    pub author_id: Option<DbId>,
    pub publisher_id: Option<DbId>,
}

/// Per-book sales summary for the author analytics view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookSales {
    pub id: DbId,
    pub title: String,
    pub price: f64,
    pub free: bool,
    pub discount: f64,
    pub views: i32,
    pub image: String,
    pub total_sales: i64,
    pub total_revenue: f64,
}
