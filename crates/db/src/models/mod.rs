//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Entities owning file attachments implement
//! [`warraq_core::attachments::OwnedAttachments`].

pub mod author;
pub mod book;
pub mod book_user;
pub mod cart;
pub mod category;
pub mod contact;
pub mod coupon;
pub mod currency;
pub mod interest;
pub mod notification;
pub mod post;
pub mod publisher;
pub mod review;
pub mod role;
pub mod slide;
pub mod subscription;
pub mod user;
