//! Domain logic for the Warraq bookstore platform.
//!
//! This crate holds pure business rules with no database or HTTP
//! dependencies: the permission matrix, ban evaluation, pricing, the
//! exclusive-reference validator, owned-attachment declarations, and the
//! shared error taxonomy. All data access lives in `warraq-db`, all
//! transport concerns in `warraq-api`.

pub mod attachments;
pub mod ban;
pub mod error;
pub mod exclusive;
pub mod permissions;
pub mod pricing;
pub mod subscription;
pub mod types;
