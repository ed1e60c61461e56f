//! Shared domain error taxonomy.
//!
//! Every fallible domain operation surfaces one of these variants; the api
//! crate maps them to HTTP status codes and the JSON error envelope.

use crate::types::DbId;

/// Domain-level error for all Warraq subsystems.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not resolve.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Missing, extra, or malformed input fields.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A unique-constraint violation surfaced as a business error.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Authenticated but lacking capability, banned, or not the owner.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Any other failure. The message is logged server-side, never exposed.
    #[error("Internal error: {0}")]
    Internal(String),
}
