//! Role entity model.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use warraq_core::permissions::PermissionMatrix;
use warraq_core::types::{DbId, Timestamp};

/// A role row from the `roles` table.
///
/// `immutable` marks the seeded roles (`SuperAdmin`, `User`), which can never
/// be edited or deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub permissions: Json<PermissionMatrix>,
    pub immutable: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new role.
#[derive(Debug, Deserialize)]
pub struct CreateRole {
    pub name: String,
    pub permissions: PermissionMatrix,
}

/// DTO for updating an existing role. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateRole {
    pub name: Option<String>,
    pub permissions: Option<PermissionMatrix>,
}
