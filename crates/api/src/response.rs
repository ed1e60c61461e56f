//! Shared response envelope types for API handlers.
//!
//! Success responses use a `{ "success": true, "data": ... }` envelope; the
//! matching error envelope lives in [`crate::error`]. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!` to get compile-time type safety.

use serde::Serialize;

/// Standard `{ "success": true, "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        DataResponse {
            success: true,
            data,
        }
    }
}

/// Standard `{ "success": true, "message": ... }` envelope for operations
/// with no payload.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            success: true,
            message: message.into(),
        }
    }
}
