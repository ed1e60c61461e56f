//! Multipart upload endpoint.
//!
//! Uploads happen before the entity mutation that references them: the
//! client uploads a file here, receives the stored name, and passes that
//! name in the subsequent create or update request.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use warraq_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::subdir_for_kind;

#[derive(Debug, Serialize)]
pub struct UploadedFile {
    pub name: String,
    pub url: String,
}

/// POST /api/v1/uploads/{kind}
///
/// Accepts one `file` field. The kind whitelist decides the storage
/// subdirectory; unknown kinds are rejected.
pub async fn upload(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(kind): Path<String>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<UploadedFile>>)> {
    let subdir = subdir_for_kind(&kind).ok_or_else(|| {
        AppError::BadRequest(format!("Unknown upload kind '{kind}'"))
    })?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(format!("Malformed multipart body: {err}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        if field_name != "file" {
            return Err(AppError::BadRequest(format!(
                "Unexpected field '{field_name}', only 'file' is accepted"
            )));
        }
        let original_name = field.file_name().unwrap_or("upload").to_string();
        if kind == "book-pdf" && !original_name.to_lowercase().ends_with(".pdf") {
            return Err(AppError::Core(CoreError::Validation(
                "Book PDFs must be .pdf files".into(),
            )));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|err| AppError::BadRequest(format!("Upload read failed: {err}")))?;
        if bytes.is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Uploaded file is empty".into(),
            )));
        }

        let name = state
            .storage
            .save(subdir, &original_name, &bytes)
            .await
            .map_err(|err| AppError::InternalError(format!("Upload write failed: {err}")))?;
        let url = format!("{}/uploads/{subdir}/{name}", state.config.public_url);
        return Ok((
            StatusCode::CREATED,
            Json(DataResponse::new(UploadedFile { name, url })),
        ));
    }

    Err(AppError::BadRequest("Missing 'file' field".into()))
}
