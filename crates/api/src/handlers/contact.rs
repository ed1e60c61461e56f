//! Handlers for the contact-us inbox.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use warraq_core::error::CoreError;
use warraq_core::permissions::{Action, Resource};
use warraq_core::types::DbId;
use warraq_db::models::contact::{ContactMessage, CreateContactMessage};
use warraq_db::repositories::ContactRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Accepted message kinds; anything else falls back to `other` in the
/// repository default, so reject it explicitly here instead.
const VALID_KINDS: &[&str] = &["report", "thanks", "other"];

/// POST /api/v1/contact
///
/// Open to anonymous visitors; a signed-in caller gets attributed.
pub async fn submit(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Json(input): Json<CreateContactMessage>,
) -> AppResult<(StatusCode, Json<DataResponse<ContactMessage>>)> {
    if input.title.trim().is_empty() || input.description.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title and description must not be empty".into(),
        )));
    }
    if let Some(kind) = input.kind.as_deref() {
        if !VALID_KINDS.contains(&kind) {
            return Err(AppError::Core(CoreError::Validation(
                "Kind must be report, thanks, or other".into(),
            )));
        }
    }

    let message =
        ContactRepo::create(&state.pool, &input, user.as_ref().map(AuthUser::id)).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(message))))
}

/// GET /api/v1/contact
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<ContactMessage>>>> {
    user.require(Resource::ContactUs, Action::View)?;
    let messages = ContactRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(messages)))
}

/// DELETE /api/v1/contact/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    user.require(Resource::ContactUs, Action::Delete)?;
    if !ContactRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Contact message",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
