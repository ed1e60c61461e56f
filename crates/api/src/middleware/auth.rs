//! Authorization guard extractor.
//!
//! Every protected handler takes [`AuthUser`]. Extraction runs the full
//! guard pipeline in order: token, user lookup, ban state, and finally
//! exposes capability checks against the user's role matrix. The token
//! carries only the user id, so role edits, bans, and deletions take effect
//! on the very next request.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use warraq_core::ban::{self, BanStatus};
use warraq_core::error::CoreError;
use warraq_core::permissions::{Action, PermissionMatrix, Resource};
use warraq_core::types::DbId;
use warraq_db::models::user::User;
use warraq_db::repositories::{RoleRepo, UserRepo};

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user with their role's permission matrix.
///
/// ```ignore
/// async fn handler(user: AuthUser) -> AppResult<Json<()>> {
///     user.require(Resource::PublicBooks, Action::Create)?;
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
    matrix: PermissionMatrix,
    dashboard_access: bool,
}

impl AuthUser {
    pub fn id(&self) -> DbId {
        self.user.id
    }

    /// Does the user's role grant `action` on `resource`?
    pub fn can(&self, resource: Resource, action: Action) -> bool {
        self.matrix.has_capability(resource, action)
    }

    /// Require a capability, rejecting with 403 otherwise.
    pub fn require(&self, resource: Resource, action: Action) -> Result<(), AppError> {
        if self.can(resource, action) {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::Forbidden(format!(
                "Missing {action:?} permission on {}",
                resource.name()
            ))))
        }
    }

    /// Require dashboard access, rejecting with 403 otherwise.
    pub fn require_dashboard(&self) -> Result<(), AppError> {
        if self.dashboard_access {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::Forbidden(
                "Dashboard access required".into(),
            )))
        }
    }

    /// Pass when the caller owns the row or holds the manage capability on
    /// `resource`. The ownership escape hatch for admin tooling.
    pub fn require_owner_or_manage(
        &self,
        owner_id: DbId,
        resource: Resource,
    ) -> Result<(), AppError> {
        if self.user.id == owner_id || self.can(resource, Action::Manage) {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::Forbidden(
                "Not the owner of this resource".into(),
            )))
        }
    }
}

/// Pull the token from the `Authorization: Bearer` header or, failing that,
/// the `token` cookie.
fn extract_token(parts: &Parts) -> Option<String> {
    if let Some(token) = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        return Some(token.to_string());
    }

    parts
        .headers
        .get("cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                (name == "token").then(|| value.to_string())
            })
        })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts).ok_or_else(|| {
            AppError::Core(CoreError::Unauthenticated("Missing access token".into()))
        })?;

        let claims = validate_token(&token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthenticated(
                "Invalid or expired token".into(),
            ))
        })?;

        // The user is re-read on every request; a deleted user's valid
        // token is worthless.
        let mut user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthenticated("Account no longer exists".into()))
            })?;

        match ban::evaluate(
            user.banned_at,
            user.ban_expire_at,
            user.ban_reason.as_deref(),
            chrono::Utc::now(),
        ) {
            BanStatus::NotBanned => {}
            BanStatus::Permanent { reason } => {
                return Err(AppError::Core(CoreError::Forbidden(format!(
                    "Account banned: {}",
                    reason.unwrap_or_else(|| "no reason given".into())
                ))));
            }
            BanStatus::Temporary { reason, expires_at } => {
                return Err(AppError::Core(CoreError::Forbidden(format!(
                    "Account banned until {expires_at}: {}",
                    reason.unwrap_or_else(|| "no reason given".into())
                ))));
            }
            BanStatus::Expired => {
                // The ban lapsed; clear it before letting the request in.
                UserRepo::clear_ban(&state.pool, user.id).await?;
                user.banned_at = None;
                user.ban_expire_at = None;
                user.ban_reason = None;
                user.is_active = true;
            }
        }

        if !user.is_active {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is deactivated".into(),
            )));
        }

        let (matrix, dashboard_access) = match user.role_id {
            Some(role_id) => match RoleRepo::find_by_id(&state.pool, role_id).await? {
                Some(role) => {
                    let dashboard = role.permissions.dashboard.access;
                    (role.permissions.0, dashboard)
                }
                // A dangling role denies everything rather than erroring.
                None => (PermissionMatrix::default(), false),
            },
            None => (PermissionMatrix::default(), false),
        };

        Ok(AuthUser {
            user,
            matrix,
            dashboard_access,
        })
    }
}

/// `Option<AuthUser>` for endpoints open to anonymous callers. No token
/// means anonymous; a present but bad token is still rejected so a banned
/// user cannot slip through by sending their stale credentials.
impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        if extract_token(parts).is_none() {
            return Ok(None);
        }
        <AuthUser as FromRequestParts<AppState>>::from_request_parts(parts, state)
            .await
            .map(Some)
    }
}
