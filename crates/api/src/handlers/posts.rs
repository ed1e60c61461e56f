//! Handlers for the `/posts` and `/quotes` resources.
//!
//! Quotes are posts with `is_quote = true` and their own permission
//! resource; both route trees share the implementations below through thin
//! wrappers that pin the subtype.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use warraq_core::attachments::{replaced_file, OwnedAttachments};
use warraq_core::error::CoreError;
use warraq_core::permissions::{Action, Resource};
use warraq_core::types::DbId;
use warraq_db::cascade;
use warraq_db::models::post::{
    CreatePost, FeedPost, Post, PostComment, UpdatePost, POST_STATUS_APPROVED,
    POST_STATUS_PENDING, POST_STATUS_REJECTED,
};
use warraq_db::repositories::PostRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// --- shared implementations -----------------------------------------------

async fn create_inner(
    state: AppState,
    user: AuthUser,
    input: CreatePost,
    is_quote: bool,
) -> AppResult<(StatusCode, Json<DataResponse<Post>>)> {
    if input.title.trim().is_empty() || input.body.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title and body must not be empty".into(),
        )));
    }
    let post = PostRepo::create(&state.pool, user.id(), &input, is_quote).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(post))))
}

async fn feed_inner(
    state: AppState,
    user: AuthUser,
    is_quote: bool,
) -> AppResult<Json<DataResponse<Vec<FeedPost>>>> {
    let posts = PostRepo::list_feed(&state.pool, user.id(), is_quote).await?;
    Ok(Json(DataResponse::new(posts)))
}

async fn mine_inner(
    state: AppState,
    user: AuthUser,
    is_quote: bool,
) -> AppResult<Json<DataResponse<Vec<Post>>>> {
    let posts = PostRepo::list_own(&state.pool, user.id(), is_quote).await?;
    Ok(Json(DataResponse::new(posts)))
}

#[derive(Debug, Deserialize)]
pub struct AdminListQuery {
    pub status: Option<String>,
}

async fn admin_list_inner(
    state: AppState,
    user: AuthUser,
    query: AdminListQuery,
    is_quote: bool,
    resource: Resource,
) -> AppResult<Json<DataResponse<Vec<Post>>>> {
    user.require(resource, Action::Manage)?;
    if let Some(status) = query.status.as_deref() {
        if ![POST_STATUS_PENDING, POST_STATUS_APPROVED, POST_STATUS_REJECTED].contains(&status) {
            return Err(AppError::Core(CoreError::Validation(
                "Unknown post status".into(),
            )));
        }
    }
    let posts = PostRepo::list_admin(&state.pool, is_quote, query.status.as_deref()).await?;
    Ok(Json(DataResponse::new(posts)))
}

async fn update_inner(
    state: AppState,
    user: AuthUser,
    id: DbId,
    input: UpdatePost,
) -> AppResult<Json<DataResponse<Post>>> {
    let existing = PostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;
    if existing.user_id != user.id() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not the owner of this resource".into(),
        )));
    }

    // update_own re-checks ownership, so a lost race just yields not-found.
    let updated = PostRepo::update_own(&state.pool, id, user.id(), &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;

    if let Some(file) = replaced_file(
        Post::FIELDS[0],
        existing.image.as_deref(),
        updated.image.as_deref(),
    ) {
        state.storage.remove(&file).await;
    }

    Ok(Json(DataResponse::new(updated)))
}

#[derive(Debug, Deserialize)]
pub struct ModerateRequest {
    pub status: String,
    pub rejection_note: Option<String>,
}

async fn moderate_inner(
    state: AppState,
    user: AuthUser,
    id: DbId,
    input: ModerateRequest,
    resource: Resource,
) -> AppResult<Json<DataResponse<Post>>> {
    user.require(resource, Action::Manage)?;
    if ![POST_STATUS_APPROVED, POST_STATUS_REJECTED].contains(&input.status.as_str()) {
        return Err(AppError::Core(CoreError::Validation(
            "Status must be approved or rejected".into(),
        )));
    }
    let post = PostRepo::set_status(&state.pool, id, &input.status, input.rejection_note.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;
    Ok(Json(DataResponse::new(post)))
}

async fn delete_inner(
    state: AppState,
    user: AuthUser,
    id: DbId,
    resource: Resource,
) -> AppResult<StatusCode> {
    let existing = PostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;
    user.require_owner_or_manage(existing.user_id, resource)?;

    let files = cascade::delete_post(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;
    state.storage.remove_all(&files).await;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, serde::Serialize)]
pub struct LikeResponse {
    pub liked: bool,
}

async fn toggle_like_inner(
    state: AppState,
    user: AuthUser,
    id: DbId,
) -> AppResult<Json<DataResponse<LikeResponse>>> {
    PostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;
    let liked = PostRepo::toggle_like(&state.pool, id, user.id()).await?;
    Ok(Json(DataResponse::new(LikeResponse { liked })))
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub comment: String,
}

async fn add_comment_inner(
    state: AppState,
    user: AuthUser,
    id: DbId,
    input: CommentRequest,
) -> AppResult<(StatusCode, Json<DataResponse<PostComment>>)> {
    if input.comment.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Comment must not be empty".into(),
        )));
    }
    PostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;
    let comment = PostRepo::add_comment(&state.pool, id, user.id(), input.comment.trim()).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(comment))))
}

async fn delete_comment_inner(
    state: AppState,
    user: AuthUser,
    comment_id: DbId,
) -> AppResult<StatusCode> {
    if !PostRepo::delete_comment(&state.pool, comment_id, user.id()).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id: comment_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// --- /posts ----------------------------------------------------------------

/// POST /api/v1/posts
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreatePost>,
) -> AppResult<(StatusCode, Json<DataResponse<Post>>)> {
    create_inner(state, user, input, false).await
}

/// GET /api/v1/posts
pub async fn feed(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<FeedPost>>>> {
    feed_inner(state, user, false).await
}

/// GET /api/v1/posts/me
pub async fn mine(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Post>>>> {
    mine_inner(state, user, false).await
}

/// GET /api/v1/posts/admin?status=pending
pub async fn admin_list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<AdminListQuery>,
) -> AppResult<Json<DataResponse<Vec<Post>>>> {
    admin_list_inner(state, user, query, false, Resource::Posts).await
}

/// PUT /api/v1/posts/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePost>,
) -> AppResult<Json<DataResponse<Post>>> {
    update_inner(state, user, id, input).await
}

/// POST /api/v1/posts/{id}/moderate
pub async fn moderate(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ModerateRequest>,
) -> AppResult<Json<DataResponse<Post>>> {
    moderate_inner(state, user, id, input, Resource::Posts).await
}

/// DELETE /api/v1/posts/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    delete_inner(state, user, id, Resource::Posts).await
}

/// POST /api/v1/posts/{id}/like
pub async fn toggle_like(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LikeResponse>>> {
    toggle_like_inner(state, user, id).await
}

/// POST /api/v1/posts/{id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CommentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<PostComment>>)> {
    add_comment_inner(state, user, id, input).await
}

/// DELETE /api/v1/comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    delete_comment_inner(state, user, id).await
}

// --- /quotes ---------------------------------------------------------------

/// POST /api/v1/quotes
pub async fn create_quote(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreatePost>,
) -> AppResult<(StatusCode, Json<DataResponse<Post>>)> {
    create_inner(state, user, input, true).await
}

/// GET /api/v1/quotes
pub async fn quote_feed(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<FeedPost>>>> {
    feed_inner(state, user, true).await
}

/// GET /api/v1/quotes/me
pub async fn my_quotes(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Post>>>> {
    mine_inner(state, user, true).await
}

/// GET /api/v1/quotes/admin?status=pending
pub async fn admin_list_quotes(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<AdminListQuery>,
) -> AppResult<Json<DataResponse<Vec<Post>>>> {
    admin_list_inner(state, user, query, true, Resource::Quotes).await
}

/// POST /api/v1/quotes/{id}/moderate
pub async fn moderate_quote(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ModerateRequest>,
) -> AppResult<Json<DataResponse<Post>>> {
    moderate_inner(state, user, id, input, Resource::Quotes).await
}

/// DELETE /api/v1/quotes/{id}
pub async fn delete_quote(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    delete_inner(state, user, id, Resource::Quotes).await
}
