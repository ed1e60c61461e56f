//! Integration tests for the role permission matrix as enforced over HTTP.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, register};
use serde_json::json;
use sqlx::PgPool;
use warraq_core::permissions::ROLE_SUPER_ADMIN;
use warraq_db::models::user::UpdateUser;
use warraq_db::repositories::{RoleRepo, UserRepo};

/// Promote a registered user to the seeded superadmin role.
async fn promote_to_superadmin(pool: &PgPool, user_id: i64) {
    let role = RoleRepo::find_by_name(pool, ROLE_SUPER_ADMIN)
        .await
        .unwrap()
        .unwrap();
    UserRepo::update(
        pool,
        user_id,
        &UpdateUser {
            name: None,
            role_id: Some(role.id),
            author_id: None,
            publisher_id: None,
            is_active: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
}

// ---------------------------------------------------------------------------
// Test: the public catalog needs no token
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn book_list_is_public(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    let response = get(app, "/api/v1/books").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert!(body["data"].is_array());
}

// ---------------------------------------------------------------------------
// Test: default-role users cannot touch admin resources
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn regular_user_cannot_create_category(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let (token, _) = register(&app, "pleb@example.com").await;

    let response = post_json(
        app,
        "/api/v1/categories",
        Some(&token),
        &json!({ "name": "Poetry" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn regular_user_cannot_view_dashboard(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let (token, _) = register(&app, "pleb2@example.com").await;

    let response = get_auth(app, "/api/v1/analytics/dashboard", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Test: the superadmin role passes every gate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn superadmin_can_create_category(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (token, user_id) = register(&app, "root@example.com").await;
    promote_to_superadmin(&pool, user_id).await;

    // The token itself is unchanged; the role is re-read per request.
    let response = post_json(
        app,
        "/api/v1/categories",
        Some(&token),
        &json!({ "name": "Poetry" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "Poetry");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn superadmin_can_view_dashboard(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (token, user_id) = register(&app, "root2@example.com").await;
    promote_to_superadmin(&pool, user_id).await;

    let response = get_auth(app, "/api/v1/analytics/dashboard", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["data"]["counts"]["users"].is_i64());
}

// ---------------------------------------------------------------------------
// Test: built-in roles refuse edits and deletes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn immutable_role_cannot_be_deleted(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (token, user_id) = register(&app, "root3@example.com").await;
    promote_to_superadmin(&pool, user_id).await;

    let role = RoleRepo::find_by_name(&pool, ROLE_SUPER_ADMIN)
        .await
        .unwrap()
        .unwrap();

    let request = axum::http::Request::builder()
        .method(axum::http::Method::DELETE)
        .uri(format!("/api/v1/roles/{}", role.id))
        .header("authorization", format!("Bearer {token}"))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("cannot be deleted"));
}
