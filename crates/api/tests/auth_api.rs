//! Integration tests for registration, login, and the auth guard.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, register};
use serde_json::json;
use sqlx::PgPool;
use warraq_db::repositories::UserRepo;

// ---------------------------------------------------------------------------
// Test: register returns a token and the created user
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn register_returns_token_and_user(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    let response = post_json(
        app,
        "/api/v1/auth/register",
        None,
        &json!({
            "email": "Reader@Example.Com",
            "name": "Reader",
            "password": "long-enough-password",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert!(body["data"]["token"].is_string());
    // Email is normalized to lowercase on the way in.
    assert_eq!(body["data"]["user"]["email"], "reader@example.com");
    // The password hash must never leak into a response.
    assert!(body["data"]["user"].get("password_hash").is_none());
}

// ---------------------------------------------------------------------------
// Test: duplicate email registration conflicts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn register_duplicate_email_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    register(&app, "dup@example.com").await;

    let response = post_json(
        app,
        "/api/v1/auth/register",
        None,
        &json!({
            "email": "dup@example.com",
            "name": "Second",
            "password": "long-enough-password",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "CONFLICT");
}

// ---------------------------------------------------------------------------
// Test: short passwords are rejected up front
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn register_short_password_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    let response = post_json(
        app,
        "/api/v1/auth/register",
        None,
        &json!({
            "email": "short@example.com",
            "name": "Short",
            "password": "abc",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: login with wrong password is rejected with a vague message
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn login_wrong_password_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    register(&app, "login@example.com").await;

    let response = post_json(
        app,
        "/api/v1/auth/login",
        None,
        &json!({
            "email": "login@example.com",
            "password": "not-the-password",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    // The message must not reveal whether the account exists.
    assert_eq!(body["message"], "Invalid email or password");
}

// ---------------------------------------------------------------------------
// Test: /auth/me round-trips the token
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn me_returns_current_user(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let (token, user_id) = register(&app, "me@example.com").await;

    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["id"], user_id);
    assert_eq!(body["data"]["email"], "me@example.com");
}

// ---------------------------------------------------------------------------
// Test: protected routes reject missing and garbage tokens
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn me_without_token_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    let response = common::get(app, "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn me_with_garbage_token_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    let response = get_auth(app, "/api/v1/auth/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Test: a banned account is locked out of every guarded route
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn banned_user_is_rejected_with_403(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (token, user_id) = register(&app, "banned@example.com").await;

    UserRepo::ban(&pool, user_id, Some("spam"), None)
        .await
        .unwrap()
        .unwrap();

    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("banned"));
}

// ---------------------------------------------------------------------------
// Test: an expired temporary ban clears itself on the next request
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn expired_ban_is_cleared_on_next_request(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let (token, user_id) = register(&app, "lapsed@example.com").await;

    let yesterday = chrono::Utc::now() - chrono::Duration::days(1);
    UserRepo::ban(&pool, user_id, Some("cooldown"), Some(yesterday))
        .await
        .unwrap()
        .unwrap();

    // The lapsed ban lets the request through and is wiped in the database.
    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let user = UserRepo::find_by_id(&pool, user_id).await.unwrap().unwrap();
    assert!(user.banned_at.is_none());
    assert!(user.is_active);
}

// ---------------------------------------------------------------------------
// Test: change-password requires the current password
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn change_password_rejects_wrong_current(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let (token, _) = register(&app, "changer@example.com").await;

    let response = post_json(
        app,
        "/api/v1/auth/change-password",
        Some(&token),
        &json!({
            "current_password": "wrong-password-here",
            "new_password": "another-long-password",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
