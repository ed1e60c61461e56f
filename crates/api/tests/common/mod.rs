//! Shared fixtures for the api integration tests.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use warraq_api::auth::jwt::JwtConfig;
use warraq_api::bootstrap;
use warraq_api::config::{ChargilyConfig, ServerConfig};
use warraq_api::mailer::Mailer;
use warraq_api::payments::ChargilyClient;
use warraq_api::router::build_app_router;
use warraq_api::state::AppState;
use warraq_api::storage::Storage;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout, and a per-run temp directory for uploads.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_root: PathBuf::from(std::env::temp_dir()).join(format!(
            "warraq-test-uploads-{}",
            std::process::id()
        )),
        public_url: "http://localhost:3000".to_string(),
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            expiry_hours: 72,
        },
        chargily: ChargilyConfig {
            base_url: "http://localhost:9".to_string(),
            secret_key: "test_sk".to_string(),
        },
        smtp: None,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool, and seed the built-in roles.
///
/// This mirrors the startup sequence in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub async fn build_test_app(pool: PgPool) -> Router {
    bootstrap::seed_roles(&pool).await.unwrap();

    let config = test_config();
    let state = AppState {
        pool,
        storage: Arc::new(Storage::new(config.upload_root.clone())),
        payments: Arc::new(ChargilyClient::new(config.chargily.clone())),
        mailer: Arc::new(Mailer::new(config.smtp.as_ref())),
        config: Arc::new(config.clone()),
    };

    build_app_router(state, &config)
}

/// Send a GET request to the app and return the raw response.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and an optional Bearer token.
pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: &Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a fresh account through the public endpoint and return its
/// bearer token plus user id.
pub async fn register(app: &Router, email: &str) -> (String, i64) {
    let response = post_json(
        app.clone(),
        "/api/v1/auth/register",
        None,
        &serde_json::json!({
            "email": email,
            "name": "Test User",
            "password": "correct-horse-battery",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let token = json["data"]["token"].as_str().unwrap().to_string();
    let user_id = json["data"]["user"]["id"].as_i64().unwrap();
    (token, user_id)
}
