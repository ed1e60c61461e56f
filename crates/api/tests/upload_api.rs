//! Integration tests for the multipart upload endpoint.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use common::{body_json, register};
use sqlx::PgPool;
use tower::ServiceExt;

const BOUNDARY: &str = "warraq-test-boundary";

/// Build a single-field multipart body with the given field name.
fn multipart_body(field_name: &str, file_name: &str, content: &str) -> String {
    format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{file_name}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    )
}

async fn post_multipart(app: Router, uri: &str, token: &str, body: String) -> axum::http::Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Test: a well-formed upload is stored and returns its public URL
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_stores_file_and_returns_url(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let (token, _) = register(&app, "uploader@example.com").await;

    let body = multipart_body("file", "portrait.png", "not really a png");
    let response = post_multipart(app, "/api/v1/uploads/author", &token, body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let name = json["data"]["name"].as_str().unwrap();
    assert!(name.ends_with(".png"), "stored name keeps the extension");
    assert!(json["data"]["url"]
        .as_str()
        .unwrap()
        .contains("/uploads/author/"));
}

// ---------------------------------------------------------------------------
// Test: unknown kinds are rejected
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_unknown_kind_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let (token, _) = register(&app, "uploader2@example.com").await;

    let body = multipart_body("file", "a.png", "x");
    let response = post_multipart(app, "/api/v1/uploads/malware", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: a stray field name is rejected, not skipped
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_stray_field_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let (token, _) = register(&app, "uploader3@example.com").await;

    let body = multipart_body("avatar", "a.png", "x");
    let response = post_multipart(app, "/api/v1/uploads/author", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(
        json["message"].as_str().unwrap().contains("avatar"),
        "the rejection names the stray field"
    );
}

// ---------------------------------------------------------------------------
// Test: book PDFs must carry a .pdf name
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_book_pdf_rejects_other_extensions(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let (token, _) = register(&app, "uploader4@example.com").await;

    let body = multipart_body("file", "book.epub", "x");
    let response = post_multipart(app, "/api/v1/uploads/book-pdf", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
