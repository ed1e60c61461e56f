//! Shared fixtures for the db integration tests.

use sqlx::PgPool;
use warraq_db::models::book::{Book, CreateBook};
use warraq_db::models::user::{CreateUser, User};
use warraq_db::repositories::{BookRepo, UserRepo};

pub fn new_user(email: &str, name: &str) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        name: name.to_string(),
        provider: "local".to_string(),
        password_hash: Some("$argon2id$test".to_string()),
        role_id: None,
    }
}

pub fn new_book(title: &str) -> CreateBook {
    CreateBook {
        isbn: None,
        title: title.to_string(),
        description: Some("fixture".to_string()),
        price: Some(100.0),
        language: "Arabic".to_string(),
        pages: Some(200),
        sort_order: None,
        is_active: None,
        is_educational: None,
        discount: None,
        free: None,
        country: None,
        level: None,
        subject: None,
        school_year: None,
        content_type: None,
        trimester: None,
        publication_date: None,
        pdf: format!("{title}.pdf"),
        image: format!("{title}.png"),
        category_id: None,
        author_id: None,
        publisher_id: None,
    }
}

pub async fn create_user(pool: &PgPool, email: &str) -> User {
    UserRepo::create(pool, &new_user(email, "Fixture User"))
        .await
        .unwrap()
}

pub async fn create_book(pool: &PgPool, title: &str) -> Book {
    BookRepo::create(pool, &new_book(title)).await.unwrap()
}
