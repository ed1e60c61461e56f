//! Integration tests for posts, quotes, likes, comments, and the feed
//! aggregation.

mod common;

use common::{create_book, create_user};
use sqlx::PgPool;
use warraq_db::models::post::{CreatePost, UpdatePost, POST_STATUS_APPROVED, POST_STATUS_PENDING, POST_STATUS_REJECTED};
use warraq_db::models::review::CreateReview;
use warraq_db::repositories::{PostRepo, ReviewRepo};

fn new_post(title: &str) -> CreatePost {
    CreatePost {
        title: title.to_string(),
        body: "body".to_string(),
        image: None,
    }
}

// ---------------------------------------------------------------------------
// Test: like toggling flips state and never double-counts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_like_toggle(pool: PgPool) {
    let author = create_user(&pool, "author@example.com").await;
    let fan = create_user(&pool, "fan@example.com").await;
    let post = PostRepo::create(&pool, author.id, &new_post("Likeable"), false)
        .await
        .unwrap();
    PostRepo::set_status(&pool, post.id, POST_STATUS_APPROVED, None)
        .await
        .unwrap();

    assert!(PostRepo::toggle_like(&pool, post.id, fan.id).await.unwrap());
    let feed = PostRepo::list_feed(&pool, fan.id, false).await.unwrap();
    assert_eq!(feed[0].likes_count, 1);
    assert!(feed[0].liked);

    assert!(!PostRepo::toggle_like(&pool, post.id, fan.id).await.unwrap());
    let feed = PostRepo::list_feed(&pool, fan.id, false).await.unwrap();
    assert_eq!(feed[0].likes_count, 0);
    assert!(!feed[0].liked);
}

// ---------------------------------------------------------------------------
// Test: feed shows only approved posts of the requested subtype
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_feed_filters_status_and_subtype(pool: PgPool) {
    let author = create_user(&pool, "feeder@example.com").await;

    let approved = PostRepo::create(&pool, author.id, &new_post("Approved"), false)
        .await
        .unwrap();
    PostRepo::set_status(&pool, approved.id, POST_STATUS_APPROVED, None)
        .await
        .unwrap();

    // Pending post and approved quote must both stay out of the post feed.
    PostRepo::create(&pool, author.id, &new_post("Pending"), false)
        .await
        .unwrap();
    let quote = PostRepo::create(&pool, author.id, &new_post("Quote"), true)
        .await
        .unwrap();
    PostRepo::set_status(&pool, quote.id, POST_STATUS_APPROVED, None)
        .await
        .unwrap();

    let feed = PostRepo::list_feed(&pool, author.id, false).await.unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].title, "Approved");
    assert_eq!(feed[0].user_name, "Fixture User");

    let quotes = PostRepo::list_feed(&pool, author.id, true).await.unwrap();
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].title, "Quote");
}

// ---------------------------------------------------------------------------
// Test: comments come back attached to their posts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_feed_attaches_comments(pool: PgPool) {
    let author = create_user(&pool, "commenter@example.com").await;
    let post_a = PostRepo::create(&pool, author.id, &new_post("A"), false)
        .await
        .unwrap();
    let post_b = PostRepo::create(&pool, author.id, &new_post("B"), false)
        .await
        .unwrap();
    for post in [&post_a, &post_b] {
        PostRepo::set_status(&pool, post.id, POST_STATUS_APPROVED, None)
            .await
            .unwrap();
    }
    PostRepo::add_comment(&pool, post_a.id, author.id, "first").await.unwrap();
    PostRepo::add_comment(&pool, post_a.id, author.id, "second").await.unwrap();

    let feed = PostRepo::list_feed(&pool, author.id, false).await.unwrap();
    let a = feed.iter().find(|p| p.id == post_a.id).unwrap();
    let b = feed.iter().find(|p| p.id == post_b.id).unwrap();
    assert_eq!(a.comments.len(), 2);
    assert_eq!(a.comments[0].comment, "first");
    assert!(b.comments.is_empty());
}

// ---------------------------------------------------------------------------
// Test: owner edits reset moderation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_owner_edit_resets_to_pending(pool: PgPool) {
    let author = create_user(&pool, "editor@example.com").await;
    let post = PostRepo::create(&pool, author.id, &new_post("Edited"), false)
        .await
        .unwrap();
    PostRepo::set_status(&pool, post.id, POST_STATUS_REJECTED, Some("tone"))
        .await
        .unwrap();

    let edited = PostRepo::update_own(
        &pool,
        post.id,
        author.id,
        &UpdatePost {
            body: Some("reworded".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(edited.status, POST_STATUS_PENDING);
    assert_eq!(edited.rejection_note, None);
    assert_eq!(edited.body, "reworded");
}

// ---------------------------------------------------------------------------
// Test: only the owner can edit
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_non_owner_edit_matches_nothing(pool: PgPool) {
    let author = create_user(&pool, "owner@example.com").await;
    let intruder = create_user(&pool, "intruder@example.com").await;
    let post = PostRepo::create(&pool, author.id, &new_post("Protected"), false)
        .await
        .unwrap();

    let result = PostRepo::update_own(
        &pool,
        post.id,
        intruder.id,
        &UpdatePost {
            body: Some("hijacked".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(result.is_none(), "edit scoped to the owner should miss");
}

// ---------------------------------------------------------------------------
// Test: one review per (user, book); reads count once per reader
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_review_unique_and_read_once(pool: PgPool) {
    let reader = create_user(&pool, "reader@example.com").await;
    let book = create_book(&pool, "reviewed-book").await;

    ReviewRepo::create(
        &pool,
        reader.id,
        &CreateReview {
            book_id: book.id,
            rating: 5,
            comment: Some("great".to_string()),
        },
    )
    .await
    .unwrap();

    let err = ReviewRepo::create(
        &pool,
        reader.id,
        &CreateReview {
            book_id: book.id,
            rating: 1,
            comment: None,
        },
    )
    .await
    .unwrap_err();
    assert!(warraq_db::is_unique_violation(
        &err,
        Some("uq_book_reviews_user_book")
    ));

    assert!(ReviewRepo::record_read(&pool, reader.id, book.id).await.unwrap());
    assert!(!ReviewRepo::record_read(&pool, reader.id, book.id).await.unwrap());

    let top = ReviewRepo::top_readers(&pool, 7, 10).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].books_read, 1);
}
