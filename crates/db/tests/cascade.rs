//! Integration tests for the cascade engine: owned rows die with their
//! parent, detachable references are nullified, and attachment snapshots
//! list every file the deleted rows owned.

mod common;

use common::{create_book, create_user};
use sqlx::PgPool;
use warraq_core::attachments::StoredFile;
use warraq_db::cascade;
use warraq_db::models::author::CreateAuthor;
use warraq_db::models::category::CreateCategory;
use warraq_db::models::coupon::CreateCoupons;
use warraq_db::models::post::CreatePost;
use warraq_db::models::review::CreateReview;
use warraq_db::models::slide::CreateSlide;
use warraq_db::repositories::{
    AuthorRepo, BookRepo, BookUserRepo, CartRepo, CategoryRepo, CouponRepo, InterestRepo,
    PostRepo, ReviewRepo, SlideRepo,
};

async fn count(pool: &PgPool, query: &str) -> i64 {
    let (n,): (i64,) = sqlx::query_as(query).fetch_one(pool).await.unwrap();
    n
}

// ---------------------------------------------------------------------------
// Test: deleting a book removes every strictly-owned row
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_book_cascades_owned_rows(pool: PgPool) {
    let user = create_user(&pool, "cascade-book@example.com").await;
    let book = create_book(&pool, "cascade-book").await;

    ReviewRepo::create(
        &pool,
        user.id,
        &CreateReview {
            book_id: book.id,
            rating: 4,
            comment: None,
        },
    )
    .await
    .unwrap();
    ReviewRepo::record_read(&pool, user.id, book.id).await.unwrap();
    CartRepo::create(&pool, user.id, book.id).await.unwrap();
    BookUserRepo::grant(&pool, user.id, book.id).await.unwrap();
    CouponRepo::create_batch(
        &pool,
        &CreateCoupons {
            count: 2,
            discount: 10.0,
            book_id: Some(book.id),
            subscription_id: None,
        },
    )
    .await
    .unwrap();
    SlideRepo::create(
        &pool,
        &CreateSlide {
            image: "banner.png".to_string(),
            author_id: None,
            publisher_id: None,
            book_id: Some(book.id),
        },
    )
    .await
    .unwrap();

    let files = cascade::delete_book(&pool, book.id).await.unwrap().unwrap();

    assert!(BookRepo::find_by_id(&pool, book.id).await.unwrap().is_none());
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM book_reviews").await, 0);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM book_reads").await, 0);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM carts").await, 0);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM book_users").await, 0);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM coupons").await, 0);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM slides").await, 0);

    // Snapshot lists the book's pdf and cover plus the deleted slide image.
    assert!(files.contains(&StoredFile::new("books/pdfs", "cascade-book.pdf")));
    assert!(files.contains(&StoredFile::new("books/images", "cascade-book.png")));
    assert!(files.contains(&StoredFile::new("slides", "banner.png")));
    assert_eq!(files.len(), 3);
}

// ---------------------------------------------------------------------------
// Test: deleting a missing book reports None and touches nothing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_missing_book_is_none(pool: PgPool) {
    let result = cascade::delete_book(&pool, 424_242).await.unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Test: deleting an author detaches books instead of deleting them
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_author_detaches_books(pool: PgPool) {
    let author = AuthorRepo::create(
        &pool,
        &CreateAuthor {
            name: "Cascade Author".to_string(),
            image: Some("portrait.png".to_string()),
            description: None,
            facebook: None,
            youtube: None,
            telegram: None,
            whatsapp: None,
            instagram: None,
            is_verified: None,
        },
    )
    .await
    .unwrap();

    let mut input = common::new_book("authored-book");
    input.author_id = Some(author.id);
    let book = BookRepo::create(&pool, &input).await.unwrap();

    let files = cascade::delete_author(&pool, author.id).await.unwrap().unwrap();
    assert_eq!(files, vec![StoredFile::new("author", "portrait.png")]);

    let survivor = BookRepo::find_by_id(&pool, book.id).await.unwrap().unwrap();
    assert_eq!(survivor.author_id, None, "book survives with the link cleared");
}

// ---------------------------------------------------------------------------
// Test: deleting a category detaches books and drops interests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_category_detaches_books_drops_interests(pool: PgPool) {
    let user = create_user(&pool, "cascade-cat@example.com").await;
    let category = CategoryRepo::create(
        &pool,
        &CreateCategory {
            name: "Cascade Cat".to_string(),
            image: None,
            description: None,
            sort_order: None,
        },
    )
    .await
    .unwrap();

    let mut input = common::new_book("categorized-book");
    input.category_id = Some(category.id);
    let book = BookRepo::create(&pool, &input).await.unwrap();
    InterestRepo::add(&pool, user.id, category.id).await.unwrap();

    cascade::delete_category(&pool, category.id).await.unwrap().unwrap();

    let survivor = BookRepo::find_by_id(&pool, book.id).await.unwrap().unwrap();
    assert_eq!(survivor.category_id, None);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM user_interests").await, 0);
}

// ---------------------------------------------------------------------------
// Test: deleting a post removes its likes and comments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_post_cascades_social_rows(pool: PgPool) {
    let author = create_user(&pool, "cascade-post@example.com").await;
    let fan = create_user(&pool, "cascade-fan@example.com").await;

    let post = PostRepo::create(
        &pool,
        author.id,
        &CreatePost {
            title: "Doomed".to_string(),
            body: "soon gone".to_string(),
            image: Some("doomed.png".to_string()),
        },
        false,
    )
    .await
    .unwrap();
    PostRepo::toggle_like(&pool, post.id, fan.id).await.unwrap();
    PostRepo::add_comment(&pool, post.id, fan.id, "nice").await.unwrap();

    let files = cascade::delete_post(&pool, post.id).await.unwrap().unwrap();
    assert_eq!(files, vec![StoredFile::new("posts", "doomed.png")]);

    assert!(PostRepo::find_by_id(&pool, post.id).await.unwrap().is_none());
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM post_likes").await, 0);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM post_comments").await, 0);
}

// ---------------------------------------------------------------------------
// Test: deleting a user takes their posts (and those posts' likes from
// other users) while redeemed coupons survive detached
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_user_full_cascade(pool: PgPool) {
    let doomed = create_user(&pool, "cascade-user@example.com").await;
    let other = create_user(&pool, "cascade-other@example.com").await;
    let book = create_book(&pool, "cascade-user-book").await;

    let post = PostRepo::create(
        &pool,
        doomed.id,
        &CreatePost {
            title: "Mine".to_string(),
            body: "owned".to_string(),
            image: Some("mine.png".to_string()),
        },
        false,
    )
    .await
    .unwrap();
    // Another user's like on the doomed user's post must go too.
    PostRepo::toggle_like(&pool, post.id, other.id).await.unwrap();

    CartRepo::create(&pool, doomed.id, book.id).await.unwrap();
    BookUserRepo::grant(&pool, doomed.id, book.id).await.unwrap();

    let coupons = CouponRepo::create_batch(
        &pool,
        &CreateCoupons {
            count: 1,
            discount: 15.0,
            book_id: Some(book.id),
            subscription_id: None,
        },
    )
    .await
    .unwrap();
    CouponRepo::redeem(&pool, coupons[0].id, doomed.id).await.unwrap();

    let files = cascade::delete_user(&pool, doomed.id).await.unwrap().unwrap();
    assert!(files.contains(&StoredFile::new("posts", "mine.png")));

    assert_eq!(count(&pool, "SELECT COUNT(*) FROM posts").await, 0);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM post_likes").await, 0);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM carts").await, 0);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM book_users").await, 0);

    // The redeemed coupon remains as an audit row with the user cleared.
    let coupon = CouponRepo::find_by_id(&pool, coupons[0].id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(coupon.user_id, None);
    assert!(coupon.used_at.is_some());

    // The other user is untouched.
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM users").await, 1);
}
