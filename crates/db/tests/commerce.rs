//! Integration tests for the commerce ledger: cart lifecycle, checkout
//! settlement idempotency, ownership grants, and coupon redemption.

mod common;

use common::{create_book, create_user, new_book};
use sqlx::PgPool;
use warraq_db::is_unique_violation;
use warraq_db::models::coupon::CreateCoupons;
use warraq_db::repositories::{BookRepo, BookUserRepo, CartRepo, CouponRepo, UserRepo};

// ---------------------------------------------------------------------------
// Test: one unpaid cart row per (user, book)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_unpaid_cart_row_rejected(pool: PgPool) {
    let user = create_user(&pool, "cart1@example.com").await;
    let book = create_book(&pool, "cart-book-1").await;

    CartRepo::create(&pool, user.id, book.id).await.unwrap();

    let err = CartRepo::create(&pool, user.id, book.id).await.unwrap_err();
    assert!(
        is_unique_violation(&err, Some("uq_carts_user_book_unpaid")),
        "second unpaid row for the same pair should hit the partial unique index"
    );
}

// ---------------------------------------------------------------------------
// Test: settled rows do not block re-adding the book
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_paid_row_allows_new_unpaid_row(pool: PgPool) {
    let user = create_user(&pool, "cart2@example.com").await;
    let book = create_book(&pool, "cart-book-2").await;

    let cart = CartRepo::create(&pool, user.id, book.id).await.unwrap();
    CartRepo::set_checkout(&pool, cart.id, "checkout_abc", 100.0)
        .await
        .unwrap();
    let settled = CartRepo::settle(&pool, user.id, "checkout_abc").await.unwrap();
    assert_eq!(settled.len(), 1);
    assert!(settled[0].is_paid);

    // The paid row is history; a fresh unpaid row is allowed.
    let again = CartRepo::create(&pool, user.id, book.id).await;
    assert!(again.is_ok(), "re-adding after settlement should succeed");
}

// ---------------------------------------------------------------------------
// Test: settlement replay is a no-op
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_settlement_replay_settles_nothing(pool: PgPool) {
    let user = create_user(&pool, "cart3@example.com").await;
    let book_a = create_book(&pool, "cart-book-3a").await;
    let book_b = create_book(&pool, "cart-book-3b").await;

    let cart_a = CartRepo::create(&pool, user.id, book_a.id).await.unwrap();
    let cart_b = CartRepo::create(&pool, user.id, book_b.id).await.unwrap();
    CartRepo::set_checkout(&pool, cart_a.id, "checkout_replay", 90.0)
        .await
        .unwrap();
    CartRepo::set_checkout(&pool, cart_b.id, "checkout_replay", 50.0)
        .await
        .unwrap();

    let first = CartRepo::settle(&pool, user.id, "checkout_replay").await.unwrap();
    assert_eq!(first.len(), 2, "first delivery settles both rows");

    let second = CartRepo::settle(&pool, user.id, "checkout_replay").await.unwrap();
    assert!(second.is_empty(), "replayed delivery settles nothing");
}

// ---------------------------------------------------------------------------
// Test: a superseded session id settles nothing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_superseded_session_settles_nothing(pool: PgPool) {
    let user = create_user(&pool, "cart4@example.com").await;
    let book = create_book(&pool, "cart-book-4").await;

    // Re-initiating checkout replaces the stored session id. Only the
    // current session can settle the row; this is why the handler expires
    // the old session at the provider, or money paid against it would
    // never deliver anything.
    let cart = CartRepo::create(&pool, user.id, book.id).await.unwrap();
    CartRepo::set_checkout(&pool, cart.id, "session_old", 90.0)
        .await
        .unwrap();
    CartRepo::set_checkout(&pool, cart.id, "session_new", 90.0)
        .await
        .unwrap();

    let stale = CartRepo::settle(&pool, user.id, "session_old").await.unwrap();
    assert!(stale.is_empty(), "the replaced session id settles nothing");

    let items = CartRepo::list_unpaid_items(&pool, user.id).await.unwrap();
    assert_eq!(items.len(), 1, "the row is still unpaid");
    assert_eq!(items[0].chargily_id.as_deref(), Some("session_new"));

    let current = CartRepo::settle(&pool, user.id, "session_new").await.unwrap();
    assert_eq!(current.len(), 1, "the current session settles the row");
}

// ---------------------------------------------------------------------------
// Test: grants are idempotent and drive ownership listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_grant_idempotent_and_listed(pool: PgPool) {
    let user = create_user(&pool, "grant@example.com").await;
    let book = create_book(&pool, "grant-book").await;

    let first = BookUserRepo::grant(&pool, user.id, book.id).await.unwrap();
    assert!(first, "first grant inserts a row");

    let second = BookUserRepo::grant(&pool, user.id, book.id).await.unwrap();
    assert!(!second, "second grant is a no-op");

    let owned = BookRepo::list_owned(&pool, user.id).await.unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].id, book.id);
}

// ---------------------------------------------------------------------------
// Test: gifting moves the grant and rejects duplicate ownership
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_gift_reassigns_grant(pool: PgPool) {
    let giver = create_user(&pool, "giver@example.com").await;
    let recipient = create_user(&pool, "recipient@example.com").await;
    let book = create_book(&pool, "gift-book").await;

    BookUserRepo::grant(&pool, giver.id, book.id).await.unwrap();
    let grant = BookUserRepo::find(&pool, giver.id, book.id)
        .await
        .unwrap()
        .unwrap();

    let moved = BookUserRepo::reassign(&pool, grant.id, recipient.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.user_id, recipient.id);

    assert!(
        BookUserRepo::find(&pool, giver.id, book.id)
            .await
            .unwrap()
            .is_none(),
        "giver no longer owns the book"
    );

    // Gifting to someone who already owns the book violates the unique
    // constraint on (user, book).
    BookUserRepo::grant(&pool, giver.id, book.id).await.unwrap();
    let grant2 = BookUserRepo::find(&pool, giver.id, book.id)
        .await
        .unwrap()
        .unwrap();
    let err = BookUserRepo::reassign(&pool, grant2.id, recipient.id)
        .await
        .unwrap_err();
    assert!(is_unique_violation(&err, Some("uq_book_users_user_book")));
}

// ---------------------------------------------------------------------------
// Test: purchased counter tracks settled items
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_purchased_counter_increments(pool: PgPool) {
    let user = create_user(&pool, "counter@example.com").await;
    assert_eq!(user.purchased_books, 0);

    UserRepo::increment_purchased(&pool, user.id, 3).await.unwrap();

    let reloaded = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.purchased_books, 3);
}

// ---------------------------------------------------------------------------
// Test: coupon batch generation and single-use redemption
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_coupon_batch_and_single_redeem(pool: PgPool) {
    let user = create_user(&pool, "coupon@example.com").await;
    let book = create_book(&pool, "coupon-book").await;

    let coupons = CouponRepo::create_batch(
        &pool,
        &CreateCoupons {
            count: 5,
            discount: 25.0,
            book_id: Some(book.id),
            subscription_id: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(coupons.len(), 5);
    assert!(coupons.iter().all(|c| c.used_at.is_none()));

    let redeemed = CouponRepo::redeem(&pool, coupons[0].id, user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(redeemed.user_id, Some(user.id));
    assert!(redeemed.used_at.is_some());

    // A coupon is consumed exactly once.
    let again = CouponRepo::redeem(&pool, coupons[0].id, user.id).await.unwrap();
    assert!(again.is_none(), "second redemption should find nothing");

    let unused = CouponRepo::list(&pool, Some(false)).await.unwrap();
    assert_eq!(unused.len(), 4);
}

// ---------------------------------------------------------------------------
// Test: coupon bulk delete is all-or-nothing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_coupon_delete_many_all_or_nothing(pool: PgPool) {
    let book = create_book(&pool, "coupon-del-book").await;
    let coupons = CouponRepo::create_batch(
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

    // One bogus ID in the set aborts the whole delete.
    let ok = CouponRepo::delete_many(&pool, &[coupons[0].id, 999_999])
        .await
        .unwrap();
    assert!(!ok, "delete with a missing ID should be refused");
    assert_eq!(CouponRepo::list(&pool, None).await.unwrap().len(), 2);

    let ok = CouponRepo::delete_many(&pool, &[coupons[0].id, coupons[1].id])
        .await
        .unwrap();
    assert!(ok);
    assert!(CouponRepo::list(&pool, None).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test: book listings separate the two subtypes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_book_subtypes_do_not_mix(pool: PgPool) {
    let mut edu = new_book("edu-book");
    edu.is_educational = Some(true);
    edu.level = Some("primary".to_string());
    BookRepo::create(&pool, &edu).await.unwrap();
    create_book(&pool, "public-book").await;

    let public = BookRepo::list(&pool, false).await.unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].title, "public-book");

    let educational = BookRepo::list(&pool, true).await.unwrap();
    assert_eq!(educational.len(), 1);
    assert_eq!(educational[0].title, "edu-book");
}
