pub mod analytics;
pub mod auth;
pub mod authors;
pub mod books;
pub mod cart;
pub mod categories;
pub mod checkout;
pub mod contact;
pub mod coupons;
pub mod currencies;
pub mod educational_books;
pub mod health;
pub mod interests;
pub mod notifications;
pub mod posts;
pub mod publishers;
pub mod quotes;
pub mod reviews;
pub mod roles;
pub mod slides;
pub mod subscriptions;
pub mod uploads;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
/// /auth/me                       current user
/// /auth/forgot-password          issue reset token (public)
/// /auth/reset-password           consume reset token (public)
/// /auth/change-password          change password
///
/// /users                         list (users.view)
/// /users/me                      update own profile (PUT)
/// /users/{id}                    get, update, delete
/// /users/{id}/ban                ban (users.manage)
/// /users/{id}/unban              unban (users.manage)
///
/// /roles                         list, create (roles_permissions.*)
/// /roles/{id}                    get, update, delete (immutable refused)
///
/// /authors                       list, create
/// /authors/{id}                  get, update, delete (detaches books)
/// /authors/{id}/sales            per-book sales (authors.manage)
///
/// /publishers                    list, create
/// /publishers/{id}               get, update, delete (detaches books)
///
/// /categories                    list, create
/// /categories/top                top by active-book count
/// /categories/{id}               get, update, delete (detaches books)
///
/// /books                         list, create (public subtype)
/// /books/search                  title/description search
/// /books/me                      owned books via grants
/// /books/{id}                    get (bumps views), update, delete
/// /books/{id}/gift               gift an owned grant (POST)
/// /books/{id}/reviews            reviews for the book
/// /books/{id}/read               record a completed read (POST)
///
/// /educational-books             list, create (educational subtype)
/// /educational-books/search      title/description search
/// /educational-books/{id}        get (bumps views), update, delete
/// /educational-books/{id}/text   PDF text for the reader (owned or free)
///
/// /reviews                       create
/// /reviews/{id}                  delete own
/// /reads/me                      own read history
/// /reads/top                     top readers (?days, ?limit)
///
/// /posts                         feed, create (pending)
/// /posts/me                      own posts, every status
/// /posts/admin                   moderation list (?status)
/// /posts/{id}                    update (owner), delete (owner or manage)
/// /posts/{id}/moderate           approve / reject (POST)
/// /posts/{id}/like               like toggle (POST)
/// /posts/{id}/comments           add comment (POST)
/// /comments/{id}                 delete own comment
///
/// /quotes                        same shape as /posts, quotes subtype
///
/// /cart                          list, add, clear
/// /cart/{id}                     remove own unpaid row
/// /checkout                      create cart checkout session (POST)
/// /checkout/subscription         create plan checkout session (POST)
/// /webhook/chargily              provider webhook, idempotent settlement
///
/// /coupons                       list (?used), batch create, bulk delete
/// /coupons/redeem                redeem (grants book or activates plan)
///
/// /subscriptions                 active plans, create
/// /subscriptions/all             every plan (subscriptions.view)
/// /subscriptions/{id}            get, update
///
/// /slides                        list, create (exactly one target)
/// /slides/{id}                   get, update, delete
///
/// /notifications                 list, create (to_all xor to_one)
/// /notifications/me              active window, addressed to caller
/// /notifications/{id}            update, delete
///
/// /currencies                    list, create
/// /currencies/{id}               update, delete
///
/// /contact                       submit (anonymous ok), list
/// /contact/{id}                  delete
///
/// /interests                     list, add
/// /interests/{category_id}       remove
///
/// /analytics/dashboard           headline counters + highlights
///
/// /uploads/{kind}                multipart upload, whitelisted kinds
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/roles", roles::router())
        .nest("/authors", authors::router())
        .nest("/publishers", publishers::router())
        .nest("/categories", categories::router())
        .nest("/books", books::router())
        .nest("/educational-books", educational_books::router())
        .nest("/reviews", reviews::router())
        .nest("/reads", reviews::reads_router())
        .nest("/posts", posts::router())
        .nest("/comments", posts::comments_router())
        .nest("/quotes", quotes::router())
        .nest("/cart", cart::router())
        .nest("/checkout", checkout::router())
        .nest("/webhook", checkout::webhook_router())
        .nest("/coupons", coupons::router())
        .nest("/subscriptions", subscriptions::router())
        .nest("/slides", slides::router())
        .nest("/notifications", notifications::router())
        .nest("/currencies", currencies::router())
        .nest("/contact", contact::router())
        .nest("/interests", interests::router())
        .nest("/analytics", analytics::router())
        .nest("/uploads", uploads::router())
}
