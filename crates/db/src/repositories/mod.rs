//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&PgPool` as the first argument. Related-entity expansion is
//! explicit: callers ask for the joins they need, nothing is eagerly loaded.

pub mod analytics_repo;
pub mod author_repo;
pub mod book_repo;
pub mod book_user_repo;
pub mod cart_repo;
pub mod category_repo;
pub mod contact_repo;
pub mod coupon_repo;
pub mod currency_repo;
pub mod interest_repo;
pub mod notification_repo;
pub mod post_repo;
pub mod publisher_repo;
pub mod review_repo;
pub mod role_repo;
pub mod slide_repo;
pub mod subscription_repo;
pub mod user_repo;

pub use analytics_repo::AnalyticsRepo;
pub use author_repo::AuthorRepo;
pub use book_repo::BookRepo;
pub use book_user_repo::BookUserRepo;
pub use cart_repo::CartRepo;
pub use category_repo::CategoryRepo;
pub use contact_repo::ContactRepo;
pub use coupon_repo::CouponRepo;
pub use currency_repo::CurrencyRepo;
pub use interest_repo::InterestRepo;
pub use notification_repo::NotificationRepo;
pub use post_repo::PostRepo;
pub use publisher_repo::PublisherRepo;
pub use review_repo::ReviewRepo;
pub use role_repo::RoleRepo;
pub use slide_repo::SlideRepo;
pub use subscription_repo::SubscriptionRepo;
pub use user_repo::UserRepo;
