//! HTTP handlers, one module per resource.

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
pub mod interests;
pub mod notifications;
pub mod posts;
pub mod publishers;
pub mod reviews;
pub mod roles;
pub mod slides;
pub mod subscriptions;
pub mod uploads;
pub mod users;
