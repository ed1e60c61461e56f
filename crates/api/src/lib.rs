//! HTTP layer of the Warraq bookstore backend.
//!
//! Exposes the router builder and shared infrastructure so integration tests
//! can assemble the exact application the production binary runs.

pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod handlers;
pub mod mailer;
pub mod middleware;
pub mod payments;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod storage;
