//! Request guards: authentication, ban enforcement, and permission checks.

pub mod auth;
