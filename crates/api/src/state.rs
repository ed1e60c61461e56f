use std::sync::Arc;

use crate::config::ServerConfig;
use crate::mailer::Mailer;
use crate::payments::ChargilyClient;
use crate::storage::Storage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: warraq_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Uploaded-file storage rooted at `config.upload_root`.
    pub storage: Arc<Storage>,
    /// Chargily payment API client.
    pub payments: Arc<ChargilyClient>,
    /// Outbound mail sender.
    pub mailer: Arc<Mailer>,
}
