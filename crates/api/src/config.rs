use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Root directory for uploaded files (default: `./uploads`).
    pub upload_root: PathBuf,
    /// Public base URL used in payment redirect and reset links.
    pub public_url: String,
    /// JWT token configuration (secret, expiry duration).
    pub jwt: JwtConfig,
    /// Payment provider configuration.
    pub chargily: ChargilyConfig,
    /// Outbound mail configuration, absent when SMTP is not set up.
    pub smtp: Option<SmtpConfig>,
}

/// Chargily payment API configuration.
#[derive(Debug, Clone)]
pub struct ChargilyConfig {
    /// API base URL (default: the Chargily test environment).
    pub base_url: String,
    /// Secret API key used as a Bearer token.
    pub secret_key: String,
}

/// SMTP configuration for transactional mail.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    /// Sender address for outbound mail.
    pub from: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Required | Default                          |
    /// |------------------------|----------|----------------------------------|
    /// | `HOST`                 | no       | `0.0.0.0`                        |
    /// | `PORT`                 | no       | `3000`                           |
    /// | `CORS_ORIGINS`         | no       | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS` | no       | `30`                             |
    /// | `UPLOAD_ROOT`          | no       | `./uploads`                      |
    /// | `PUBLIC_URL`           | no       | `http://localhost:3000`          |
    /// | `CHARGILY_BASE_URL`    | no       | `https://pay.chargily.net/test/api/v2` |
    /// | `CHARGILY_SECRET_KEY`  | **yes**  | --                               |
    /// | `SMTP_HOST`            | no       | -- (mail disabled when unset)    |
    /// | `SMTP_USERNAME`        | no       | empty                            |
    /// | `SMTP_PASSWORD`        | no       | empty                            |
    /// | `SMTP_FROM`            | no       | `no-reply@warraq.local`          |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upload_root =
            PathBuf::from(std::env::var("UPLOAD_ROOT").unwrap_or_else(|_| "./uploads".into()));

        let public_url =
            std::env::var("PUBLIC_URL").unwrap_or_else(|_| "http://localhost:3000".into());

        let chargily = ChargilyConfig {
            base_url: std::env::var("CHARGILY_BASE_URL")
                .unwrap_or_else(|_| "https://pay.chargily.net/test/api/v2".into()),
            secret_key: std::env::var("CHARGILY_SECRET_KEY")
                .expect("CHARGILY_SECRET_KEY must be set in the environment"),
        };

        let smtp = std::env::var("SMTP_HOST").ok().map(|smtp_host| SmtpConfig {
            host: smtp_host,
            username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
            password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            from: std::env::var("SMTP_FROM").unwrap_or_else(|_| "no-reply@warraq.local".into()),
        });

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upload_root,
            public_url,
            jwt: JwtConfig::from_env(),
            chargily,
            smtp,
        }
    }
}
