//! Database layer: connection pool, migrations, models, repositories, and
//! the referential-integrity cascade engine.

pub mod cascade;
pub mod models;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Convenience alias used across the workspace.
pub type DbPool = PgPool;

/// Create a connection pool for the given database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Does this error represent a Postgres unique-constraint violation
/// (optionally on a specific constraint)?
///
/// Callers use this to treat "already exists" as a tolerated outcome, e.g.
/// re-granting a book during idempotent webhook settlement.
pub fn is_unique_violation(err: &sqlx::Error, constraint: Option<&str>) -> bool {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => match constraint {
            Some(name) => db_err.constraint() == Some(name),
            None => true,
        },
        _ => false,
    }
}
