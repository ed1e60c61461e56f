//! Aggregate queries backing the admin dashboard.

use serde::Serialize;
use sqlx::PgPool;

/// Headline counters shown on the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardCounts {
    pub users: i64,
    pub active_users: i64,
    pub subscribed_users: i64,
    pub books: i64,
    pub educational_books: i64,
    pub categories: i64,
    pub paid_carts: i64,
    pub total_revenue: f64,
}

/// Provides aggregate dashboard queries. Each method is a single statement.
pub struct AnalyticsRepo;

impl AnalyticsRepo {
    /// All headline counters in one round trip.
    pub async fn counts(pool: &PgPool) -> Result<DashboardCounts, sqlx::Error> {
        let row: (i64, i64, i64, i64, i64, i64, i64, f64) = sqlx::query_as(
            "SELECT
                (SELECT COUNT(*) FROM users),
                (SELECT COUNT(*) FROM users WHERE is_active),
                (SELECT COUNT(*) FROM users
                 WHERE subscription_id IS NOT NULL AND subscription_expires_at > NOW()),
                (SELECT COUNT(*) FROM books WHERE NOT is_educational),
                (SELECT COUNT(*) FROM books WHERE is_educational),
                (SELECT COUNT(*) FROM categories),
                (SELECT COUNT(*) FROM carts WHERE is_paid),
                (SELECT COALESCE(SUM(price), 0) FROM carts WHERE is_paid)",
        )
        .fetch_one(pool)
        .await?;
        Ok(DashboardCounts {
            users: row.0,
            active_users: row.1,
            subscribed_users: row.2,
            books: row.3,
            educational_books: row.4,
            categories: row.5,
            paid_carts: row.6,
            total_revenue: row.7,
        })
    }
}
