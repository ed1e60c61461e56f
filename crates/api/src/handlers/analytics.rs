//! Handlers for the admin dashboard analytics.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use warraq_db::models::book::Book;
use warraq_db::models::category::CategoryWithBookCount;
use warraq_db::models::review::TopReader;
use warraq_db::models::user::UserResponse;
use warraq_db::repositories::analytics_repo::DashboardCounts;
use warraq_db::repositories::{AnalyticsRepo, BookRepo, CategoryRepo, ReviewRepo, UserRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Everything the dashboard landing page shows, in one response.
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub counts: DashboardCounts,
    pub latest_books: Vec<Book>,
    pub latest_users: Vec<UserResponse>,
    pub top_categories: Vec<CategoryWithBookCount>,
    pub top_readers: Vec<TopReader>,
}

/// GET /api/v1/analytics/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Dashboard>>> {
    user.require_dashboard()?;

    let counts = AnalyticsRepo::counts(&state.pool).await?;
    let latest_books = BookRepo::latest(&state.pool, 5).await?;
    let latest_users = UserRepo::latest(&state.pool, 5).await?;
    let top_categories = CategoryRepo::top_by_book_count(&state.pool, 5).await?;
    let top_readers = ReviewRepo::top_readers(&state.pool, 7, 10).await?;

    Ok(Json(DataResponse::new(Dashboard {
        counts,
        latest_books,
        latest_users: latest_users.into_iter().map(UserResponse::from).collect(),
        top_categories,
        top_readers,
    })))
}
