//! Handlers for the `/currencies` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use warraq_core::error::CoreError;
use warraq_core::permissions::{Action, Resource};
use warraq_core::types::DbId;
use warraq_db::models::currency::{CreateCurrency, Currency, UpdateCurrency};
use warraq_db::repositories::CurrencyRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/currencies
///
/// Duplicate codes surface as 409 through `uq_currencies_code`.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateCurrency>,
) -> AppResult<(StatusCode, Json<DataResponse<Currency>>)> {
    user.require(Resource::Currencies, Action::Create)?;
    if input.rate_to_dz <= 0.0 {
        return Err(AppError::Core(CoreError::Validation(
            "Rate must be positive".into(),
        )));
    }
    let currency = CurrencyRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(currency))))
}

/// GET /api/v1/currencies
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Currency>>>> {
    let currencies = CurrencyRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(currencies)))
}

/// PUT /api/v1/currencies/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCurrency>,
) -> AppResult<Json<DataResponse<Currency>>> {
    user.require(Resource::Currencies, Action::Edit)?;
    if matches!(input.rate_to_dz, Some(rate) if rate <= 0.0) {
        return Err(AppError::Core(CoreError::Validation(
            "Rate must be positive".into(),
        )));
    }
    let currency = CurrencyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Currency",
            id,
        }))?;
    Ok(Json(DataResponse::new(currency)))
}

/// DELETE /api/v1/currencies/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    user.require(Resource::Currencies, Action::Delete)?;
    if !CurrencyRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Currency",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
