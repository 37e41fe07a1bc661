use axum::{extract::State, Json};

use crate::api::{CurrencyCollection, DefaultCurrency};
use crate::database::models::Currency;
use crate::database::repository::CurrencyRepository;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::AppState;

/// GET /api/currencies - all currencies with the caller's default flagged.
pub async fn get_currencies(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<CurrencyCollection>, ApiError> {
    let repo = CurrencyRepository::new(state.pool.clone());
    let currencies = repo.currencies(user.id).await?;

    tracing::info!(cnt = currencies.len(), "currencies: populate list");

    Ok(Json(CurrencyCollection {
        currencies: currencies.iter().map(Currency::to_message).collect(),
    }))
}

/// GET /api/currencies/default - the caller's default currency, if any.
pub async fn get_default_currency(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<DefaultCurrency>, ApiError> {
    let repo = CurrencyRepository::new(state.pool.clone());
    let currencies = repo.currencies(user.id).await?;

    let currency = currencies.iter().find(|c| c.is_default).map(Currency::to_message);
    tracing::info!(found = currency.is_some(), "currencies: default currency");

    Ok(Json(DefaultCurrency {
        found: currency.is_some(),
        currency,
    }))
}
