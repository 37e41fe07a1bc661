use axum::{extract::State, Json};

use super::{attached_car, required_reference};
use crate::api::{self, SaveUserSettingsRequest};
use crate::database::repository::{CarRepository, CurrencyRepository, FuelRepository, UserSettingRepository};
use crate::database::{DatabaseError, models::UserSettingChange};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::AppState;

/// GET /api/settings - the caller's defaults; an empty object when none are
/// stored yet.
pub async fn get_user_settings(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<api::UserSettings>, ApiError> {
    let repo = UserSettingRepository::new(state.pool.clone());

    settings_from_db(&repo, user.id).await.map(Json)
}

/// POST /api/settings - store defaults. Every submitted reference must
/// resolve, and a default car must belong to the caller.
pub async fn save_user_settings(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<SaveUserSettingsRequest>,
) -> Result<Json<api::UserSettings>, ApiError> {
    let car_repo = CarRepository::new(state.pool.clone());
    let car = attached_car(&car_repo, req.default_car.as_ref(), &user).await?;

    let currency = match req.default_currency.filter(|c| c.id > 0) {
        Some(c) => {
            let repo = CurrencyRepository::new(state.pool.clone());
            Some(required_reference(repo.find(c.id).await, "currency")?)
        }
        None => None,
    };

    let fuel_type = match req.default_fuel_type.filter(|t| t.id > 0) {
        Some(t) => {
            let repo = FuelRepository::new(state.pool.clone());
            Some(required_reference(repo.find_type(t.id).await, "fuel type")?)
        }
        None => None,
    };

    let change = UserSettingChange {
        id: req.id,
        car_id: car.map(|c| c.id),
        currency_id: currency.map(|c| c.id),
        fuel_type_id: fuel_type.map(|t| t.id),
    };

    let repo = UserSettingRepository::new(state.pool.clone());
    repo.save(&change, user.id).await.map_err(ApiError::internal)?;

    settings_from_db(&repo, user.id).await.map(Json)
}

async fn settings_from_db(repo: &UserSettingRepository, user_id: i64) -> Result<api::UserSettings, ApiError> {
    match repo.user_settings(user_id).await {
        Ok(settings) => {
            tracing::info!(user_settings_id = settings.id, "settings: get user settings");
            Ok(settings.to_message())
        }
        Err(DatabaseError::NotFound) => {
            tracing::info!("settings: empty user settings");
            Ok(api::UserSettings::default())
        }
        Err(err) => Err(ApiError::internal(err)),
    }
}
