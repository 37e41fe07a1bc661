use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{attached_car, check_owner, required_reference};
use crate::api::{self, FillingStationCollection, FuelCollection, FuelTypeCollection, SaveFuelRequest};
use crate::database::models::{FillingStation, Fuel, FuelChange, FuelType};
use crate::database::repository::{CarRepository, CurrencyRepository, FuelRepository};
use crate::error::ApiError;
use crate::filter::{self, FuelFilter, PaginationMeta};
use crate::middleware::AuthUser;
use crate::AppState;

/// GET /api/fuels - the caller's refueling entries, paginated.
pub async fn get_fuels(
    State(state): State<AppState>,
    user: AuthUser,
    Query(f): Query<FuelFilter>,
) -> Result<Json<FuelCollection>, ApiError> {
    let repo = FuelRepository::new(state.pool.clone());

    let total = repo.count_by_user(user.id).await?;
    if filter::page_out_of_range(&f, total) {
        return Err(ApiError::not_found("fuels not found"));
    }

    let fuels = repo.fuels_by_user(user.id, &f).await?;
    tracing::info!(cnt = fuels.len(), "fuels: populate list");

    Ok(Json(FuelCollection {
        fuels: fuels.iter().map(Fuel::to_message).collect(),
        meta: PaginationMeta::new(&f, total),
    }))
}

/// GET /api/fuels/:id
pub async fn find_fuel(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<api::Fuel>, ApiError> {
    if id <= 0 {
        return Err(ApiError::invalid_argument("invalid id"));
    }

    let repo = FuelRepository::new(state.pool.clone());
    check_owner(repo.owner(id).await, &user, "fuel")?;

    let fuel = repo.find(id).await.map_err(ApiError::internal)?;

    Ok(Json(fuel.to_message()))
}

/// POST /api/fuels - create (id 0) or update a refueling entry. The response
/// is the row as stored, re-read after the write.
pub async fn save_fuel(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<SaveFuelRequest>,
) -> Result<Json<api::Fuel>, ApiError> {
    let currency_code = req.cost.as_ref().map(|c| c.currency.as_str()).unwrap_or("");
    if currency_code.is_empty() {
        return Err(ApiError::invalid_argument("empty currency code"));
    }

    let station_id = req.station.map(|s| s.id).unwrap_or(0);
    if station_id == 0 {
        return Err(ApiError::invalid_argument("empty filling station"));
    }

    let type_id = req.fuel_type.map(|t| t.id).unwrap_or(0);
    if type_id == 0 {
        return Err(ApiError::invalid_argument("empty fuel type"));
    }

    let Some(date) = req.date else {
        return Err(ApiError::invalid_argument("date is required"));
    };

    let repo = FuelRepository::new(state.pool.clone());
    if req.id > 0 {
        check_owner(repo.owner(req.id).await, &user, "fuel")?;
    }

    let fuel_type = required_reference(repo.find_type(type_id).await, "fuel type")?;

    let currency_repo = CurrencyRepository::new(state.pool.clone());
    let currency = required_reference(currency_repo.find_by_code(currency_code).await, "currency")?;

    let car_repo = CarRepository::new(state.pool.clone());
    let car = attached_car(&car_repo, req.car.as_ref(), &user).await?;

    let change = FuelChange {
        id: req.id,
        date,
        station_id,
        currency_id: currency.id,
        cost: req.cost.as_ref().map(|c| c.value).unwrap_or(0),
        value: req.value,
        type_id: fuel_type.id,
        car_id: car.map(|c| c.id),
    };

    let id = repo.save(&change, user.id).await.map_err(ApiError::internal)?;
    let fuel = repo.find(id).await.map_err(ApiError::internal)?;

    Ok(Json(fuel.to_message()))
}

/// GET /api/fuels/stations - reference list, shared by all users.
pub async fn get_filling_stations(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<FillingStationCollection>, ApiError> {
    let repo = FuelRepository::new(state.pool.clone());
    let stations = repo.filling_stations().await?;

    tracing::info!(cnt = stations.len(), "fuels: populate stations");

    Ok(Json(FillingStationCollection {
        stations: stations.iter().map(FillingStation::to_message).collect(),
    }))
}

/// GET /api/fuels/types - reference list, shared by all users.
pub async fn get_fuel_types(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<FuelTypeCollection>, ApiError> {
    let repo = FuelRepository::new(state.pool.clone());
    let types = repo.fuel_types().await?;

    tracing::info!(cnt = types.len(), "fuels: populate types");

    Ok(Json(FuelTypeCollection {
        types: types.iter().map(FuelType::to_message).collect(),
    }))
}
