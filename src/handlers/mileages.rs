use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{attached_car, check_owner};
use crate::api::{self, MileageCollection, SaveMileageRequest};
use crate::database::models::{Mileage, MileageChange};
use crate::database::repository::{CarRepository, MileageRepository};
use crate::error::ApiError;
use crate::filter::{self, MileageFilter, PaginationMeta};
use crate::middleware::AuthUser;
use crate::AppState;

/// GET /api/mileages - odometer readings across the caller's cars, paginated.
pub async fn get_mileages(
    State(state): State<AppState>,
    user: AuthUser,
    Query(f): Query<MileageFilter>,
) -> Result<Json<MileageCollection>, ApiError> {
    let repo = MileageRepository::new(state.pool.clone());

    let total = repo.count_by_user(user.id).await?;
    if filter::page_out_of_range(&f, total) {
        return Err(ApiError::not_found("mileages not found"));
    }

    let mileages = repo.mileages_by_user(user.id, &f).await?;
    tracing::info!(cnt = mileages.len(), "mileages: populate list");

    Ok(Json(MileageCollection {
        mileages: mileages.iter().map(Mileage::to_message).collect(),
        meta: PaginationMeta::new(&f, total),
    }))
}

/// GET /api/mileages/:id
pub async fn find_mileage(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<api::Mileage>, ApiError> {
    if id <= 0 {
        return Err(ApiError::invalid_argument("invalid id"));
    }

    let repo = MileageRepository::new(state.pool.clone());
    check_owner(repo.owner(id).await, &user, "mileage")?;

    let mileage = repo.find(id).await.map_err(ApiError::internal)?;

    Ok(Json(mileage.to_message()))
}

/// POST /api/mileages - create or update an odometer reading.
///
/// Creating an exact duplicate of an existing reading returns the existing
/// row; the distance must stay monotonic within the car's history.
pub async fn save_mileage(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<SaveMileageRequest>,
) -> Result<Json<api::Mileage>, ApiError> {
    let car_repo = CarRepository::new(state.pool.clone());
    let car = match attached_car(&car_repo, req.car.as_ref(), &user).await? {
        Some(car) => car,
        None => return Err(ApiError::invalid_argument("car is required")),
    };

    let Some(date) = req.date else {
        return Err(ApiError::invalid_argument("date is required"));
    };

    if req.distance <= 0 {
        return Err(ApiError::invalid_argument("invalid distance"));
    }

    let repo = MileageRepository::new(state.pool.clone());
    if req.id > 0 {
        check_owner(repo.owner(req.id).await, &user, "mileage")?;
    }

    if req.id == 0 {
        if let Some(existing) = repo
            .find_uniq(req.distance, car.id, date)
            .await
            .map_err(ApiError::internal)?
        {
            return Ok(Json(existing.to_message()));
        }
    }

    let change = MileageChange {
        id: req.id,
        car_id: car.id,
        distance: req.distance,
        date,
    };

    repo.validate(&change).await?;

    let id = repo.save(&change).await.map_err(ApiError::internal)?;
    let mileage = repo.find(id).await.map_err(ApiError::internal)?;

    Ok(Json(mileage.to_message()))
}
