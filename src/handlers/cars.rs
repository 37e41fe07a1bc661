use axum::{extract::State, Json};

use crate::api::CarCollection;
use crate::database::models::Car;
use crate::database::repository::CarRepository;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::AppState;

/// GET /api/cars - the caller's cars, newest first.
pub async fn get_cars(State(state): State<AppState>, user: AuthUser) -> Result<Json<CarCollection>, ApiError> {
    let repo = CarRepository::new(state.pool.clone());
    let cars = repo.cars_by_user(user.id).await?;

    tracing::info!(cnt = cars.len(), "cars: populate list");

    Ok(Json(CarCollection {
        cars: cars.iter().map(Car::to_message).collect(),
    }))
}
