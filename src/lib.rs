pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AppConfig;

/// Dependencies shared by every handler, constructed once at startup and
/// read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
}

pub fn app(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/cars", get(handlers::cars::get_cars))
        .route("/api/currencies", get(handlers::currencies::get_currencies))
        .route("/api/currencies/default", get(handlers::currencies::get_default_currency))
        .route(
            "/api/settings",
            get(handlers::settings::get_user_settings).post(handlers::settings::save_user_settings),
        )
        .route("/api/fuels", get(handlers::fuels::get_fuels).post(handlers::fuels::save_fuel))
        .route("/api/fuels/stations", get(handlers::fuels::get_filling_stations))
        .route("/api/fuels/types", get(handlers::fuels::get_fuel_types))
        .route("/api/fuels/:id", get(handlers::fuels::find_fuel))
        .route("/api/orders", get(handlers::orders::get_orders).post(handlers::orders::save_order))
        .route("/api/orders/types", get(handlers::orders::get_order_types))
        .route("/api/orders/:id", get(handlers::orders::find_order))
        .route(
            "/api/expenses",
            get(handlers::expenses::get_expenses).post(handlers::expenses::save_expense),
        )
        .route("/api/expenses/:id", get(handlers::expenses::find_expense))
        .route(
            "/api/mileages",
            get(handlers::mileages::get_mileages).post(handlers::mileages::save_mileage),
        )
        .route("/api/mileages/:id", get(handlers::mileages::find_mileage))
        .route_layer(axum::middleware::from_fn_with_state(state.clone(), middleware::require_auth));

    Router::new()
        // Public
        .route("/health", get(health))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .merge(protected)
        // Global middleware
        .layer(axum::middleware::from_fn(middleware::request_id))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(state.config.server.request_timeout))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "database": "ok" })),
        ),
        Err(err) => {
            tracing::error!(error = %err, "health: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "timestamp": now })),
            )
        }
    }
}
