use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{attached_car, check_owner, required_reference};
use crate::api::{self, OrderCollection, OrderTypeCollection, SaveOrderRequest};
use crate::database::models::{Order, OrderChange, OrderType};
use crate::database::repository::{CarRepository, CurrencyRepository, OrderRepository};
use crate::error::ApiError;
use crate::filter::{self, OrderFilter, PaginationMeta};
use crate::middleware::AuthUser;
use crate::AppState;

/// GET /api/orders - the caller's maintenance orders, paginated.
pub async fn get_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(f): Query<OrderFilter>,
) -> Result<Json<OrderCollection>, ApiError> {
    let repo = OrderRepository::new(state.pool.clone());

    let total = repo.count_by_user(user.id).await?;
    if filter::page_out_of_range(&f, total) {
        return Err(ApiError::not_found("orders not found"));
    }

    let orders = repo.orders_by_user(user.id, &f).await?;
    tracing::info!(cnt = orders.len(), "orders: populate list");

    Ok(Json(OrderCollection {
        orders: orders.iter().map(Order::to_message).collect(),
        meta: PaginationMeta::new(&f, total),
    }))
}

/// GET /api/orders/:id
pub async fn find_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<api::Order>, ApiError> {
    if id <= 0 {
        return Err(ApiError::invalid_argument("invalid id"));
    }

    let repo = OrderRepository::new(state.pool.clone());
    check_owner(repo.owner(id).await, &user, "order")?;

    let order = repo.find(id).await.map_err(ApiError::internal)?;

    Ok(Json(order.to_message()))
}

/// POST /api/orders - create or update; responds with the stored row.
pub async fn save_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<SaveOrderRequest>,
) -> Result<Json<api::Order>, ApiError> {
    let currency_code = req.cost.as_ref().map(|c| c.currency.as_str()).unwrap_or("");
    if currency_code.is_empty() {
        return Err(ApiError::invalid_argument("empty currency code"));
    }

    let Some(date) = req.date else {
        return Err(ApiError::invalid_argument("date is required"));
    };

    let repo = OrderRepository::new(state.pool.clone());
    if req.id > 0 {
        check_owner(repo.owner(req.id).await, &user, "order")?;
    }

    let order_type = match req.order_type.filter(|t| t.id > 0) {
        Some(t) => Some(required_reference(repo.find_type(t.id).await, "order type")?),
        None => None,
    };

    let currency_repo = CurrencyRepository::new(state.pool.clone());
    let currency = required_reference(currency_repo.find_by_code(currency_code).await, "currency")?;

    let car_repo = CarRepository::new(state.pool.clone());
    let car = attached_car(&car_repo, req.car.as_ref(), &user).await?;

    let change = OrderChange {
        id: req.id,
        date,
        currency_id: currency.id,
        cost: req.cost.as_ref().map(|c| c.value).unwrap_or(0),
        description: req.description,
        capacity: req.capacity.filter(|c| !c.is_empty()),
        type_id: order_type.map(|t| t.id),
        car_id: car.map(|c| c.id),
        used_at: req.used_at,
    };

    let id = repo.save(&change, user.id).await.map_err(ApiError::internal)?;
    let order = repo.find(id).await.map_err(ApiError::internal)?;

    Ok(Json(order.to_message()))
}

/// GET /api/orders/types - reference list, shared by all users.
pub async fn get_order_types(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<OrderTypeCollection>, ApiError> {
    let repo = OrderRepository::new(state.pool.clone());
    let types = repo.order_types().await?;

    tracing::info!(cnt = types.len(), "orders: populate types");

    Ok(Json(OrderTypeCollection {
        types: types.iter().map(OrderType::to_message).collect(),
    }))
}
