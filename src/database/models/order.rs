use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

use super::{CarSummary, Cost};
use crate::api;

#[derive(Debug, Clone, FromRow)]
pub struct OrderType {
    pub id: i64,
    pub name: String,
}

impl OrderType {
    pub fn to_message(&self) -> api::OrderType {
        api::OrderType {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Maintenance order: a part bought or a job done, optionally tied to a car.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: i64,
    pub cost: Cost,
    pub description: String,
    pub capacity: Option<String>,
    pub order_type: Option<OrderType>,
    pub car: Option<CarSummary>,
    pub distance: Option<i64>,
    pub date: NaiveDate,
    pub used_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn to_message(&self) -> api::Order {
        api::Order {
            id: self.id,
            car: self.car.as_ref().map(CarSummary::to_message),
            cost: self.cost.to_message(),
            description: self.description.clone(),
            capacity: self.capacity.clone(),
            order_type: self.order_type.as_ref().map(OrderType::to_message),
            distance: self.distance,
            date: self.date,
            used_at: self.used_at,
            created_at: self.created_at,
        }
    }
}

/// Validated write set for an order; id 0 means insert.
#[derive(Debug, Clone)]
pub struct OrderChange {
    pub id: i64,
    pub date: NaiveDate,
    pub currency_id: i64,
    pub cost: i64,
    pub description: String,
    pub capacity: Option<String>,
    pub type_id: Option<i64>,
    pub car_id: Option<i64>,
    pub used_at: Option<NaiveDate>,
}
