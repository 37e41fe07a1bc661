use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

use super::{CarSummary, Cost};
use crate::api;

#[derive(Debug, Clone, FromRow)]
pub struct FillingStation {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl FillingStation {
    pub fn to_message(&self) -> api::FillingStation {
        api::FillingStation {
            id: self.id,
            name: self.name.clone(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct FuelType {
    pub id: i64,
    pub name: String,
}

impl FuelType {
    pub fn to_message(&self) -> api::FuelType {
        api::FuelType {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Refueling entry with its joined station, type and optional car. The
/// distance comes from the linked mileage record when one exists.
#[derive(Debug, Clone)]
pub struct Fuel {
    pub id: i64,
    pub cost: Cost,
    pub value: i64,
    pub station: FillingStation,
    pub fuel_type: FuelType,
    pub car: Option<CarSummary>,
    pub distance: Option<i64>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Fuel {
    pub fn to_message(&self) -> api::Fuel {
        api::Fuel {
            id: self.id,
            car: self.car.as_ref().map(CarSummary::to_message),
            cost: self.cost.to_message(),
            value: self.value,
            station: self.station.to_message(),
            fuel_type: self.fuel_type.to_message(),
            distance: self.distance,
            date: self.date,
            created_at: self.created_at,
        }
    }
}

/// Validated write set for a fuel entry; id 0 means insert.
#[derive(Debug, Clone)]
pub struct FuelChange {
    pub id: i64,
    pub date: NaiveDate,
    pub station_id: i64,
    pub currency_id: i64,
    /// Minor units; the store keeps decimals.
    pub cost: i64,
    pub value: i64,
    pub type_id: i64,
    pub car_id: Option<i64>,
}
