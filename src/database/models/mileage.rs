use chrono::{DateTime, NaiveDate, Utc};

use super::CarSummary;
use crate::api;

/// Odometer reading for a car at a given date.
#[derive(Debug, Clone)]
pub struct Mileage {
    pub id: i64,
    pub distance: i64,
    pub car: Option<CarSummary>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Mileage {
    pub fn to_message(&self) -> api::Mileage {
        api::Mileage {
            id: self.id,
            car: self.car.as_ref().map(CarSummary::to_message),
            distance: self.distance,
            date: self.date,
            created_at: self.created_at,
        }
    }
}

/// Validated write set for a mileage record; id 0 means insert.
#[derive(Debug, Clone)]
pub struct MileageChange {
    pub id: i64,
    pub car_id: i64,
    pub distance: i64,
    pub date: NaiveDate,
}
