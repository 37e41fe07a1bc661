use chrono::{DateTime, Utc};

use super::{CarSummary, Currency, FuelType};
use crate::api;

/// Per-user defaults. Each default is optional and resolved by join.
#[derive(Debug, Clone)]
pub struct UserSetting {
    pub id: i64,
    pub default_car: Option<CarSummary>,
    pub default_currency: Option<Currency>,
    pub default_fuel_type: Option<FuelType>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserSetting {
    pub fn to_message(&self) -> api::UserSettings {
        api::UserSettings {
            id: self.id,
            default_car: self.default_car.as_ref().map(CarSummary::to_message),
            default_currency: self.default_currency.as_ref().map(Currency::to_message),
            default_fuel_type: self.default_fuel_type.as_ref().map(FuelType::to_message),
            created_at: Some(self.created_at),
            updated_at: self.updated_at,
        }
    }
}

/// Write set for user settings; the row is always scoped to the
/// authenticated user, never addressed by its own id from the outside.
#[derive(Debug, Clone)]
pub struct UserSettingChange {
    pub id: i64,
    pub car_id: Option<i64>,
    pub currency_id: Option<i64>,
    pub fuel_type_id: Option<i64>,
}
