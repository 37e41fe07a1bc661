use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::api;

/// Car as listed for its owner; the default flag comes from user settings.
#[derive(Debug, Clone, FromRow)]
pub struct Car {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub year: Option<i32>,
    pub vin: Option<String>,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Car {
    pub fn to_message(&self) -> api::Car {
        api::Car {
            id: self.id,
            name: format!("{} {}", self.brand, self.model),
            default: self.is_default,
            vin: self.vin.clone(),
            year: self.year,
            created_at: self.created_at,
        }
    }
}

/// Minimal car projection used for ownership verification before another
/// resource may reference the car.
#[derive(Debug, Clone, FromRow)]
pub struct CarOwner {
    pub id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}
