use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::database::models::{CarSummary, Currency, FuelType, UserSetting, UserSettingChange};
use crate::database::DatabaseError;

#[derive(FromRow)]
struct UserSettingRow {
    id: i64,
    car_id: Option<i64>,
    car_brand: Option<String>,
    car_model: Option<String>,
    currency_id: Option<i64>,
    currency_name: Option<String>,
    currency_code: Option<String>,
    currency_created_at: Option<DateTime<Utc>>,
    fuel_type_id: Option<i64>,
    fuel_type_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<UserSettingRow> for UserSetting {
    fn from(row: UserSettingRow) -> Self {
        let default_car = match (row.car_id, row.car_brand, row.car_model) {
            (Some(id), Some(brand), Some(model)) => Some(CarSummary { id, brand, model }),
            _ => None,
        };
        let default_currency = match (row.currency_id, row.currency_name, row.currency_code, row.currency_created_at) {
            (Some(id), Some(name), Some(code), Some(created_at)) => Some(Currency {
                id,
                name,
                code,
                is_default: false,
                created_at,
            }),
            _ => None,
        };
        let default_fuel_type = match (row.fuel_type_id, row.fuel_type_name) {
            (Some(id), Some(name)) => Some(FuelType { id, name }),
            _ => None,
        };

        UserSetting {
            id: row.id,
            default_car,
            default_currency,
            default_fuel_type,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct UserSettingRepository {
    pool: PgPool,
}

impl UserSettingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn user_settings(&self, user_id: i64) -> Result<UserSetting, DatabaseError> {
        let row = sqlx::query_as::<_, UserSettingRow>(
            "SELECT
                us.id,
                us.default_car_id AS car_id,
                c.brand_name AS car_brand,
                c.model_name AS car_model,
                us.default_currency_id AS currency_id,
                cr.name AS currency_name,
                cr.code AS currency_code,
                cr.created_at AS currency_created_at,
                us.default_fuel_type_id AS fuel_type_id,
                ft.name AS fuel_type_name,
                us.created_at,
                us.updated_at
             FROM user_settings AS us
             LEFT JOIN cars AS c ON us.default_car_id = c.id
             LEFT JOIN currencies AS cr ON us.default_currency_id = cr.id
             LEFT JOIN fuel_types AS ft ON us.default_fuel_type_id = ft.id
             WHERE us.user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DatabaseError::NotFound)?;

        Ok(row.into())
    }

    /// Always keyed by the owning user, so a forged settings id can never
    /// touch another user's row.
    pub async fn save(&self, settings: &UserSettingChange, user_id: i64) -> Result<(), DatabaseError> {
        if settings.id == 0 {
            sqlx::query(
                "INSERT INTO user_settings (default_car_id, default_currency_id, default_fuel_type_id, user_id)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(settings.car_id)
            .bind(settings.currency_id)
            .bind(settings.fuel_type_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        } else {
            sqlx::query(
                "UPDATE user_settings
                 SET default_car_id = $1, default_currency_id = $2, default_fuel_type_id = $3
                 WHERE user_id = $4",
            )
            .bind(settings.car_id)
            .bind(settings.currency_id)
            .bind(settings.fuel_type_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }
}
