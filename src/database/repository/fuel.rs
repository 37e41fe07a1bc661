use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

use crate::database::models::{CarSummary, Cost, FillingStation, Fuel, FuelChange, FuelType};
use crate::database::DatabaseError;
use crate::filter::{FuelFilter, Paginated};

const FUEL_SELECT: &str = "
    SELECT
        f.id,
        f.date,
        CAST(f.value * 100 AS BIGINT) AS value,
        azs.id AS station_id,
        azs.name AS station_name,
        azs.created_at AS station_created_at,
        CAST(f.cost * 100 AS BIGINT) AS cost,
        cur.code AS currency_code,
        c.id AS car_id,
        c.brand_name AS car_brand,
        c.model_name AS car_model,
        m.distance AS distance,
        ft.id AS type_id,
        ft.name AS type_name,
        f.created_at
    FROM fuels AS f
    INNER JOIN filling_stations AS azs ON azs.id = f.station_id
    INNER JOIN currencies AS cur ON cur.id = f.currency_id
    INNER JOIN fuel_types AS ft ON ft.id = f.type_id
    LEFT JOIN cars AS c ON c.id = f.car_id
    LEFT JOIN mileages AS m ON m.id = f.mileage_id";

#[derive(FromRow)]
struct FuelRow {
    id: i64,
    date: NaiveDate,
    value: i64,
    station_id: i64,
    station_name: String,
    station_created_at: DateTime<Utc>,
    cost: i64,
    currency_code: String,
    car_id: Option<i64>,
    car_brand: Option<String>,
    car_model: Option<String>,
    distance: Option<i64>,
    type_id: i64,
    type_name: String,
    created_at: DateTime<Utc>,
}

impl From<FuelRow> for Fuel {
    fn from(row: FuelRow) -> Self {
        let car = match (row.car_id, row.car_brand, row.car_model) {
            (Some(id), Some(brand), Some(model)) => Some(CarSummary { id, brand, model }),
            _ => None,
        };

        Fuel {
            id: row.id,
            cost: Cost {
                value: row.cost,
                currency_code: row.currency_code,
            },
            value: row.value,
            station: FillingStation {
                id: row.station_id,
                name: row.station_name,
                created_at: row.station_created_at,
            },
            fuel_type: FuelType {
                id: row.type_id,
                name: row.type_name,
            },
            car,
            distance: row.distance,
            date: row.date,
            created_at: row.created_at,
        }
    }
}

pub struct FuelRepository {
    pool: PgPool,
}

impl FuelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count_by_user(&self, user_id: i64) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(f.id) FROM fuels AS f WHERE f.user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn fuels_by_user(&self, user_id: i64, filter: &FuelFilter) -> Result<Vec<Fuel>, DatabaseError> {
        let mut sql = format!("{FUEL_SELECT} WHERE f.user_id = $1 ORDER BY f.date DESC, f.id DESC");
        if filter.limit() > 0 {
            sql.push_str(" LIMIT $2 OFFSET $3");
        }

        let query = sqlx::query_as::<_, FuelRow>(&sql).bind(user_id);
        let query = if filter.limit() > 0 {
            query.bind(filter.limit() as i64).bind(filter.offset())
        } else {
            query
        };

        let rows = query.fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(Fuel::from).collect())
    }

    pub async fn find(&self, id: i64) -> Result<Fuel, DatabaseError> {
        let sql = format!("{FUEL_SELECT} WHERE f.id = $1");

        let row = sqlx::query_as::<_, FuelRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DatabaseError::NotFound)?;

        Ok(row.into())
    }

    /// Owner lookup by id only; the caller compares against the
    /// authenticated identity.
    pub async fn owner(&self, id: i64) -> Result<i64, DatabaseError> {
        sqlx::query_scalar("SELECT f.user_id FROM fuels AS f WHERE f.id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DatabaseError::NotFound)
    }

    pub async fn find_type(&self, id: i64) -> Result<FuelType, DatabaseError> {
        sqlx::query_as::<_, FuelType>("SELECT ft.id, ft.name FROM fuel_types AS ft WHERE ft.id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DatabaseError::NotFound)
    }

    pub async fn save(&self, fuel: &FuelChange, user_id: i64) -> Result<i64, DatabaseError> {
        if fuel.id == 0 {
            let id: i64 = sqlx::query_scalar(
                "INSERT INTO fuels (date, station_id, currency_id, cost, value, type_id, car_id, user_id)
                 VALUES ($1, $2, $3, $4::numeric / 100, $5::numeric / 100, $6, $7, $8)
                 RETURNING id",
            )
            .bind(fuel.date)
            .bind(fuel.station_id)
            .bind(fuel.currency_id)
            .bind(fuel.cost)
            .bind(fuel.value)
            .bind(fuel.type_id)
            .bind(fuel.car_id)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

            Ok(id)
        } else {
            sqlx::query(
                "UPDATE fuels
                 SET date = $1, station_id = $2, currency_id = $3, cost = $4::numeric / 100,
                     value = $5::numeric / 100, type_id = $6, car_id = $7
                 WHERE id = $8",
            )
            .bind(fuel.date)
            .bind(fuel.station_id)
            .bind(fuel.currency_id)
            .bind(fuel.cost)
            .bind(fuel.value)
            .bind(fuel.type_id)
            .bind(fuel.car_id)
            .bind(fuel.id)
            .execute(&self.pool)
            .await?;

            Ok(fuel.id)
        }
    }

    pub async fn filling_stations(&self) -> Result<Vec<FillingStation>, DatabaseError> {
        let stations = sqlx::query_as::<_, FillingStation>(
            "SELECT fs.id, fs.name, fs.created_at FROM filling_stations AS fs ORDER BY fs.name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stations)
    }

    pub async fn fuel_types(&self) -> Result<Vec<FuelType>, DatabaseError> {
        let types = sqlx::query_as::<_, FuelType>("SELECT ft.id, ft.name FROM fuel_types AS ft ORDER BY ft.name")
            .fetch_all(&self.pool)
            .await?;

        Ok(types)
    }
}
