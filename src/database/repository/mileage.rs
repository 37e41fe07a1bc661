use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

use crate::database::models::{CarSummary, Mileage, MileageChange};
use crate::database::DatabaseError;
use crate::filter::{MileageFilter, Paginated};

const MILEAGE_SELECT: &str = "
    SELECT
        m.id,
        m.date,
        m.distance,
        c.id AS car_id,
        c.brand_name AS car_brand,
        c.model_name AS car_model,
        m.created_at
    FROM mileages AS m
    INNER JOIN cars AS c ON c.id = m.car_id";

#[derive(FromRow)]
struct MileageRow {
    id: i64,
    date: NaiveDate,
    distance: i64,
    car_id: Option<i64>,
    car_brand: Option<String>,
    car_model: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<MileageRow> for Mileage {
    fn from(row: MileageRow) -> Self {
        let car = match (row.car_id, row.car_brand, row.car_model) {
            (Some(id), Some(brand), Some(model)) => Some(CarSummary { id, brand, model }),
            _ => None,
        };

        Mileage {
            id: row.id,
            distance: row.distance,
            car,
            date: row.date,
            created_at: row.created_at,
        }
    }
}

pub struct MileageRepository {
    pool: PgPool,
}

impl MileageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count_by_user(&self, user_id: i64) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(m.id)
             FROM mileages AS m
             INNER JOIN cars AS c ON c.id = m.car_id
             WHERE c.user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    pub async fn mileages_by_user(&self, user_id: i64, filter: &MileageFilter) -> Result<Vec<Mileage>, DatabaseError> {
        let mut sql = format!("{MILEAGE_SELECT} WHERE c.user_id = $1 ORDER BY m.date DESC, m.id DESC");
        if filter.limit() > 0 {
            sql.push_str(" LIMIT $2 OFFSET $3");
        }

        let query = sqlx::query_as::<_, MileageRow>(&sql).bind(user_id);
        let query = if filter.limit() > 0 {
            query.bind(filter.limit() as i64).bind(filter.offset())
        } else {
            query
        };

        let rows = query.fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(Mileage::from).collect())
    }

    pub async fn find(&self, id: i64) -> Result<Mileage, DatabaseError> {
        let sql = format!("{MILEAGE_SELECT} WHERE m.id = $1");

        let row = sqlx::query_as::<_, MileageRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DatabaseError::NotFound)?;

        Ok(row.into())
    }

    /// Exact duplicate lookup used on create so an identical submission
    /// returns the existing row instead of inserting twice.
    pub async fn find_uniq(&self, distance: i64, car_id: i64, date: NaiveDate) -> Result<Option<Mileage>, DatabaseError> {
        let sql = format!("{MILEAGE_SELECT} WHERE m.distance = $1 AND m.date = $2 AND c.id = $3");

        let row = sqlx::query_as::<_, MileageRow>(&sql)
            .bind(distance)
            .bind(date)
            .bind(car_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Mileage::from))
    }

    /// A mileage record is owned through its car.
    pub async fn owner(&self, id: i64) -> Result<i64, DatabaseError> {
        sqlx::query_scalar(
            "SELECT c.user_id
             FROM mileages AS m
             INNER JOIN cars AS c ON c.id = m.car_id
             WHERE m.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DatabaseError::NotFound)
    }

    /// Odometer readings must stay monotonic per car: nothing recorded later
    /// may be below this distance, nothing earlier above it.
    pub async fn validate(&self, mileage: &MileageChange) -> Result<(), DatabaseError> {
        let min_after: Option<i64> =
            sqlx::query_scalar("SELECT MIN(distance) FROM mileages WHERE car_id = $1 AND date > $2")
                .bind(mileage.car_id)
                .bind(mileage.date)
                .fetch_one(&self.pool)
                .await?;

        if let Some(distance) = min_after {
            if distance < mileage.distance {
                return Err(DatabaseError::InvalidDistance);
            }
        }

        let max_before: Option<i64> =
            sqlx::query_scalar("SELECT MAX(distance) FROM mileages WHERE car_id = $1 AND date < $2")
                .bind(mileage.car_id)
                .bind(mileage.date)
                .fetch_one(&self.pool)
                .await?;

        if let Some(distance) = max_before {
            if distance > mileage.distance {
                return Err(DatabaseError::InvalidDistance);
            }
        }

        Ok(())
    }

    pub async fn save(&self, mileage: &MileageChange) -> Result<i64, DatabaseError> {
        if mileage.id == 0 {
            let id: i64 = sqlx::query_scalar(
                "INSERT INTO mileages (date, distance, car_id) VALUES ($1, $2, $3) RETURNING id",
            )
            .bind(mileage.date)
            .bind(mileage.distance)
            .bind(mileage.car_id)
            .fetch_one(&self.pool)
            .await?;

            Ok(id)
        } else {
            sqlx::query("UPDATE mileages SET date = $1, distance = $2, car_id = $3 WHERE id = $4")
                .bind(mileage.date)
                .bind(mileage.distance)
                .bind(mileage.car_id)
                .bind(mileage.id)
                .execute(&self.pool)
                .await?;

            Ok(mileage.id)
        }
    }
}
