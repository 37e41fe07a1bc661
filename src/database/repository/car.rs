use sqlx::PgPool;

use crate::database::models::{Car, CarOwner};
use crate::database::DatabaseError;

pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn cars_by_user(&self, user_id: i64) -> Result<Vec<Car>, DatabaseError> {
        let cars = sqlx::query_as::<_, Car>(
            "SELECT
                c.id,
                c.brand_name AS brand,
                c.model_name AS model,
                c.prod_year AS year,
                c.vin,
                COALESCE(c.id = s.default_car_id, FALSE) AS is_default,
                c.created_at,
                c.updated_at
             FROM cars AS c
             LEFT JOIN user_settings AS s ON c.user_id = s.user_id
             WHERE c.user_id = $1
             ORDER BY c.id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(cars)
    }

    /// Minimal projection for ownership verification; no identity filter in
    /// the query, the comparison happens in the handler.
    pub async fn find(&self, id: i64) -> Result<CarOwner, DatabaseError> {
        sqlx::query_as::<_, CarOwner>("SELECT c.id, c.user_id, c.created_at FROM cars AS c WHERE c.id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DatabaseError::NotFound)
    }
}
