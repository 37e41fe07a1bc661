use sqlx::PgPool;

use crate::database::models::Currency;
use crate::database::DatabaseError;

pub struct CurrencyRepository {
    pool: PgPool,
}

impl CurrencyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All currencies; the default flag reflects the given user's settings.
    pub async fn currencies(&self, user_id: i64) -> Result<Vec<Currency>, DatabaseError> {
        let currencies = sqlx::query_as::<_, Currency>(
            "SELECT
                c.id,
                c.name,
                c.code,
                (s.id IS NOT NULL) AS is_default,
                c.created_at
             FROM currencies AS c
             LEFT JOIN user_settings AS s ON c.id = s.default_currency_id AND s.user_id = $1
             ORDER BY c.name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(currencies)
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Currency, DatabaseError> {
        sqlx::query_as::<_, Currency>(
            "SELECT c.id, c.name, c.code, FALSE AS is_default, c.created_at
             FROM currencies AS c
             WHERE c.code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DatabaseError::NotFound)
    }

    pub async fn find(&self, id: i64) -> Result<Currency, DatabaseError> {
        sqlx::query_as::<_, Currency>(
            "SELECT c.id, c.name, c.code, FALSE AS is_default, c.created_at
             FROM currencies AS c
             WHERE c.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DatabaseError::NotFound)
    }
}
