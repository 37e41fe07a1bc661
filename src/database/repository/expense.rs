use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

use crate::database::models::{CarSummary, Cost, Expense, ExpenseChange};
use crate::database::DatabaseError;
use crate::filter::{ExpenseFilter, Paginated};

const EXPENSE_SELECT: &str = "
    SELECT
        e.id,
        e.date,
        CAST(e.cost * 100 AS BIGINT) AS cost,
        cur.code AS currency_code,
        e.description,
        c.id AS car_id,
        c.brand_name AS car_brand,
        c.model_name AS car_model,
        e.type AS expense_type,
        e.created_at
    FROM expenses AS e
    INNER JOIN currencies AS cur ON cur.id = e.currency_id
    LEFT JOIN cars AS c ON c.id = e.car_id";

#[derive(FromRow)]
struct ExpenseRow {
    id: i64,
    date: NaiveDate,
    cost: i64,
    currency_code: String,
    description: String,
    car_id: Option<i64>,
    car_brand: Option<String>,
    car_model: Option<String>,
    expense_type: i32,
    created_at: DateTime<Utc>,
}

impl From<ExpenseRow> for Expense {
    fn from(row: ExpenseRow) -> Self {
        let car = match (row.car_id, row.car_brand, row.car_model) {
            (Some(id), Some(brand), Some(model)) => Some(CarSummary { id, brand, model }),
            _ => None,
        };

        Expense {
            id: row.id,
            cost: Cost {
                value: row.cost,
                currency_code: row.currency_code,
            },
            description: row.description,
            expense_type: row.expense_type,
            car,
            date: row.date,
            created_at: row.created_at,
        }
    }
}

pub struct ExpenseRepository {
    pool: PgPool,
}

impl ExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count_by_user(&self, user_id: i64) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(e.id) FROM expenses AS e WHERE e.user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn expenses_by_user(&self, user_id: i64, filter: &ExpenseFilter) -> Result<Vec<Expense>, DatabaseError> {
        let mut sql = format!("{EXPENSE_SELECT} WHERE e.user_id = $1 ORDER BY e.date DESC, e.id DESC");
        if filter.limit() > 0 {
            sql.push_str(" LIMIT $2 OFFSET $3");
        }

        let query = sqlx::query_as::<_, ExpenseRow>(&sql).bind(user_id);
        let query = if filter.limit() > 0 {
            query.bind(filter.limit() as i64).bind(filter.offset())
        } else {
            query
        };

        let rows = query.fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(Expense::from).collect())
    }

    pub async fn find(&self, id: i64) -> Result<Expense, DatabaseError> {
        let sql = format!("{EXPENSE_SELECT} WHERE e.id = $1");

        let row = sqlx::query_as::<_, ExpenseRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DatabaseError::NotFound)?;

        Ok(row.into())
    }

    pub async fn owner(&self, id: i64) -> Result<i64, DatabaseError> {
        sqlx::query_scalar("SELECT e.user_id FROM expenses AS e WHERE e.id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DatabaseError::NotFound)
    }

    pub async fn save(&self, expense: &ExpenseChange, user_id: i64) -> Result<i64, DatabaseError> {
        if expense.id == 0 {
            let id: i64 = sqlx::query_scalar(
                "INSERT INTO expenses (date, description, currency_id, cost, type, car_id, user_id)
                 VALUES ($1, $2, $3, $4::numeric / 100, $5, $6, $7)
                 RETURNING id",
            )
            .bind(expense.date)
            .bind(&expense.description)
            .bind(expense.currency_id)
            .bind(expense.cost)
            .bind(expense.expense_type)
            .bind(expense.car_id)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

            Ok(id)
        } else {
            sqlx::query(
                "UPDATE expenses
                 SET date = $1, description = $2, currency_id = $3, cost = $4::numeric / 100,
                     type = $5, car_id = $6
                 WHERE id = $7",
            )
            .bind(expense.date)
            .bind(&expense.description)
            .bind(expense.currency_id)
            .bind(expense.cost)
            .bind(expense.expense_type)
            .bind(expense.car_id)
            .bind(expense.id)
            .execute(&self.pool)
            .await?;

            Ok(expense.id)
        }
    }
}
