use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

use crate::database::models::{CarSummary, Cost, Order, OrderChange, OrderType};
use crate::database::DatabaseError;
use crate::filter::{OrderFilter, Paginated};

const ORDER_SELECT: &str = "
    SELECT
        o.id,
        o.date,
        CAST(o.cost * 100 AS BIGINT) AS cost,
        cur.code AS currency_code,
        o.description,
        o.capacity,
        o.used_at,
        c.id AS car_id,
        c.brand_name AS car_brand,
        c.model_name AS car_model,
        m.distance AS distance,
        ot.id AS type_id,
        ot.name AS type_name,
        o.created_at
    FROM orders AS o
    INNER JOIN currencies AS cur ON cur.id = o.currency_id
    LEFT JOIN cars AS c ON c.id = o.car_id
    LEFT JOIN order_types AS ot ON ot.id = o.type_id
    LEFT JOIN mileages AS m ON m.id = o.mileage_id";

#[derive(FromRow)]
struct OrderRow {
    id: i64,
    date: NaiveDate,
    cost: i64,
    currency_code: String,
    description: String,
    capacity: Option<String>,
    used_at: Option<NaiveDate>,
    car_id: Option<i64>,
    car_brand: Option<String>,
    car_model: Option<String>,
    distance: Option<i64>,
    type_id: Option<i64>,
    type_name: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        let car = match (row.car_id, row.car_brand, row.car_model) {
            (Some(id), Some(brand), Some(model)) => Some(CarSummary { id, brand, model }),
            _ => None,
        };
        let order_type = match (row.type_id, row.type_name) {
            (Some(id), Some(name)) => Some(OrderType { id, name }),
            _ => None,
        };

        Order {
            id: row.id,
            cost: Cost {
                value: row.cost,
                currency_code: row.currency_code,
            },
            description: row.description,
            capacity: row.capacity,
            order_type,
            car,
            distance: row.distance,
            date: row.date,
            used_at: row.used_at,
            created_at: row.created_at,
        }
    }
}

pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count_by_user(&self, user_id: i64) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(o.id) FROM orders AS o WHERE o.user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn orders_by_user(&self, user_id: i64, filter: &OrderFilter) -> Result<Vec<Order>, DatabaseError> {
        let mut sql = format!("{ORDER_SELECT} WHERE o.user_id = $1 ORDER BY o.date DESC, o.id DESC");
        if filter.limit() > 0 {
            sql.push_str(" LIMIT $2 OFFSET $3");
        }

        let query = sqlx::query_as::<_, OrderRow>(&sql).bind(user_id);
        let query = if filter.limit() > 0 {
            query.bind(filter.limit() as i64).bind(filter.offset())
        } else {
            query
        };

        let rows = query.fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    pub async fn find(&self, id: i64) -> Result<Order, DatabaseError> {
        let sql = format!("{ORDER_SELECT} WHERE o.id = $1");

        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DatabaseError::NotFound)?;

        Ok(row.into())
    }

    pub async fn owner(&self, id: i64) -> Result<i64, DatabaseError> {
        sqlx::query_scalar("SELECT o.user_id FROM orders AS o WHERE o.id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DatabaseError::NotFound)
    }

    pub async fn find_type(&self, id: i64) -> Result<OrderType, DatabaseError> {
        sqlx::query_as::<_, OrderType>("SELECT ot.id, ot.name FROM order_types AS ot WHERE ot.id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DatabaseError::NotFound)
    }

    pub async fn order_types(&self) -> Result<Vec<OrderType>, DatabaseError> {
        let types = sqlx::query_as::<_, OrderType>("SELECT ot.id, ot.name FROM order_types AS ot ORDER BY ot.name")
            .fetch_all(&self.pool)
            .await?;

        Ok(types)
    }

    pub async fn save(&self, order: &OrderChange, user_id: i64) -> Result<i64, DatabaseError> {
        if order.id == 0 {
            let id: i64 = sqlx::query_scalar(
                "INSERT INTO orders (date, currency_id, cost, description, capacity, type_id, car_id, used_at, user_id)
                 VALUES ($1, $2, $3::numeric / 100, $4, $5, $6, $7, $8, $9)
                 RETURNING id",
            )
            .bind(order.date)
            .bind(order.currency_id)
            .bind(order.cost)
            .bind(&order.description)
            .bind(&order.capacity)
            .bind(order.type_id)
            .bind(order.car_id)
            .bind(order.used_at)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

            Ok(id)
        } else {
            sqlx::query(
                "UPDATE orders
                 SET date = $1, currency_id = $2, cost = $3::numeric / 100, description = $4,
                     capacity = $5, type_id = $6, car_id = $7, used_at = $8
                 WHERE id = $9",
            )
            .bind(order.date)
            .bind(order.currency_id)
            .bind(order.cost)
            .bind(&order.description)
            .bind(&order.capacity)
            .bind(order.type_id)
            .bind(order.car_id)
            .bind(order.used_at)
            .bind(order.id)
            .execute(&self.pool)
            .await?;

            Ok(order.id)
        }
    }
}
