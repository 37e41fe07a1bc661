use chrono::{DateTime, NaiveDate, Utc};

use super::{CarSummary, Cost};
use crate::api;

/// Generic expense outside the fuel/maintenance categories.
#[derive(Debug, Clone)]
pub struct Expense {
    pub id: i64,
    pub cost: Cost,
    pub description: String,
    pub expense_type: i32,
    pub car: Option<CarSummary>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn to_message(&self) -> api::Expense {
        api::Expense {
            id: self.id,
            car: self.car.as_ref().map(CarSummary::to_message),
            cost: self.cost.to_message(),
            description: self.description.clone(),
            expense_type: self.expense_type,
            date: self.date,
            created_at: self.created_at,
        }
    }
}

/// Validated write set for an expense; id 0 means insert.
#[derive(Debug, Clone)]
pub struct ExpenseChange {
    pub id: i64,
    pub date: NaiveDate,
    pub currency_id: i64,
    pub cost: i64,
    pub description: String,
    pub expense_type: i32,
    pub car_id: Option<i64>,
}
