use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{attached_car, check_owner, required_reference};
use crate::api::{self, ExpenseCollection, SaveExpenseRequest};
use crate::database::models::{Expense, ExpenseChange};
use crate::database::repository::{CarRepository, CurrencyRepository, ExpenseRepository};
use crate::error::ApiError;
use crate::filter::{self, ExpenseFilter, PaginationMeta};
use crate::middleware::AuthUser;
use crate::AppState;

/// GET /api/expenses - the caller's generic expenses, paginated.
pub async fn get_expenses(
    State(state): State<AppState>,
    user: AuthUser,
    Query(f): Query<ExpenseFilter>,
) -> Result<Json<ExpenseCollection>, ApiError> {
    let repo = ExpenseRepository::new(state.pool.clone());

    let total = repo.count_by_user(user.id).await?;
    if filter::page_out_of_range(&f, total) {
        return Err(ApiError::not_found("expenses not found"));
    }

    let expenses = repo.expenses_by_user(user.id, &f).await?;
    tracing::info!(cnt = expenses.len(), "expenses: populate list");

    Ok(Json(ExpenseCollection {
        expenses: expenses.iter().map(Expense::to_message).collect(),
        meta: PaginationMeta::new(&f, total),
    }))
}

/// GET /api/expenses/:id
pub async fn find_expense(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<api::Expense>, ApiError> {
    if id <= 0 {
        return Err(ApiError::invalid_argument("invalid id"));
    }

    let repo = ExpenseRepository::new(state.pool.clone());
    check_owner(repo.owner(id).await, &user, "expense")?;

    let expense = repo.find(id).await.map_err(ApiError::internal)?;

    Ok(Json(expense.to_message()))
}

/// POST /api/expenses - create or update; responds with the stored row.
pub async fn save_expense(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<SaveExpenseRequest>,
) -> Result<Json<api::Expense>, ApiError> {
    let currency_code = req.cost.as_ref().map(|c| c.currency.as_str()).unwrap_or("");
    if currency_code.is_empty() {
        return Err(ApiError::invalid_argument("empty currency code"));
    }

    if req.expense_type == 0 {
        return Err(ApiError::invalid_argument("expense type is required"));
    }

    let Some(date) = req.date else {
        return Err(ApiError::invalid_argument("date is required"));
    };

    let repo = ExpenseRepository::new(state.pool.clone());
    if req.id > 0 {
        check_owner(repo.owner(req.id).await, &user, "expense")?;
    }

    let currency_repo = CurrencyRepository::new(state.pool.clone());
    let currency = required_reference(currency_repo.find_by_code(currency_code).await, "currency")?;

    let car_repo = CarRepository::new(state.pool.clone());
    let car = attached_car(&car_repo, req.car.as_ref(), &user).await?;

    let change = ExpenseChange {
        id: req.id,
        date,
        currency_id: currency.id,
        cost: req.cost.as_ref().map(|c| c.value).unwrap_or(0),
        description: req.description,
        expense_type: req.expense_type,
        car_id: car.map(|c| c.id),
    };

    let id = repo.save(&change, user.id).await.map_err(ApiError::internal)?;
    let expense = repo.find(id).await.map_err(ApiError::internal)?;

    Ok(Json(expense.to_message()))
}
