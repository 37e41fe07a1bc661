//! Wire representation of every message crossing the RPC boundary.
//!
//! Monetary amounts travel as integers in minor currency units (cents); the
//! repository layer converts to and from the decimal columns. Responses are
//! always built from the stored row, never echoed from caller input.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::filter::PaginationMeta;

/// Monetary amount in minor units plus its ISO currency code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cost {
    pub value: i64,
    pub currency: String,
}

/// Reference to another resource by identifier; 0 means "not set".
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ObjectRef {
    #[serde(default)]
    pub id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Car {
    pub id: i64,
    pub name: String,
    pub default: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Compact car reference embedded in other resources.
#[derive(Debug, Clone, Serialize)]
pub struct CarRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Currency {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub default: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FillingStation {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FuelType {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderType {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Fuel {
    pub id: i64,
    pub car: Option<CarRef>,
    pub cost: Cost,
    /// Refueled amount in hundredths of a liter.
    pub value: i64,
    pub station: FillingStation,
    #[serde(rename = "type")]
    pub fuel_type: FuelType,
    pub distance: Option<i64>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: i64,
    pub car: Option<CarRef>,
    pub cost: Cost,
    pub description: String,
    pub capacity: Option<String>,
    #[serde(rename = "type")]
    pub order_type: Option<OrderType>,
    pub distance: Option<i64>,
    pub date: NaiveDate,
    pub used_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Expense {
    pub id: i64,
    pub car: Option<CarRef>,
    pub cost: Cost,
    pub description: String,
    #[serde(rename = "type")]
    pub expense_type: i32,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Mileage {
    pub id: i64,
    pub car: Option<CarRef>,
    pub distance: i64,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserSettings {
    pub id: i64,
    pub default_car: Option<CarRef>,
    pub default_currency: Option<Currency>,
    pub default_fuel_type: Option<FuelType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DefaultCurrency {
    pub found: bool,
    pub currency: Option<Currency>,
}

// Collections

#[derive(Debug, Serialize)]
pub struct CarCollection {
    pub cars: Vec<Car>,
}

#[derive(Debug, Serialize)]
pub struct CurrencyCollection {
    pub currencies: Vec<Currency>,
}

#[derive(Debug, Serialize)]
pub struct FillingStationCollection {
    pub stations: Vec<FillingStation>,
}

#[derive(Debug, Serialize)]
pub struct FuelTypeCollection {
    pub types: Vec<FuelType>,
}

#[derive(Debug, Serialize)]
pub struct OrderTypeCollection {
    pub types: Vec<OrderType>,
}

#[derive(Debug, Serialize)]
pub struct FuelCollection {
    pub fuels: Vec<Fuel>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Serialize)]
pub struct OrderCollection {
    pub orders: Vec<Order>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Serialize)]
pub struct ExpenseCollection {
    pub expenses: Vec<Expense>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Serialize)]
pub struct MileageCollection {
    pub mileages: Vec<Mileage>,
    pub meta: PaginationMeta,
}

// Authentication

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(default)]
    pub token: String,
}

// Save requests. Required fields are optional at the serde level so a
// missing value surfaces as a uniform invalid-argument error instead of a
// deserialization failure.

#[derive(Debug, Default, Deserialize)]
pub struct SaveFuelRequest {
    #[serde(default)]
    pub id: i64,
    pub cost: Option<Cost>,
    #[serde(default)]
    pub value: i64,
    pub station: Option<ObjectRef>,
    #[serde(rename = "type")]
    pub fuel_type: Option<ObjectRef>,
    pub car: Option<ObjectRef>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SaveOrderRequest {
    #[serde(default)]
    pub id: i64,
    pub cost: Option<Cost>,
    #[serde(default)]
    pub description: String,
    pub capacity: Option<String>,
    #[serde(rename = "type")]
    pub order_type: Option<ObjectRef>,
    pub car: Option<ObjectRef>,
    pub date: Option<NaiveDate>,
    pub used_at: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SaveExpenseRequest {
    #[serde(default)]
    pub id: i64,
    pub cost: Option<Cost>,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub expense_type: i32,
    pub car: Option<ObjectRef>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SaveMileageRequest {
    #[serde(default)]
    pub id: i64,
    pub car: Option<ObjectRef>,
    #[serde(default)]
    pub distance: i64,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SaveUserSettingsRequest {
    #[serde(default)]
    pub id: i64,
    pub default_car: Option<ObjectRef>,
    pub default_currency: Option<ObjectRef>,
    pub default_fuel_type: Option<ObjectRef>,
}
