use serde::Deserialize;

use super::Paginated;

// One explicit filter type per list endpoint. They are identical today, but
// each family owns its filter so resource-specific criteria (car, year,
// station) can grow without touching the others.

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct FuelFilter {
    #[serde(default)]
    pub page: i32,
    #[serde(default)]
    pub limit: i32,
}

impl Paginated for FuelFilter {
    fn page(&self) -> i32 {
        self.page
    }

    fn limit(&self) -> i32 {
        self.limit
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct OrderFilter {
    #[serde(default)]
    pub page: i32,
    #[serde(default)]
    pub limit: i32,
}

impl Paginated for OrderFilter {
    fn page(&self) -> i32 {
        self.page
    }

    fn limit(&self) -> i32 {
        self.limit
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ExpenseFilter {
    #[serde(default)]
    pub page: i32,
    #[serde(default)]
    pub limit: i32,
}

impl Paginated for ExpenseFilter {
    fn page(&self) -> i32 {
        self.page
    }

    fn limit(&self) -> i32 {
        self.limit
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MileageFilter {
    #[serde(default)]
    pub page: i32,
    #[serde(default)]
    pub limit: i32,
}

impl Paginated for MileageFilter {
    fn page(&self) -> i32 {
        self.page
    }

    fn limit(&self) -> i32 {
        self.limit
    }
}
