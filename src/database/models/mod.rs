pub mod car;
pub mod currency;
pub mod expense;
pub mod fuel;
pub mod mileage;
pub mod order;
pub mod user;
pub mod user_setting;

pub use car::{Car, CarOwner};
pub use currency::Currency;
pub use expense::{Expense, ExpenseChange};
pub use fuel::{FillingStation, Fuel, FuelChange, FuelType};
pub use mileage::{Mileage, MileageChange};
pub use order::{Order, OrderChange, OrderType};
pub use user::User;
pub use user_setting::{UserSetting, UserSettingChange};

use crate::api;

/// Monetary amount as read from the store: minor units plus currency code.
#[derive(Debug, Clone)]
pub struct Cost {
    pub value: i64,
    pub currency_code: String,
}

impl Cost {
    pub fn to_message(&self) -> api::Cost {
        api::Cost {
            value: self.value,
            currency: self.currency_code.clone(),
        }
    }
}

/// Car identity embedded in another resource.
#[derive(Debug, Clone)]
pub struct CarSummary {
    pub id: i64,
    pub brand: String,
    pub model: String,
}

impl CarSummary {
    pub fn to_message(&self) -> api::CarRef {
        api::CarRef {
            id: self.id,
            name: format!("{} {}", self.brand, self.model),
        }
    }
}
