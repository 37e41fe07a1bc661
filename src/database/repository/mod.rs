pub mod car;
pub mod currency;
pub mod expense;
pub mod fuel;
pub mod mileage;
pub mod order;
pub mod user;
pub mod user_setting;

pub use car::CarRepository;
pub use currency::CurrencyRepository;
pub use expense::ExpenseRepository;
pub use fuel::FuelRepository;
pub use mileage::MileageRepository;
pub use order::OrderRepository;
pub use user::UserRepository;
pub use user_setting::UserSettingRepository;
