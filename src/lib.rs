pub mod catalog;
pub mod cli;
pub mod ensemble;
pub mod error;
pub mod interface;
pub mod models;
pub mod nutrition;
pub mod pipeline;

pub use catalog::Catalog;
pub use error::{PlanError, Result};
pub use models::{DayPlan, FoodCategory, FoodItem, UserPreferences};
