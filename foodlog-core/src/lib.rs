//! Foodlog Core Library
//!
//! Entry validation, daily nutrition aggregation, the persistence-service
//! client and the log store shared by the foodlog applications.

pub mod aggregate;
pub mod models;
pub mod remote;
pub mod store;
pub mod validate;

pub use aggregate::{aggregate, daily_totals};
pub use models::{
    DailyTotals, FoodLogCandidate, FoodLogEntry, FoodLogId, GoalProgress, NormalizedEntry,
    NutrientProgress, NutritionGoals, NutritionTotals, Preset,
};
pub use remote::{check_server, FoodLogApi, RemoteClient, RemoteError};
pub use store::{FoodLogSession, LogStore, Operation, Retried, StoreError, StoreStatus};
pub use validate::{validate, Field, FieldError, FieldErrors};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
