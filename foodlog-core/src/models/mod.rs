mod candidate;
mod food_log;
mod nutrition;

pub use candidate::{FoodLogCandidate, Preset};
pub use food_log::{FoodLogEntry, FoodLogId, NormalizedEntry};
pub use nutrition::{DailyTotals, GoalProgress, NutrientProgress, NutritionGoals, NutritionTotals};
