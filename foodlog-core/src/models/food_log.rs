use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::nutrition::NutritionTotals;

/// Identifier issued by the persistence service when an entry is created.
///
/// The service may send it as a JSON number or a string; both end up as the
/// same textual id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodLogId(String);

impl FoodLogId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FoodLogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A food log entry that has passed validation but has not been confirmed
/// by the server yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedEntry {
    pub food_name: String,
    pub calories: u32,
    pub protein_grams: u32,
    pub carbs_grams: u32,
    pub fats_grams: u32,
    pub logged_at: Option<DateTime<Utc>>,
}

/// A food log entry confirmed by the persistence service.
///
/// Nutrient values and the timestamp are optional because records written
/// before validation was tightened may lack them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodLogEntry {
    pub id: FoodLogId,
    pub user_id: String,
    pub food_name: String,
    pub calories: Option<u32>,
    pub protein_grams: Option<u32>,
    pub carbs_grams: Option<u32>,
    pub fats_grams: Option<u32>,
    pub logged_at: Option<DateTime<Utc>>,
}

impl FoodLogEntry {
    /// Builds the confirmed form of a normalized entry.
    pub fn confirmed(
        id: FoodLogId,
        user_id: impl Into<String>,
        entry: NormalizedEntry,
        logged_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id: user_id.into(),
            food_name: entry.food_name,
            calories: Some(entry.calories),
            protein_grams: Some(entry.protein_grams),
            carbs_grams: Some(entry.carbs_grams),
            fats_grams: Some(entry.fats_grams),
            logged_at: Some(logged_at),
        }
    }

    /// UTC calendar date the entry is bucketed under.
    pub fn logged_on(&self) -> Option<NaiveDate> {
        self.logged_at.map(|at| at.date_naive())
    }

    /// Nutrient contribution of this entry; missing values count as zero.
    pub fn nutrition(&self) -> NutritionTotals {
        NutritionTotals {
            calories: u64::from(self.calories.unwrap_or(0)),
            protein_grams: u64::from(self.protein_grams.unwrap_or(0)),
            carbs_grams: u64::from(self.carbs_grams.unwrap_or(0)),
            fats_grams: u64::from(self.fats_grams.unwrap_or(0)),
        }
    }
}

impl fmt::Display for FoodLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.food_name, self.nutrition())
    }
}
