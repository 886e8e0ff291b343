//! JSON schema of the persistence service.
//!
//! Field names follow the service (`food_name`, `protein`, `date`, ...).
//! Incoming records are decoded leniently; anything that does not fit is
//! treated as missing instead of failing the whole response.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::{FoodLogEntry, FoodLogId, NormalizedEntry};

/// Body of `POST /api/foodlogs`.
#[derive(Debug, Serialize)]
pub struct CreateFoodLogRequest<'a> {
    pub food_name: &'a str,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
    pub user_id: &'a str,
    pub date: DateTime<Utc>,
}

impl<'a> CreateFoodLogRequest<'a> {
    pub fn new(entry: &'a NormalizedEntry, user_id: &'a str, date: DateTime<Utc>) -> Self {
        Self {
            food_name: &entry.food_name,
            calories: entry.calories,
            protein: entry.protein_grams,
            carbs: entry.carbs_grams,
            fats: entry.fats_grams,
            user_id,
            date,
        }
    }
}

/// A food log record as returned by the service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FoodLogRecord {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<FoodLogId>,
    pub user_id: Option<String>,
    pub food_name: Option<String>,
    #[serde(deserialize_with = "lenient_amount")]
    pub calories: Option<u32>,
    #[serde(deserialize_with = "lenient_amount")]
    pub protein: Option<u32>,
    #[serde(deserialize_with = "lenient_amount")]
    pub carbs: Option<u32>,
    #[serde(deserialize_with = "lenient_amount")]
    pub fats: Option<u32>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub date: Option<DateTime<Utc>>,
}

impl FoodLogRecord {
    /// Converts into an entry; `None` when the record carries no id.
    pub fn into_entry(self) -> Option<FoodLogEntry> {
        Some(FoodLogEntry {
            id: self.id?,
            user_id: self.user_id.unwrap_or_default(),
            food_name: self.food_name.unwrap_or_default(),
            calories: self.calories,
            protein_grams: self.protein,
            carbs_grams: self.carbs,
            fats_grams: self.fats,
            logged_at: self.date,
        })
    }
}

/// Error body of a failed request, e.g. `{"error": "..."}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message).filter(|m| !m.trim().is_empty())
    }
}

/// Body of a successful `DELETE /api/foodlogs`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClearResponse {
    pub message: Option<String>,
    pub count: Option<u64>,
}

impl ClearResponse {
    /// Number of deleted records: the `count` field, or the number in a
    /// `"Deleted N logs"` message.
    pub fn deleted(&self) -> u64 {
        if let Some(count) = self.count {
            return count;
        }
        self.message
            .as_deref()
            .and_then(|m| m.split_whitespace().find_map(|word| word.parse().ok()))
            .unwrap_or(0)
    }
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<FoodLogId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Some(FoodLogId::new(s)),
        Value::Number(n) => Some(FoodLogId::new(n.to_string())),
        _ => None,
    })
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    Ok(number
        .filter(|n| n.is_finite() && *n >= 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n.floor() as u32))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => parse_timestamp(&s),
        _ => None,
    })
}

/// Parses RFC 3339, a naive date-time or a plain date, all taken as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(s) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(at.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
}
