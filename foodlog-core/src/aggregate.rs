//! Daily nutrition totals computed from a collection of entries.
//!
//! Entries are bucketed by the UTC calendar date of `logged_at`. Both
//! functions are pure folds, so calling them repeatedly is free of side
//! effects and the order of entries never matters.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::{DailyTotals, FoodLogEntry, NutritionTotals};

/// Sums the nutrients of every entry logged on `date` (UTC).
///
/// Entries without a timestamp belong to no date. Missing nutrient values
/// contribute zero.
pub fn aggregate<'a, I>(entries: I, date: NaiveDate) -> NutritionTotals
where
    I: IntoIterator<Item = &'a FoodLogEntry>,
{
    entries
        .into_iter()
        .filter(|entry| entry.logged_on() == Some(date))
        .map(FoodLogEntry::nutrition)
        .sum()
}

/// Groups entries by UTC date and sums each bucket.
pub fn daily_totals<'a, I>(entries: I) -> DailyTotals
where
    I: IntoIterator<Item = &'a FoodLogEntry>,
{
    let mut buckets: BTreeMap<NaiveDate, NutritionTotals> = BTreeMap::new();

    for entry in entries {
        if let Some(date) = entry.logged_on() {
            *buckets.entry(date).or_default() += entry.nutrition();
        }
    }

    DailyTotals::from_map(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodLogId;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(id: &str, calories: u32, macros: (u32, u32, u32), logged_at: DateTime<Utc>) -> FoodLogEntry {
        FoodLogEntry {
            id: FoodLogId::new(id),
            user_id: "demo-user".to_string(),
            food_name: format!("food {}", id),
            calories: Some(calories),
            protein_grams: Some(macros.0),
            carbs_grams: Some(macros.1),
            fats_grams: Some(macros.2),
            logged_at: Some(logged_at),
        }
    }

    #[test]
    fn test_empty_collection_is_zero() {
        let entries: Vec<FoodLogEntry> = Vec::new();
        assert_eq!(aggregate(&entries, day(2025, 1, 1)), NutritionTotals::default());
        assert!(daily_totals(&entries).is_empty());
    }

    #[test]
    fn test_sums_only_requested_date() {
        let entries = vec![
            entry("1", 105, (1, 27, 0), at(2025, 1, 1, 8)),
            entry("2", 165, (31, 0, 4), at(2025, 1, 1, 19)),
            entry("3", 95, (0, 25, 0), at(2025, 1, 2, 7)),
        ];

        assert_eq!(
            aggregate(&entries, day(2025, 1, 1)),
            NutritionTotals::new(270, 32, 27, 4)
        );
        assert_eq!(
            aggregate(&entries, day(2025, 1, 2)),
            NutritionTotals::new(95, 0, 25, 0)
        );
        assert!(aggregate(&entries, day(2025, 1, 3)).is_zero());
    }

    #[test]
    fn test_buckets_by_utc_day_boundary() {
        let late = Utc.with_ymd_and_hms(2025, 1, 1, 23, 59, 59).unwrap();
        let early = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();
        let entries = vec![
            entry("1", 100, (0, 0, 0), late),
            entry("2", 200, (0, 0, 0), early),
        ];

        assert_eq!(aggregate(&entries, day(2025, 1, 1)).calories, 100);
        assert_eq!(aggregate(&entries, day(2025, 1, 2)).calories, 200);
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = entry("a", 105, (1, 27, 0), at(2025, 5, 5, 9));
        let b = entry("b", 130, (23, 9, 0), at(2025, 5, 5, 12));
        let date = day(2025, 5, 5);

        assert_eq!(
            aggregate(&[a.clone(), b.clone()], date),
            aggregate(&[b, a], date)
        );
    }

    #[test]
    fn test_incremental_equals_bulk() {
        let entries: Vec<FoodLogEntry> = (0..10)
            .map(|i| entry(&i.to_string(), 50 + i, (i, 2 * i, 1), at(2025, 2, 2, i)))
            .collect();
        let date = day(2025, 2, 2);

        let mut running = NutritionTotals::default();
        for e in &entries {
            running += aggregate(std::iter::once(e), date);
        }

        assert_eq!(running, aggregate(&entries, date));
        assert_eq!(running, daily_totals(&entries).get(date));
    }

    #[test]
    fn test_legacy_records_contribute_what_they_have() {
        let mut legacy = entry("old", 300, (10, 10, 10), at(2025, 3, 3, 10));
        legacy.protein_grams = None;
        legacy.calories = None;

        let mut undated = entry("undated", 999, (9, 9, 9), at(2025, 3, 3, 10));
        undated.logged_at = None;

        let entries = vec![legacy, undated, entry("new", 100, (1, 1, 1), at(2025, 3, 3, 11))];

        assert_eq!(
            aggregate(&entries, day(2025, 3, 3)),
            NutritionTotals::new(100, 1, 11, 11)
        );
        assert_eq!(daily_totals(&entries).len(), 1);
    }

    #[test]
    fn test_daily_totals_groups_each_date() {
        let entries = vec![
            entry("1", 10, (1, 1, 1), at(2025, 1, 3, 1)),
            entry("2", 20, (2, 2, 2), at(2025, 1, 1, 1)),
            entry("3", 30, (3, 3, 3), at(2025, 1, 3, 5)),
        ];

        let totals = daily_totals(&entries);
        let dates: Vec<NaiveDate> = totals.dates().collect();
        assert_eq!(dates, vec![day(2025, 1, 1), day(2025, 1, 3)]);
        assert_eq!(totals.get(day(2025, 1, 3)), NutritionTotals::new(40, 4, 4, 4));
    }
}
