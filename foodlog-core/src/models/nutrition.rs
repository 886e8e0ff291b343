use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Summed nutrient values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: u64,
    pub protein_grams: u64,
    pub carbs_grams: u64,
    pub fats_grams: u64,
}

impl NutritionTotals {
    pub fn new(calories: u64, protein_grams: u64, carbs_grams: u64, fats_grams: u64) -> Self {
        Self {
            calories,
            protein_grams,
            carbs_grams,
            fats_grams,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl Add for NutritionTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein_grams: self.protein_grams + rhs.protein_grams,
            carbs_grams: self.carbs_grams + rhs.carbs_grams,
            fats_grams: self.fats_grams + rhs.fats_grams,
        }
    }
}

impl AddAssign for NutritionTotals {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for NutritionTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl fmt::Display for NutritionTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} kcal | Protein: {}g | Carbs: {}g | Fats: {}g",
            self.calories, self.protein_grams, self.carbs_grams, self.fats_grams
        )
    }
}

/// Nutrition totals keyed by UTC calendar date.
///
/// Always derived from an entry collection, never edited directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DailyTotals(BTreeMap<NaiveDate, NutritionTotals>);

impl DailyTotals {
    pub(crate) fn from_map(map: BTreeMap<NaiveDate, NutritionTotals>) -> Self {
        Self(map)
    }

    /// Totals for `date`; zero when nothing was logged that day.
    pub fn get(&self, date: NaiveDate) -> NutritionTotals {
        self.0.get(&date).copied().unwrap_or_default()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, NutritionTotals)> + '_ {
        self.0.iter().map(|(date, totals)| (*date, *totals))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Daily nutrition targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionGoals {
    pub calories: u64,
    pub protein_grams: u64,
    pub carbs_grams: u64,
    pub fats_grams: u64,
}

impl Default for NutritionGoals {
    fn default() -> Self {
        Self {
            calories: 2500,
            protein_grams: 150,
            carbs_grams: 300,
            fats_grams: 80,
        }
    }
}

impl NutritionGoals {
    /// Compares consumed totals with these goals.
    pub fn progress(&self, totals: &NutritionTotals) -> GoalProgress {
        GoalProgress {
            calories: NutrientProgress::new(totals.calories, self.calories),
            protein: NutrientProgress::new(totals.protein_grams, self.protein_grams),
            carbs: NutrientProgress::new(totals.carbs_grams, self.carbs_grams),
            fats: NutrientProgress::new(totals.fats_grams, self.fats_grams),
        }
    }
}

/// Progress of one nutrient towards its goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NutrientProgress {
    pub consumed: u64,
    pub goal: u64,
    /// Percentage of the goal consumed. Not capped at 100.
    pub percent: f64,
}

impl NutrientProgress {
    fn new(consumed: u64, goal: u64) -> Self {
        let percent = if goal == 0 {
            0.0
        } else {
            consumed as f64 / goal as f64 * 100.0
        };
        Self {
            consumed,
            goal,
            percent,
        }
    }

    pub fn remaining(&self) -> u64 {
        self.goal.saturating_sub(self.consumed)
    }

    pub fn over(&self) -> u64 {
        self.consumed.saturating_sub(self.goal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalProgress {
    pub calories: NutrientProgress,
    pub protein: NutrientProgress,
    pub carbs: NutrientProgress,
    pub fats: NutrientProgress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_add_and_sum() {
        let a = NutritionTotals::new(105, 1, 27, 0);
        let b = NutritionTotals::new(165, 31, 0, 4);

        assert_eq!(a + b, NutritionTotals::new(270, 32, 27, 4));
        assert_eq!(
            vec![a, b, a].into_iter().sum::<NutritionTotals>(),
            NutritionTotals::new(375, 33, 54, 4)
        );
        assert!(Vec::<NutritionTotals>::new()
            .into_iter()
            .sum::<NutritionTotals>()
            .is_zero());
    }

    #[test]
    fn test_totals_display() {
        let totals = NutritionTotals::new(650, 25, 80, 28);
        assert_eq!(
            format!("{}", totals),
            "650 kcal | Protein: 25g | Carbs: 80g | Fats: 28g"
        );
    }

    #[test]
    fn test_daily_totals_missing_date_is_zero() {
        let totals = DailyTotals::default();
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(totals.get(date).is_zero());
        assert!(totals.is_empty());
    }

    #[test]
    fn test_default_goals() {
        let goals = NutritionGoals::default();
        assert_eq!(goals.calories, 2500);
        assert_eq!(goals.protein_grams, 150);
        assert_eq!(goals.carbs_grams, 300);
        assert_eq!(goals.fats_grams, 80);
    }

    #[test]
    fn test_progress_under_and_over_goal() {
        let goals = NutritionGoals::default();
        let progress = goals.progress(&NutritionTotals::new(1250, 200, 0, 80));

        assert_eq!(progress.calories.percent, 50.0);
        assert_eq!(progress.calories.remaining(), 1250);
        assert_eq!(progress.calories.over(), 0);

        assert_eq!(progress.protein.remaining(), 0);
        assert_eq!(progress.protein.over(), 50);

        assert_eq!(progress.fats.percent, 100.0);
        assert_eq!(progress.carbs.percent, 0.0);
    }

    #[test]
    fn test_progress_with_zero_goal() {
        let goals = NutritionGoals {
            calories: 0,
            ..NutritionGoals::default()
        };
        let progress = goals.progress(&NutritionTotals::new(10, 0, 0, 0));
        assert_eq!(progress.calories.percent, 0.0);
        assert_eq!(progress.calories.over(), 10);
    }

    #[test]
    fn test_goals_partial_deserialize() {
        let goals: NutritionGoals = serde_json::from_str(r#"{"calories": 2000}"#).unwrap();
        assert_eq!(goals.calories, 2000);
        assert_eq!(goals.protein_grams, 150);
    }
}
