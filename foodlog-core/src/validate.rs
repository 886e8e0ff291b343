//! Validation and normalization of new food log entries.
//!
//! Every field is checked and all failures are reported together, so the
//! caller can show each problem to the user at once.

use serde::Serialize;
use std::fmt;

use crate::models::{FoodLogCandidate, NormalizedEntry};

pub const MIN_FOOD_NAME_CHARS: usize = 2;
pub const MAX_FOOD_NAME_CHARS: usize = 100;
pub const MAX_CALORIES: u32 = 10_000;
pub const MAX_MACRO_GRAMS: u32 = 1_000;

/// A candidate field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FoodName,
    Calories,
    ProteinGrams,
    CarbsGrams,
    FatsGrams,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::FoodName => "foodName",
            Field::Calories => "calories",
            Field::ProteinGrams => "proteinGrams",
            Field::CarbsGrams => "carbsGrams",
            Field::FatsGrams => "fatsGrams",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Field::FoodName => "Food name",
            Field::Calories => "Calories",
            Field::ProteinGrams => "Protein",
            Field::CarbsGrams => "Carbs",
            Field::FatsGrams => "Fats",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All field errors found in one candidate. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    pub fn fields(&self) -> Vec<Field> {
        self.0.iter().map(|e| e.field).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

/// Validates a candidate and normalizes it for submission.
///
/// The food name is trimmed and must be 2 to 100 characters. Each nutrient
/// is required, must parse as a non-negative number within its ceiling and
/// is rounded down to an integer.
pub fn validate(candidate: &FoodLogCandidate) -> Result<NormalizedEntry, FieldErrors> {
    let mut errors = Vec::new();

    let food_name = match check_food_name(candidate.food_name.as_deref()) {
        Ok(name) => Some(name),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    let mut numeric = |field: Field, raw: Option<&str>, max: u32| match check_amount(field, raw, max)
    {
        Ok(value) => Some(value),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    let calories = numeric(Field::Calories, candidate.calories.as_deref(), MAX_CALORIES);
    let protein = numeric(
        Field::ProteinGrams,
        candidate.protein.as_deref(),
        MAX_MACRO_GRAMS,
    );
    let carbs = numeric(Field::CarbsGrams, candidate.carbs.as_deref(), MAX_MACRO_GRAMS);
    let fats = numeric(Field::FatsGrams, candidate.fats.as_deref(), MAX_MACRO_GRAMS);

    match (food_name, calories, protein, carbs, fats) {
        (Some(food_name), Some(calories), Some(protein_grams), Some(carbs_grams), Some(fats_grams))
            if errors.is_empty() =>
        {
            Ok(NormalizedEntry {
                food_name,
                calories,
                protein_grams,
                carbs_grams,
                fats_grams,
                logged_at: candidate.logged_at,
            })
        }
        _ => Err(FieldErrors(errors)),
    }
}

fn check_food_name(raw: Option<&str>) -> Result<String, FieldError> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    let chars = trimmed.chars().count();

    if chars == 0 {
        return Err(FieldError::new(Field::FoodName, "Food name is required"));
    }
    if chars < MIN_FOOD_NAME_CHARS {
        return Err(FieldError::new(
            Field::FoodName,
            format!(
                "Food name must be at least {} characters",
                MIN_FOOD_NAME_CHARS
            ),
        ));
    }
    if chars > MAX_FOOD_NAME_CHARS {
        return Err(FieldError::new(
            Field::FoodName,
            format!(
                "Food name must be at most {} characters",
                MAX_FOOD_NAME_CHARS
            ),
        ));
    }

    Ok(trimmed.to_string())
}

fn check_amount(field: Field, raw: Option<&str>, max: u32) -> Result<u32, FieldError> {
    let text = raw.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(FieldError::new(
            field,
            format!("{} is required", field.label()),
        ));
    }

    let value = match text.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            return Err(FieldError::new(
                field,
                format!("{} must be a number", field.label()),
            ))
        }
    };

    if value < 0.0 {
        return Err(FieldError::new(
            field,
            format!("{} must be a positive number", field.label()),
        ));
    }
    if value > f64::from(max) {
        return Err(FieldError::new(
            field,
            format!("{} seems too high (max {})", field.label(), max),
        ));
    }

    Ok(value.floor() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn banana() -> FoodLogCandidate {
        FoodLogCandidate::new("Banana")
            .with_calories(105)
            .with_protein(1)
            .with_carbs(27)
            .with_fats(0)
    }

    #[test]
    fn test_valid_candidate_is_normalized() {
        let entry = validate(&banana()).unwrap();
        assert_eq!(entry.food_name, "Banana");
        assert_eq!(entry.calories, 105);
        assert_eq!(entry.protein_grams, 1);
        assert_eq!(entry.carbs_grams, 27);
        assert_eq!(entry.fats_grams, 0);
        assert!(entry.logged_at.is_none());
    }

    #[test]
    fn test_food_name_is_trimmed() {
        let mut candidate = banana();
        candidate.food_name = Some("   Greek Yogurt \t".to_string());
        assert_eq!(validate(&candidate).unwrap().food_name, "Greek Yogurt");
    }

    #[test]
    fn test_fractional_values_round_down() {
        let candidate = banana()
            .with_calories("99.9")
            .with_protein("0.5")
            .with_carbs(" 12.999 ")
            .with_fats("1e1");
        let entry = validate(&candidate).unwrap();
        assert_eq!(entry.calories, 99);
        assert_eq!(entry.protein_grams, 0);
        assert_eq!(entry.carbs_grams, 12);
        assert_eq!(entry.fats_grams, 10);
    }

    #[test]
    fn test_ceilings_are_inclusive() {
        let candidate = banana()
            .with_calories(MAX_CALORIES)
            .with_protein(MAX_MACRO_GRAMS)
            .with_carbs(MAX_MACRO_GRAMS)
            .with_fats(MAX_MACRO_GRAMS);
        let entry = validate(&candidate).unwrap();
        assert_eq!(entry.calories, 10_000);
        assert_eq!(entry.fats_grams, 1_000);
    }

    #[test]
    fn test_short_or_missing_name_only_reports_food_name() {
        for name in [None, Some(""), Some("   "), Some("X"), Some(" X ")] {
            let mut candidate = banana();
            candidate.food_name = name.map(str::to_string);

            let errors = validate(&candidate).unwrap_err();
            assert_eq!(errors.fields(), vec![Field::FoodName], "name {:?}", name);
        }
    }

    #[test]
    fn test_long_name_rejected() {
        let mut candidate = banana();
        candidate.food_name = Some("a".repeat(101));
        assert!(validate(&candidate)
            .unwrap_err()
            .contains(Field::FoodName));

        candidate.food_name = Some("é".repeat(100));
        assert!(validate(&candidate).is_ok());
    }

    #[test]
    fn test_calories_over_ceiling() {
        let errors = validate(&banana().with_calories(10_001)).unwrap_err();
        assert_eq!(errors.fields(), vec![Field::Calories]);
        assert!(errors
            .get(Field::Calories)
            .unwrap()
            .message
            .contains("too high"));
    }

    #[test]
    fn test_macro_ceiling_is_lower_than_calories() {
        let errors = validate(&banana().with_protein(1001)).unwrap_err();
        assert_eq!(errors.fields(), vec![Field::ProteinGrams]);
    }

    #[test]
    fn test_negative_and_unparseable_values() {
        let candidate = banana()
            .with_calories("abc")
            .with_protein(-1)
            .with_carbs("NaN")
            .with_fats("inf");
        let errors = validate(&candidate).unwrap_err();
        assert_eq!(
            errors.fields(),
            vec![
                Field::Calories,
                Field::ProteinGrams,
                Field::CarbsGrams,
                Field::FatsGrams
            ]
        );
    }

    #[test]
    fn test_missing_numeric_field_is_required_not_zero() {
        let mut candidate = banana();
        candidate.fats = None;
        let errors = validate(&candidate).unwrap_err();
        assert_eq!(errors.fields(), vec![Field::FatsGrams]);
        assert!(errors
            .get(Field::FatsGrams)
            .unwrap()
            .message
            .contains("required"));

        candidate.fats = Some("  ".to_string());
        assert!(validate(&candidate).unwrap_err().contains(Field::FatsGrams));
    }

    #[test]
    fn test_all_errors_are_collected() {
        let candidate = FoodLogCandidate::new("X")
            .with_calories("abc")
            .with_protein(1)
            .with_carbs(1)
            .with_fats(1);
        let errors = validate(&candidate).unwrap_err();
        assert_eq!(errors.fields(), vec![Field::FoodName, Field::Calories]);
        assert_eq!(errors.len(), 2);

        let empty = validate(&FoodLogCandidate::default()).unwrap_err();
        assert_eq!(empty.len(), 5);
    }

    #[test]
    fn test_logged_at_is_carried_through() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 0).unwrap();
        let entry = validate(&banana().with_logged_at(at)).unwrap();
        assert_eq!(entry.logged_at, Some(at));
    }

    #[test]
    fn test_field_errors_display() {
        let errors = validate(&FoodLogCandidate::new("Apple").with_calories(-5)).unwrap_err();
        let text = errors.to_string();
        assert!(text.contains("calories: Calories must be a positive number"));
        assert!(text.contains("proteinGrams: Protein is required"));
    }
}
