use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw, unvalidated input for a new food log entry.
///
/// Values are kept as text exactly as the user typed them; the validator
/// decides what is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodLogCandidate {
    pub food_name: Option<String>,
    pub calories: Option<String>,
    pub protein: Option<String>,
    pub carbs: Option<String>,
    pub fats: Option<String>,
    pub logged_at: Option<DateTime<Utc>>,
}

impl FoodLogCandidate {
    pub fn new(food_name: impl Into<String>) -> Self {
        Self {
            food_name: Some(food_name.into()),
            ..Self::default()
        }
    }

    pub fn with_calories(mut self, value: impl ToString) -> Self {
        self.calories = Some(value.to_string());
        self
    }

    pub fn with_protein(mut self, value: impl ToString) -> Self {
        self.protein = Some(value.to_string());
        self
    }

    pub fn with_carbs(mut self, value: impl ToString) -> Self {
        self.carbs = Some(value.to_string());
        self
    }

    pub fn with_fats(mut self, value: impl ToString) -> Self {
        self.fats = Some(value.to_string());
        self
    }

    pub fn with_logged_at(mut self, logged_at: DateTime<Utc>) -> Self {
        self.logged_at = Some(logged_at);
        self
    }
}

/// Common foods that can be logged without typing their nutrients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    Banana,
    Apple,
    ChickenBreast,
    GreekYogurt,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Banana,
        Preset::Apple,
        Preset::ChickenBreast,
        Preset::GreekYogurt,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Preset::Banana => "Banana (medium)",
            Preset::Apple => "Apple (medium)",
            Preset::ChickenBreast => "Chicken Breast (100g)",
            Preset::GreekYogurt => "Greek Yogurt (1 cup)",
        }
    }

    /// Calories, protein, carbs and fats.
    pub fn nutrients(&self) -> (u32, u32, u32, u32) {
        match self {
            Preset::Banana => (105, 1, 27, 0),
            Preset::Apple => (95, 0, 25, 0),
            Preset::ChickenBreast => (165, 31, 0, 4),
            Preset::GreekYogurt => (130, 23, 9, 0),
        }
    }

    pub fn candidate(&self) -> FoodLogCandidate {
        let (calories, protein, carbs, fats) = self.nutrients();
        FoodLogCandidate::new(self.label())
            .with_calories(calories)
            .with_protein(protein)
            .with_carbs(carbs)
            .with_fats(fats)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Banana => write!(f, "banana"),
            Preset::Apple => write!(f, "apple"),
            Preset::ChickenBreast => write!(f, "chicken-breast"),
            Preset::GreekYogurt => write!(f, "greek-yogurt"),
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "banana" => Ok(Preset::Banana),
            "apple" => Ok(Preset::Apple),
            "chicken-breast" | "chicken" => Ok(Preset::ChickenBreast),
            "greek-yogurt" | "yogurt" => Ok(Preset::GreekYogurt),
            _ => Err(format!(
                "Invalid preset '{}'. Valid options: banana, apple, chicken-breast, greek-yogurt",
                s
            )),
        }
    }
}
