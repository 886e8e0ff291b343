use chrono::{DateTime, Utc};
use clap::Args;
use foodlog_core::{FoodLogCandidate, Preset, StoreError};

use super::format::{entry_line, print_field_errors, print_progress};
use super::{connect, load, OutputFormat};
use crate::config::Config;

/// Log a food entry
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Food name (e.g. "Banana")
    pub name: Option<String>,

    /// Calories (kcal)
    #[arg(long, allow_negative_numbers = true)]
    pub calories: Option<String>,

    /// Protein in grams
    #[arg(long, allow_negative_numbers = true)]
    pub protein: Option<String>,

    /// Carbohydrates in grams
    #[arg(long, allow_negative_numbers = true)]
    pub carbs: Option<String>,

    /// Fats in grams
    #[arg(long, allow_negative_numbers = true)]
    pub fats: Option<String>,

    /// When the food was eaten (RFC 3339), defaults to now
    #[arg(long)]
    pub at: Option<DateTime<Utc>>,

    /// Start from a quick-add preset (banana, apple, chicken-breast, greek-yogurt)
    #[arg(long, short)]
    pub preset: Option<Preset>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl AddCommand {
    /// Builds the candidate: preset values first, explicit flags on top.
    pub fn candidate(&self) -> FoodLogCandidate {
        let mut candidate = self
            .preset
            .map(|p| p.candidate())
            .unwrap_or_default();

        if let Some(name) = &self.name {
            candidate.food_name = Some(name.clone());
        }
        if let Some(v) = &self.calories {
            candidate = candidate.with_calories(v);
        }
        if let Some(v) = &self.protein {
            candidate = candidate.with_protein(v);
        }
        if let Some(v) = &self.carbs {
            candidate = candidate.with_carbs(v);
        }
        if let Some(v) = &self.fats {
            candidate = candidate.with_fats(v);
        }
        if let Some(at) = self.at {
            candidate = candidate.with_logged_at(at);
        }
        candidate
    }

    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let mut session = connect(config)?;
        load(&mut session, config.retries.value).await?;

        let created = match session.append(self.candidate()).await {
            Ok(entry) => entry,
            Err(StoreError::Validation(errors)) => {
                print_field_errors(&errors);
                return Err(format!("{} invalid field(s)", errors.len()).into());
            }
            Err(e) => return Err(e.into()),
        };

        let store = session.store();
        let progress = config.goals.value.progress(&store.today_totals());

        match self.format {
            OutputFormat::Json => {
                let out = serde_json::json!({
                    "entry": created,
                    "today": store.today_totals(),
                    "progress": progress,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            OutputFormat::Text => {
                println!("Logged {}", created.food_name);
                println!("  {}", entry_line(&created));
                println!("  Entry ID: {}", created.id);
                println!();
                println!("Today ({})", Utc::now().date_naive());
                print_progress(&progress);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        add: AddCommand,
    }

    fn parse(args: &[&str]) -> AddCommand {
        let mut argv = vec!["foodlog"];
        argv.extend_from_slice(args);
        TestCli::parse_from(argv).add
    }

    #[test]
    fn test_flags_build_candidate() {
        let cmd = parse(&[
            "Oatmeal",
            "--calories",
            "150",
            "--protein",
            "5",
            "--carbs",
            "27",
            "--fats",
            "3",
        ]);
        let candidate = cmd.candidate();

        assert_eq!(candidate.food_name.as_deref(), Some("Oatmeal"));
        assert_eq!(candidate.calories.as_deref(), Some("150"));
        assert_eq!(candidate.fats.as_deref(), Some("3"));
        assert!(candidate.logged_at.is_none());
    }

    #[test]
    fn test_preset_with_override() {
        let cmd = parse(&["--preset", "banana", "--calories", "120"]);
        let candidate = cmd.candidate();

        assert_eq!(candidate.food_name.as_deref(), Some("Banana (medium)"));
        assert_eq!(candidate.calories.as_deref(), Some("120"));
        assert_eq!(candidate.carbs.as_deref(), Some("27"));
    }

    #[test]
    fn test_raw_text_reaches_validator() {
        let cmd = parse(&["X", "--calories", "abc"]);
        let candidate = cmd.candidate();

        let errors = foodlog_core::validate(&candidate).unwrap_err();
        assert!(errors.contains(foodlog_core::Field::FoodName));
        assert!(errors.contains(foodlog_core::Field::Calories));
        assert!(errors.contains(foodlog_core::Field::ProteinGrams));
    }

    #[test]
    fn test_negative_amount_reaches_validator() {
        let cmd = parse(&[
            "Banana",
            "--calories",
            "-5",
            "--protein",
            "1",
            "--carbs",
            "-0.5",
            "--fats",
            "0",
        ]);
        let candidate = cmd.candidate();
        assert_eq!(candidate.calories.as_deref(), Some("-5"));

        let errors = foodlog_core::validate(&candidate).unwrap_err();
        assert_eq!(
            errors.fields(),
            vec![foodlog_core::Field::Calories, foodlog_core::Field::CarbsGrams]
        );
        let calories = errors.get(foodlog_core::Field::Calories).unwrap();
        assert!(calories.message.contains("positive"));
    }

    #[test]
    fn test_at_parses_rfc3339() {
        let cmd = parse(&["Toast", "--at", "2024-03-15T08:00:00Z"]);
        let at = cmd.candidate().logged_at.unwrap();
        assert_eq!(at.to_rfc3339(), "2024-03-15T08:00:00+00:00");
    }
}
