//! Text rendering shared by the food log commands.

use foodlog_core::{FieldErrors, FoodLogEntry, GoalProgress, NutrientProgress};

const BAR_WIDTH: usize = 20;

/// One line per nutrient: "Calories  105 / 2500 kcal  [#---]  4%  (2395 kcal left)"
pub fn progress_lines(progress: &GoalProgress) -> Vec<String> {
    vec![
        progress_line("Calories", &progress.calories, " kcal"),
        progress_line("Protein", &progress.protein, "g"),
        progress_line("Carbs", &progress.carbs, "g"),
        progress_line("Fats", &progress.fats, "g"),
    ]
}

fn progress_line(label: &str, p: &NutrientProgress, unit: &str) -> String {
    let amount = format!("{} / {}{}", p.consumed, p.goal, unit);
    let status = if p.over() > 0 {
        format!("{}{} over", p.over(), unit)
    } else {
        format!("{}{} left", p.remaining(), unit)
    };
    format!(
        "{:<9} {:<20} {} {:>4.0}%  ({})",
        label,
        amount,
        bar(p.percent),
        p.percent,
        status
    )
}

/// Fixed-width bar; the fill is capped at 100%.
fn bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

pub fn print_progress(progress: &GoalProgress) {
    for line in progress_lines(progress) {
        println!("  {}", line);
    }
}

/// "12:30  Banana  105 kcal | Protein: 1g | Carbs: 27g | Fats: 0g"
pub fn entry_line(entry: &FoodLogEntry) -> String {
    let time = entry
        .logged_at
        .map(|at| at.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string());
    format!("{}  {:<24} {}", time, entry.food_name, entry.nutrition())
}

pub fn print_field_errors(errors: &FieldErrors) {
    eprintln!("Entry was not logged:");
    for error in errors.iter() {
        eprintln!("  - {}", error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use foodlog_core::{FoodLogId, NutritionGoals, NutritionTotals};

    #[test]
    fn test_progress_lines_under_goal() {
        let progress = NutritionGoals::default().progress(&NutritionTotals::new(1250, 0, 0, 0));
        let lines = progress_lines(&progress);

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Calories"));
        assert!(lines[0].contains("1250 / 2500 kcal"));
        assert!(lines[0].contains("50%"));
        assert!(lines[0].contains("1250 kcal left"));
        assert!(lines[0].contains(&format!("[{}{}]", "#".repeat(10), "-".repeat(10))));
    }

    #[test]
    fn test_progress_over_goal_caps_bar() {
        let progress = NutritionGoals::default().progress(&NutritionTotals::new(0, 300, 0, 0));
        let line = &progress_lines(&progress)[1];

        assert!(line.contains("200%"));
        assert!(line.contains("150g over"));
        assert!(line.contains(&format!("[{}]", "#".repeat(BAR_WIDTH))));
    }

    #[test]
    fn test_entry_line() {
        let entry = FoodLogEntry {
            id: FoodLogId::new("1"),
            user_id: "demo-user".to_string(),
            food_name: "Banana".to_string(),
            calories: Some(105),
            protein_grams: Some(1),
            carbs_grams: Some(27),
            fats_grams: None,
            logged_at: Some(Utc.with_ymd_and_hms(2024, 3, 15, 12, 30, 0).unwrap()),
        };

        let line = entry_line(&entry);
        assert!(line.starts_with("12:30  Banana"));
        assert!(line.ends_with("105 kcal | Protein: 1g | Carbs: 27g | Fats: 0g"));
    }

    #[test]
    fn test_entry_line_without_timestamp() {
        let entry = FoodLogEntry {
            id: FoodLogId::new("2"),
            user_id: String::new(),
            food_name: "Legacy".to_string(),
            calories: None,
            protein_grams: None,
            carbs_grams: None,
            fats_grams: None,
            logged_at: None,
        };

        assert!(entry_line(&entry).starts_with("--:--"));
    }
}
