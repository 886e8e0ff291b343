use chrono::{NaiveDate, Utc};
use clap::Args;

use super::format::{entry_line, print_progress};
use super::{connect, load, OutputFormat};
use crate::config::Config;

/// Show one day's entries and progress against goals
#[derive(Debug, Args)]
pub struct TodayCommand {
    /// Date (YYYY-MM-DD, UTC), defaults to today
    #[arg(long, short)]
    pub date: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl TodayCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let date = match &self.date {
            Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
                .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", d))?,
            None => Utc::now().date_naive(),
        };

        let mut session = connect(config)?;
        load(&mut session, config.retries.value).await?;

        let store = session.store();
        let entries: Vec<_> = store
            .entries()
            .iter()
            .filter(|e| e.logged_on() == Some(date))
            .collect();
        let totals = store.totals_on(date);
        let progress = config.goals.value.progress(&totals);

        match self.format {
            OutputFormat::Json => {
                let out = serde_json::json!({
                    "date": date,
                    "entries": entries,
                    "totals": totals,
                    "goals": config.goals.value,
                    "progress": progress,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            OutputFormat::Text => {
                println!("{}", date);
                println!("{}", "-".repeat(60));

                if entries.is_empty() {
                    println!("  No food logged.");
                } else {
                    for entry in &entries {
                        println!("  {}", entry_line(entry));
                    }
                }

                println!();
                println!("  Total: {}", totals);
                println!();
                print_progress(&progress);
            }
        }

        Ok(())
    }
}
