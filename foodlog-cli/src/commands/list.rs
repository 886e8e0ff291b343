use clap::Args;
use foodlog_core::{FoodLogEntry, LogStore};
use serde_json::Value;

use super::format::entry_line;
use super::{connect, load, OutputFormat};
use crate::config::Config;

/// List all entries grouped by day
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ListCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let mut session = connect(config)?;
        load(&mut session, config.retries.value).await?;

        let store = session.store();
        let entries = store.entries();

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&json_listing(store))?);
            }
            OutputFormat::Text => {
                if entries.is_empty() {
                    println!("No food logs found");
                    return Ok(());
                }

                for (i, (date, totals)) in store.daily_totals().iter().enumerate() {
                    if i > 0 {
                        println!();
                    }
                    println!("{}", date);
                    println!("{}", "-".repeat(60));
                    for entry in entries.iter().filter(|e| e.logged_on() == Some(date)) {
                        println!("  {}", entry_line(entry));
                    }
                    println!("  {}", "-".repeat(56));
                    println!("  Daily Total: {}", totals);
                }

                let undated: Vec<&FoodLogEntry> =
                    entries.iter().filter(|e| e.logged_on().is_none()).collect();
                if !undated.is_empty() {
                    println!();
                    println!("Undated");
                    println!("{}", "-".repeat(60));
                    for entry in undated {
                        println!("  {}", entry_line(entry));
                    }
                }

                println!(
                    "\nTotal: {} entr{}",
                    entries.len(),
                    if entries.len() == 1 { "y" } else { "ies" }
                );
            }
        }

        Ok(())
    }
}

/// `{"entries": [...], "daily_totals": {date: totals}}`
fn json_listing(store: &LogStore) -> Value {
    serde_json::json!({
        "entries": store.entries(),
        "daily_totals": store.daily_totals(),
    })
}
