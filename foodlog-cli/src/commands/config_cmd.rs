use clap::{Args, Subcommand};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::OutputFormat;
use crate::config::Config;

const DEFAULT_CONFIG: &str = r#"# foodlog configuration

# Food log server (default: http://localhost:3001)
api_url: http://localhost:3001

# User recorded on new entries
user_id: demo-user

# Request timeout in seconds
# timeout_secs: 10

# Automatic retries for failed loads and clears
# retries: 1

# Daily goals
# goals:
#   calories: 2500
#   protein_grams: 150
#   carbs_grams: 300
#   fats_grams: 80
"#;

#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init,
}

impl ConfigCommand {
    pub fn run(
        &self,
        config: &Config,
        config_path: Option<PathBuf>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                config_path
                                    .unwrap_or_else(Config::default_config_path)
                                    .display()
                            );
                        }
                        println!();

                        println!("api_url: {}", config.api_url.value);
                        println!("  source: {}", config.api_url.source);
                        println!();

                        println!("user_id: {}", config.user_id.value);
                        println!("  source: {}", config.user_id.source);
                        println!();

                        println!("timeout_secs: {}", config.timeout_secs.value);
                        println!("  source: {}", config.timeout_secs.source);
                        println!();

                        println!("retries: {}", config.retries.value);
                        println!("  source: {}", config.retries.source);
                        println!();

                        let goals = &config.goals.value;
                        println!(
                            "goals: {} kcal | Protein: {}g | Carbs: {}g | Fats: {}g",
                            goals.calories, goals.protein_grams, goals.carbs_grams, goals.fats_grams
                        );
                        println!("  source: {}", config.goals.source);
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let path = config_path.unwrap_or_else(Config::default_config_path);
                if write_default_config(&path)? {
                    println!("Created config file: {}", path.display());
                    println!("\nEdit this file to customize your settings.");
                } else {
                    println!("Config file already exists: {}", path.display());
                    println!("Use 'foodlog config show' to view current configuration.");
                }
                Ok(())
            }
        }
    }
}

/// Writes the default config unless a file is already there.
fn write_default_config(path: &Path) -> std::io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(path)?;
    file.write_all(DEFAULT_CONFIG.as_bytes())?;
    Ok(true)
}
