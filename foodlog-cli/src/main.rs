use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{
    AddCommand, ClearCommand, ConfigCommand, ListCommand, StatusCommand, TodayCommand,
};
use config::Config;

#[derive(Parser)]
#[command(name = "foodlog")]
#[command(version)]
#[command(about = "Log food and track daily nutrition", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a food entry
    Add(AddCommand),

    /// Show today's entries and progress against goals
    Today(TodayCommand),

    /// List all entries grouped by day
    List(ListCommand),

    /// Delete all entries on the server
    Clear(ClearCommand),

    /// Check server connectivity
    Status(StatusCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let cli_config_path = cli.config.clone();
    let config = Config::load(cli.config)?;

    let Some(command) = cli.command else {
        println!("Use --help to see available commands");
        return Ok(());
    };

    if let Commands::Config(cmd) = &command {
        return cmd.run(&config, cli_config_path);
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(execute_command(&command, &config))
}

async fn execute_command(
    command: &Commands,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::debug!(api_url = %config.api_url.value, "using food log server");

    match command {
        Commands::Add(cmd) => cmd.run(config).await,
        Commands::Today(cmd) => cmd.run(config).await,
        Commands::List(cmd) => cmd.run(config).await,
        Commands::Clear(cmd) => cmd.run(config).await,
        Commands::Status(cmd) => cmd.run(config).await,
        Commands::Config(_) => Ok(()),
    }
}
