use clap::Args;
use foodlog_core::RemoteClient;

use crate::config::Config;

/// Check whether the food log server is reachable
#[derive(Debug, Args)]
pub struct StatusCommand {}

impl StatusCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let client = RemoteClient::with_timeout(&config.api_url.value, config.timeout())?;

        println!("Server: {}", client.base_url());
        println!("User:   {}", config.user_id.value);

        match client.health_check().await {
            Ok(body) => {
                println!("Status: ✓ reachable ({})", body.trim());
                Ok(())
            }
            Err(e) => {
                println!("Status: ✗ unreachable");
                Err(e.into())
            }
        }
    }
}
