use clap::Args;
use foodlog_core::Retried;

use super::{connect, settle};
use crate::config::Config;

/// Delete every food log on the server
#[derive(Debug, Args)]
pub struct ClearCommand {
    /// Confirm deletion
    #[arg(long, short)]
    pub yes: bool,
}

impl ClearCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        if !self.yes {
            return Err("Refusing to delete all food logs without --yes".into());
        }

        let mut session = connect(config)?;
        let first = session.clear_all().await.map(Retried::Cleared);

        match settle(&mut session, config.retries.value, first).await? {
            Retried::Cleared(count) => println!("Deleted {} logs", count),
            other => tracing::warn!(?other, "unexpected retry outcome for clear"),
        }

        Ok(())
    }
}
