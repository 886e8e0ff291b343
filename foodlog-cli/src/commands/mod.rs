mod add;
mod clear;
mod config_cmd;
mod format;
mod list;
mod status;
mod today;

use clap::ValueEnum;
use foodlog_core::{FoodLogApi, FoodLogSession, RemoteClient, Retried, StoreError};

use crate::config::Config;

pub use add::AddCommand;
pub use clear::ClearCommand;
pub use config_cmd::ConfigCommand;
pub use list::ListCommand;
pub use status::StatusCommand;
pub use today::TodayCommand;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Opens a session against the configured service.
pub fn connect(config: &Config) -> Result<FoodLogSession<RemoteClient>, StoreError> {
    let client = RemoteClient::with_timeout(&config.api_url.value, config.timeout())?;
    Ok(FoodLogSession::new(client, config.user_id.value.clone()))
}

/// Loads every entry, retrying transient failures.
pub async fn load<A: FoodLogApi>(
    session: &mut FoodLogSession<A>,
    retries: u32,
) -> Result<(), StoreError> {
    let first = session.load().await.map(|_| Retried::Loaded);
    settle(session, retries, first).await.map(|_| ())
}

/// Reissues a failed operation up to `retries` times.
///
/// Only idempotent operations are retried; a create that timed out may
/// already exist on the server.
pub async fn settle<A: FoodLogApi>(
    session: &mut FoodLogSession<A>,
    retries: u32,
    first: Result<Retried, StoreError>,
) -> Result<Retried, StoreError> {
    let mut result = first;
    let mut attempt = 0;

    while let Err(e) = &result {
        let idempotent = session
            .store()
            .last_failed()
            .is_some_and(|op| op.is_idempotent());
        if attempt >= retries || !idempotent || !e.is_retryable() {
            break;
        }
        attempt += 1;
        tracing::info!(attempt, error = %e, "retrying food log request");
        result = session.retry().await;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use foodlog_core::{FoodLogCandidate, FoodLogEntry, NormalizedEntry, RemoteError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails the first `failures` calls of every kind with `error`.
    struct FlakyApi {
        failures: usize,
        error: RemoteError,
        calls: AtomicUsize,
    }

    impl FlakyApi {
        fn new(failures: usize, error: RemoteError) -> Self {
            Self {
                failures,
                error,
                calls: AtomicUsize::new(0),
            }
        }

        fn call(&self) -> Result<(), RemoteError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) < self.failures {
                Err(self.error.clone())
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl FoodLogApi for FlakyApi {
        async fn fetch_all(&self) -> Result<Vec<FoodLogEntry>, RemoteError> {
            self.call().map(|_| Vec::new())
        }

        async fn create_entry(
            &self,
            _entry: &NormalizedEntry,
            _user_id: &str,
        ) -> Result<FoodLogEntry, RemoteError> {
            self.call()?;
            Err(RemoteError::Network("unreachable in these tests".to_string()))
        }

        async fn clear_all(&self) -> Result<u64, RemoteError> {
            self.call().map(|_| 3)
        }
    }

    fn timeout() -> RemoteError {
        RemoteError::Network("operation timed out".to_string())
    }

    #[tokio::test]
    async fn test_load_retries_transient_failure() {
        let mut session = FoodLogSession::new(FlakyApi::new(1, timeout()), "demo-user");

        load(&mut session, 1).await.unwrap();
        assert_eq!(session.api().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_load_gives_up_after_retries() {
        let mut session = FoodLogSession::new(FlakyApi::new(5, timeout()), "demo-user");

        assert!(load(&mut session, 2).await.is_err());
        assert_eq!(session.api().calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_forbidden_is_not_retried() {
        let forbidden = RemoteError::Forbidden {
            message: "This operation is only allowed in development".to_string(),
        };
        let mut session = FoodLogSession::new(FlakyApi::new(1, forbidden), "demo-user");

        let first = session.clear_all().await.map(Retried::Cleared);
        assert!(settle(&mut session, 3, first).await.is_err());
        assert_eq!(session.api().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_clear_retry_reports_count() {
        let mut session = FoodLogSession::new(FlakyApi::new(1, timeout()), "demo-user");

        let first = session.clear_all().await.map(Retried::Cleared);
        assert_eq!(settle(&mut session, 1, first).await.unwrap(), Retried::Cleared(3));
    }

    #[tokio::test]
    async fn test_create_is_never_retried() {
        let mut session = FoodLogSession::new(FlakyApi::new(1, timeout()), "demo-user");
        let banana = FoodLogCandidate::new("Banana")
            .with_calories(105)
            .with_protein(1)
            .with_carbs(27)
            .with_fats(0);

        let first = session.append(banana).await.map(Retried::Appended);
        assert!(settle(&mut session, 3, first).await.is_err());
        assert_eq!(session.api().calls.load(Ordering::SeqCst), 1);
    }
}
