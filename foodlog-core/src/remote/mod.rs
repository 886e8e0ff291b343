//! Access to the remote food log persistence service.
//!
//! [`RemoteClient`] talks HTTP to `/api/foodlogs`. The [`FoodLogApi`] trait
//! is the seam the log store uses, so sessions can also run against an
//! in-process implementation.

mod client;
mod error;
pub mod wire;

use async_trait::async_trait;

use crate::models::{FoodLogEntry, NormalizedEntry};

pub use client::{check_server, RemoteClient, DEFAULT_TIMEOUT};
pub use error::RemoteError;

/// Read, create and delete-all operations of the persistence service.
#[async_trait]
pub trait FoodLogApi: Send + Sync {
    /// Fetches every entry.
    async fn fetch_all(&self) -> Result<Vec<FoodLogEntry>, RemoteError>;

    /// Creates an entry owned by `user_id`; the result carries the
    /// server-issued id.
    async fn create_entry(
        &self,
        entry: &NormalizedEntry,
        user_id: &str,
    ) -> Result<FoodLogEntry, RemoteError>;

    /// Deletes every entry and returns the number removed.
    async fn clear_all(&self) -> Result<u64, RemoteError>;
}
