//! Async driver that runs log store operations against a [`FoodLogApi`].

use super::error::StoreError;
use super::state::{LogStore, Operation};
use crate::models::{FoodLogCandidate, FoodLogEntry};
use crate::remote::FoodLogApi;

/// What a retried operation produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Retried {
    Loaded,
    Appended(FoodLogEntry),
    Cleared(u64),
}

/// A client session: one user, one store, one persistence service.
///
/// Operations run one at a time. Consumers that need overlapping requests
/// can drive [`LogStore`] directly with its `begin_*`/`complete_*` pairs.
#[derive(Debug)]
pub struct FoodLogSession<A> {
    api: A,
    store: LogStore,
    user_id: String,
}

impl<A: FoodLogApi> FoodLogSession<A> {
    /// `user_id` comes from whatever authenticated the user and is passed
    /// through unchanged.
    pub fn new(api: A, user_id: impl Into<String>) -> Self {
        Self {
            api,
            store: LogStore::new(),
            user_id: user_id.into(),
        }
    }

    pub fn store(&self) -> &LogStore {
        &self.store
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Replaces the collection with everything the service holds.
    pub async fn load(&mut self) -> Result<&[FoodLogEntry], StoreError> {
        let ticket = self.store.begin_load();
        let result = self.api.fetch_all().await;
        self.store.complete_load(ticket, result).into_result()?;
        Ok(self.store.entries())
    }

    /// Validates and submits a new entry, adding the confirmed record.
    pub async fn append(&mut self, candidate: FoodLogCandidate) -> Result<FoodLogEntry, StoreError> {
        let (ticket, entry) = self.store.begin_append(candidate)?;
        let result = self.api.create_entry(&entry, &self.user_id).await;
        self.store.complete_append(ticket, result).into_result()
    }

    /// Deletes every entry.
    pub async fn clear_all(&mut self) -> Result<u64, StoreError> {
        let ticket = self.store.begin_clear()?;
        let result = self.api.clear_all().await;
        self.store.complete_clear(ticket, result).into_result()
    }

    /// Reissues the operation that last failed.
    pub async fn retry(&mut self) -> Result<Retried, StoreError> {
        match self.store.retry_operation()? {
            Operation::Load => self.load().await.map(|_| Retried::Loaded),
            Operation::Append(candidate) => self.append(candidate).await.map(Retried::Appended),
            Operation::ClearAll => self.clear_all().await.map(Retried::Cleared),
        }
    }

    pub fn dismiss(&mut self) {
        self.store.dismiss();
    }
}
