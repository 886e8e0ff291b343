//! The food log state machine.
//!
//! `LogStore` owns the entry collection and the totals derived from it.
//! Operations are split into `begin_*` and `complete_*` halves: `begin_*`
//! hands out a [`Ticket`] tagged with a monotonically increasing sequence
//! number, and `complete_*` applies the response for that ticket unless a
//! newer response has already been applied.

use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;
use std::fmt;

use super::error::StoreError;
use crate::aggregate::daily_totals;
use crate::models::{DailyTotals, FoodLogCandidate, FoodLogEntry, NormalizedEntry, NutritionTotals};
use crate::remote::RemoteError;
use crate::validate::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    Idle,
    /// A fetch, create or clear is outstanding.
    Loading,
    /// The last operation failed. Previously loaded entries stay visible.
    Error,
}

impl fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreStatus::Idle => write!(f, "idle"),
            StoreStatus::Loading => write!(f, "loading"),
            StoreStatus::Error => write!(f, "error"),
        }
    }
}

/// An operation the store can run, kept so a failure can be retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Load,
    Append(FoodLogCandidate),
    ClearAll,
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Load => OperationKind::Load,
            Operation::Append(_) => OperationKind::Append,
            Operation::ClearAll => OperationKind::ClearAll,
        }
    }

    /// Creating an entry twice may duplicate it; loading and clearing are
    /// safe to repeat.
    pub fn is_idempotent(&self) -> bool {
        !matches!(self, Operation::Append(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Load,
    Append,
    ClearAll,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Load => write!(f, "load"),
            OperationKind::Append => write!(f, "append"),
            OperationKind::ClearAll => write!(f, "clear"),
        }
    }
}

/// Handle for an outstanding operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
    kind: OperationKind,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }
}

/// Result of handing a response to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion<T> {
    /// The response was applied to the collection.
    Applied(T),
    /// The operation failed; the collection is unchanged.
    Failed(StoreError),
    /// A newer response was already applied; this one was discarded.
    Stale,
}

impl<T> Completion<T> {
    pub fn into_result(self) -> Result<T, StoreError> {
        match self {
            Completion::Applied(value) => Ok(value),
            Completion::Failed(e) => Err(e),
            Completion::Stale => Err(StoreError::Superseded),
        }
    }
}

/// Single owner of the food log collection and its daily totals.
#[derive(Debug, Default)]
pub struct LogStore {
    entries: Vec<FoodLogEntry>,
    totals: DailyTotals,
    error: Option<StoreError>,
    last_failed: Option<Operation>,
    in_flight: BTreeMap<u64, Operation>,
    next_seq: u64,
    last_applied: u64,
    latest_load: u64,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> StoreStatus {
        if !self.in_flight.is_empty() {
            StoreStatus::Loading
        } else if self.error.is_some() {
            StoreStatus::Error
        } else {
            StoreStatus::Idle
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status() == StoreStatus::Loading
    }

    /// Entries in the order they were added.
    pub fn entries(&self) -> &[FoodLogEntry] {
        &self.entries
    }

    pub fn daily_totals(&self) -> &DailyTotals {
        &self.totals
    }

    pub fn totals_on(&self, date: NaiveDate) -> NutritionTotals {
        self.totals.get(date)
    }

    /// Totals for the current UTC day.
    pub fn today_totals(&self) -> NutritionTotals {
        self.totals_on(Utc::now().date_naive())
    }

    pub fn error(&self) -> Option<&StoreError> {
        self.error.as_ref()
    }

    pub fn last_failed(&self) -> Option<&Operation> {
        self.last_failed.as_ref()
    }

    /// Starts fetching the whole collection.
    ///
    /// Always allowed; a newer load supersedes any load still outstanding.
    pub fn begin_load(&mut self) -> Ticket {
        self.clear_error();
        let ticket = self.issue(Operation::Load);
        self.latest_load = ticket.seq;
        ticket
    }

    /// Validates `candidate` and, if it is valid, starts creating it.
    ///
    /// Validation failures move the store to `Error` without any request
    /// being made. Rejected with [`StoreError::Busy`] while another
    /// operation is outstanding.
    pub fn begin_append(
        &mut self,
        candidate: FoodLogCandidate,
    ) -> Result<(Ticket, NormalizedEntry), StoreError> {
        self.ensure_not_busy()?;

        match validate(&candidate) {
            Ok(entry) => {
                self.clear_error();
                let ticket = self.issue(Operation::Append(candidate));
                Ok((ticket, entry))
            }
            Err(errors) => {
                let err = StoreError::Validation(errors);
                tracing::debug!(error = %err, "rejected food log entry");
                self.fail(Operation::Append(candidate), err.clone());
                Err(err)
            }
        }
    }

    /// Starts deleting every entry. Rejected while another operation is
    /// outstanding.
    pub fn begin_clear(&mut self) -> Result<Ticket, StoreError> {
        self.ensure_not_busy()?;
        self.clear_error();
        Ok(self.issue(Operation::ClearAll))
    }

    /// Applies the response of a load: on success the collection is replaced.
    pub fn complete_load(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<FoodLogEntry>, RemoteError>,
    ) -> Completion<()> {
        let Some(operation) = self.take(ticket, OperationKind::Load) else {
            return Completion::Stale;
        };

        if ticket.seq < self.latest_load || ticket.seq < self.last_applied {
            tracing::debug!(seq = ticket.seq, "discarding superseded load response");
            return Completion::Stale;
        }

        match result {
            Ok(entries) => {
                tracing::debug!(seq = ticket.seq, count = entries.len(), "loaded food logs");
                self.entries = entries;
                self.applied(ticket);
                Completion::Applied(())
            }
            Err(e) => self.failed(operation, e),
        }
    }

    /// Applies the response of a create: on success the confirmed record is
    /// appended.
    ///
    /// A confirmation that arrives after a newer load was applied is merged
    /// in unless that load already contained the record.
    pub fn complete_append(
        &mut self,
        ticket: Ticket,
        result: Result<FoodLogEntry, RemoteError>,
    ) -> Completion<FoodLogEntry> {
        let Some(operation) = self.take(ticket, OperationKind::Append) else {
            return Completion::Stale;
        };

        let entry = match result {
            Ok(entry) => entry,
            Err(e) => return self.failed(operation, e),
        };

        if self.entries.iter().any(|e| e.id == entry.id) {
            tracing::debug!(seq = ticket.seq, id = %entry.id, "created food log already loaded");
        } else {
            tracing::debug!(seq = ticket.seq, id = %entry.id, "appended food log");
            self.entries.push(entry.clone());
        }

        if ticket.seq < self.last_applied {
            self.totals = daily_totals(&self.entries);
        } else {
            self.applied(ticket);
        }
        Completion::Applied(entry)
    }

    /// Applies the response of a clear: on success the collection is emptied.
    pub fn complete_clear(
        &mut self,
        ticket: Ticket,
        result: Result<u64, RemoteError>,
    ) -> Completion<u64> {
        let Some(operation) = self.take(ticket, OperationKind::ClearAll) else {
            return Completion::Stale;
        };

        if ticket.seq < self.last_applied {
            tracing::debug!(seq = ticket.seq, "discarding stale clear response");
            return Completion::Stale;
        }

        match result {
            Ok(count) => {
                tracing::debug!(seq = ticket.seq, count, "cleared food logs");
                self.entries.clear();
                self.applied(ticket);
                Completion::Applied(count)
            }
            Err(e) => self.failed(operation, e),
        }
    }

    /// The operation to reissue after a failure.
    pub fn retry_operation(&self) -> Result<Operation, StoreError> {
        if self.status() != StoreStatus::Error {
            return Err(StoreError::NothingToRetry);
        }
        self.last_failed.clone().ok_or(StoreError::NothingToRetry)
    }

    /// Drops the current error, keeping whatever data is loaded.
    pub fn dismiss(&mut self) {
        self.clear_error();
    }

    fn ensure_not_busy(&self) -> Result<(), StoreError> {
        if self.in_flight.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Busy)
        }
    }

    fn issue(&mut self, operation: Operation) -> Ticket {
        self.next_seq += 1;
        let ticket = Ticket {
            seq: self.next_seq,
            kind: operation.kind(),
        };
        tracing::debug!(seq = ticket.seq, operation = %ticket.kind, "starting food log operation");
        self.in_flight.insert(ticket.seq, operation);
        ticket
    }

    /// Removes the outstanding operation for `ticket`.
    fn take(&mut self, ticket: Ticket, kind: OperationKind) -> Option<Operation> {
        if ticket.kind != kind {
            return None;
        }
        self.in_flight.remove(&ticket.seq)
    }

    fn applied(&mut self, ticket: Ticket) {
        self.last_applied = ticket.seq;
        self.totals = daily_totals(&self.entries);
    }

    fn failed<T>(&mut self, operation: Operation, e: RemoteError) -> Completion<T> {
        tracing::warn!(operation = %operation.kind(), error = %e, "food log operation failed");
        let err = StoreError::Remote(e);
        self.fail(operation, err.clone());
        Completion::Failed(err)
    }

    fn fail(&mut self, operation: Operation, err: StoreError) {
        self.error = Some(err);
        self.last_failed = Some(operation);
    }

    fn clear_error(&mut self) {
        self.error = None;
        self.last_failed = None;
    }
}
