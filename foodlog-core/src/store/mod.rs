//! The stateful core: owns food log entries and their derived totals, and
//! keeps them in step with the persistence service.

mod error;
mod session;
mod state;

pub use error::StoreError;
pub use session::{FoodLogSession, Retried};
pub use state::{Completion, LogStore, Operation, OperationKind, StoreStatus, Ticket};
