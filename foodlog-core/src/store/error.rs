//! Log store error types.

use thiserror::Error;

use crate::remote::RemoteError;
use crate::validate::FieldErrors;

/// Errors surfaced by the log store.
///
/// `Validation` never reaches the network; `Remote` is what the
/// persistence service (or the transport) reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Invalid food log entry: {0}")]
    Validation(FieldErrors),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// A mutating operation was requested while another one is outstanding.
    #[error("Another food log operation is still in progress")]
    Busy,

    #[error("There is no failed operation to retry")]
    NothingToRetry,

    /// The response arrived after a newer request had already been applied.
    #[error("Response was superseded by a newer request")]
    Superseded,
}

impl StoreError {
    /// Whether reissuing the same operation could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            StoreError::Remote(e) => e.is_retryable(),
            StoreError::Busy | StoreError::Superseded => true,
            StoreError::Validation(_) | StoreError::NothingToRetry => false,
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            StoreError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            StoreError::Remote(e) => Some(e),
            _ => None,
        }
    }
}
