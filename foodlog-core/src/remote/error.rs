//! Remote client error types.

use thiserror::Error;

/// Failures from the persistence service, reduced to the shapes callers
/// need to act on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// No response was received (connection refused, DNS, timeout).
    #[error("Network error - please check your connection ({0})")]
    Network(String),

    /// The service responded with a non-success status.
    #[error("{message}")]
    Service { status: u16, message: String },

    /// The service refused the operation in its current environment.
    #[error("{message}")]
    Forbidden { message: String },
}

impl RemoteError {
    pub(crate) fn network(e: impl std::fmt::Display) -> Self {
        RemoteError::Network(e.to_string())
    }

    pub(crate) fn service(status: u16, message: impl Into<String>) -> Self {
        RemoteError::Service {
            status,
            message: message.into(),
        }
    }

    /// Whether repeating the request could succeed.
    ///
    /// Creating an entry again after a `Service` failure may duplicate it;
    /// callers check the operation before retrying.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, RemoteError::Forbidden { .. })
    }

    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Network(_) => None,
            RemoteError::Service { status, .. } => Some(*status),
            RemoteError::Forbidden { .. } => Some(403),
        }
    }
}
