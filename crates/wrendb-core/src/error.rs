//! Error types for the change-stream core.

use thiserror::Error;
use wrendb_store::StoreError;

/// Main error type for change-stream materialization.
///
/// Variants mirror the status classes the commit path distinguishes: bad
/// caller input, schema/caller bugs, missing catalog objects, and internal
/// (storage) failures. A missing partition token is deliberately *not* an
/// error; it silently disables the stream for the transaction.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed mutation: column/value arity mismatch, unknown column,
    /// value that cannot be rendered.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The schema lacks a referenced table or change stream (caller bug).
    #[error("Failed precondition: {0}")]
    FailedPrecondition(String),

    /// A referenced catalog object does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage or invariant failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Error::Internal(e.to_string())
    }
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_maps_to_internal() {
        let err: Error = StoreError::Io("disk full".to_string()).into();
        assert!(matches!(err, Error::Internal(_)));
        assert_eq!(err.to_string(), "Internal error: I/O error: disk full");
    }

    #[test]
    fn test_display() {
        let err = Error::InvalidArgument("bad arity".to_string());
        assert_eq!(err.to_string(), "Invalid argument: bad arity");
    }
}
