//! Storage backend abstraction for pluggable row stores.
//!
//! `RowStore` is the trait boundary between the change-stream core and
//! whatever engine actually holds rows. The core only ever reads (the
//! partition table of each stream) and the write ops it produces are applied
//! by the caller, so the surface is deliberately small:
//! - `read` for point lookups
//! - `insert` for seeding rows (tests, embedders)
//! - `scan` for ordered full-table reads
//!
//! Backends map tables to their native concept (column family, tree, key
//! prefix); the in-memory backend lives in [`crate::memory`].

use thiserror::Error;
use wrendb_commons::models::{Key, Row, TableName, Value};

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Column/value arity mismatch: {columns} columns, {values} values")]
    ArityMismatch { columns: usize, values: usize },

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Storage error: {0}")]
    Other(String),
}

/// Trait for pluggable typed-row storage backends.
///
/// Implementations must be thread-safe (Send + Sync). Reading a table that
/// was never written is not an error: `read` returns `None` and `scan`
/// returns an empty vector.
pub trait RowStore: Send + Sync {
    /// Retrieves a row by primary key.
    fn read(&self, table: &TableName, key: &Key) -> Result<Option<Row>>;

    /// Stores a row. An existing row under the same key is replaced.
    ///
    /// `columns` and `values` must have the same arity.
    fn insert(
        &self,
        table: &TableName,
        key: Key,
        columns: &[&str],
        values: Vec<Value>,
    ) -> Result<()>;

    /// Returns every row of a table in ascending primary-key order.
    fn scan(&self, table: &TableName) -> Result<Vec<Row>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::Io("disk full".to_string());
        assert_eq!(err.to_string(), "I/O error: disk full");

        let err = StoreError::ArityMismatch {
            columns: 2,
            values: 3,
        };
        assert_eq!(
            err.to_string(),
            "Column/value arity mismatch: 2 columns, 3 values"
        );
    }
}
