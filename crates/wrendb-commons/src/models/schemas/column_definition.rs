//! Column definition for table schemas.

use crate::models::DataType;
use serde::{Deserialize, Serialize};

/// Complete definition of a table column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Column name (case-sensitive).
    pub column_name: String,

    /// Data type.
    pub data_type: DataType,

    /// Ordinal position in table (1-indexed, sequential).
    pub ordinal_position: u32,

    /// Whether column can contain NULL values.
    pub is_nullable: bool,

    /// Whether this column is part of the primary key.
    pub is_primary_key: bool,

    /// Whether a client may write the commit-timestamp sentinel to this
    /// column to have it replaced by the real commit timestamp.
    pub allows_commit_timestamp: bool,
}

impl ColumnDefinition {
    /// Create a new column definition.
    pub fn new(
        column_name: impl Into<String>,
        ordinal_position: u32,
        data_type: DataType,
        is_nullable: bool,
        is_primary_key: bool,
        allows_commit_timestamp: bool,
    ) -> Self {
        Self {
            column_name: column_name.into(),
            ordinal_position,
            data_type,
            is_nullable,
            is_primary_key,
            allows_commit_timestamp,
        }
    }

    /// Create a simple nullable, non-key column.
    ///
    /// # Example
    ///
    /// ```rust
    /// use wrendb_commons::models::schemas::ColumnDefinition;
    /// use wrendb_commons::models::DataType;
    ///
    /// let column = ColumnDefinition::simple("email", 2, DataType::String);
    /// assert!(column.is_nullable);
    /// assert!(!column.is_primary_key);
    /// ```
    pub fn simple(
        column_name: impl Into<String>,
        ordinal_position: u32,
        data_type: DataType,
    ) -> Self {
        Self {
            column_name: column_name.into(),
            ordinal_position,
            data_type,
            is_nullable: true,
            is_primary_key: false,
            allows_commit_timestamp: false,
        }
    }

    /// Create a primary key column. Primary keys cannot be NULL.
    pub fn primary_key(
        column_name: impl Into<String>,
        ordinal_position: u32,
        data_type: DataType,
    ) -> Self {
        Self {
            column_name: column_name.into(),
            ordinal_position,
            data_type,
            is_nullable: false,
            is_primary_key: true,
            allows_commit_timestamp: false,
        }
    }

    /// Create a `TIMESTAMP` column that accepts the commit-timestamp
    /// sentinel.
    pub fn with_commit_timestamp(
        column_name: impl Into<String>,
        ordinal_position: u32,
        is_nullable: bool,
    ) -> Self {
        Self {
            column_name: column_name.into(),
            ordinal_position,
            data_type: DataType::Timestamp,
            is_nullable,
            is_primary_key: false,
            allows_commit_timestamp: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_column() {
        let col = ColumnDefinition::simple("name", 1, DataType::String);
        assert_eq!(col.column_name, "name");
        assert_eq!(col.ordinal_position, 1);
        assert!(col.is_nullable);
        assert!(!col.is_primary_key);
        assert!(!col.allows_commit_timestamp);
    }

    #[test]
    fn test_primary_key_column() {
        let col = ColumnDefinition::primary_key("id", 1, DataType::Int64);
        assert!(!col.is_nullable);
        assert!(col.is_primary_key);
    }

    #[test]
    fn test_commit_timestamp_column() {
        let col = ColumnDefinition::with_commit_timestamp("commit_ts", 3, false);
        assert_eq!(col.data_type, DataType::Timestamp);
        assert!(col.allows_commit_timestamp);
        assert!(!col.is_nullable);
    }

    #[test]
    fn test_column_name_case_preserved() {
        let col = ColumnDefinition::simple("FirstName", 1, DataType::String);
        assert_eq!(col.column_name, "FirstName");
    }

    #[test]
    fn test_serialization_roundtrip() {
        let col = ColumnDefinition::simple("arr", 4, DataType::array_of(DataType::Numeric));
        let json = serde_json::to_string(&col).unwrap();
        let decoded: ColumnDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(col, decoded);
    }
}
