//! Table definition - single source of truth for table schemas.

use crate::models::schemas::ColumnDefinition;
use crate::models::TableName;
use serde::{Deserialize, Serialize};

/// Complete definition of a table: an ordered list of columns with a
/// designated primary-key prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDefinition {
    /// Table name (case-sensitive).
    pub table_name: TableName,

    /// Column definitions (ordered by ordinal_position).
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    /// Create a new table definition.
    ///
    /// Columns are validated and sorted by ordinal position.
    ///
    /// # Example
    ///
    /// ```rust
    /// use wrendb_commons::models::schemas::{ColumnDefinition, TableDefinition};
    /// use wrendb_commons::models::{DataType, TableName};
    ///
    /// let table = TableDefinition::new(
    ///     TableName::new("users"),
    ///     vec![
    ///         ColumnDefinition::primary_key("id", 1, DataType::Int64),
    ///         ColumnDefinition::simple("name", 2, DataType::String),
    ///     ],
    /// )
    /// .unwrap();
    /// assert_eq!(table.columns.len(), 2);
    /// ```
    pub fn new(table_name: TableName, columns: Vec<ColumnDefinition>) -> Result<Self, String> {
        let columns = Self::validate_and_sort_columns(columns)?;
        Ok(Self {
            table_name,
            columns,
        })
    }

    /// Validate and sort columns by ordinal_position.
    fn validate_and_sort_columns(
        mut columns: Vec<ColumnDefinition>,
    ) -> Result<Vec<ColumnDefinition>, String> {
        if columns.is_empty() {
            return Err("Table must have at least one column".to_string());
        }

        let mut positions = std::collections::HashSet::new();
        let mut names = std::collections::HashSet::new();
        for col in &columns {
            if col.ordinal_position == 0 {
                return Err(format!(
                    "Column '{}' has invalid ordinal_position 0 (must be ≥ 1)",
                    col.column_name
                ));
            }
            if !positions.insert(col.ordinal_position) {
                return Err(format!("Duplicate ordinal_position {}", col.ordinal_position));
            }
            if !names.insert(col.column_name.clone()) {
                return Err(format!("Duplicate column name '{}'", col.column_name));
            }
            if col.is_primary_key && col.is_nullable {
                return Err(format!(
                    "Primary key column '{}' cannot be nullable",
                    col.column_name
                ));
            }
        }

        columns.sort_by_key(|col| col.ordinal_position);

        // Validate sequential positions starting from 1
        for (idx, col) in columns.iter().enumerate() {
            let expected = (idx + 1) as u32;
            if col.ordinal_position != expected {
                return Err(format!(
                    "Non-sequential ordinal_position: expected {}, got {}",
                    expected, col.ordinal_position
                ));
            }
        }

        Ok(columns)
    }

    /// Look up a column by name.
    pub fn find_column(&self, column_name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.column_name == column_name)
    }

    /// Primary-key columns in ordinal order.
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.columns.iter().filter(|c| c.is_primary_key)
    }

    /// Non-key columns in ordinal order.
    pub fn non_key_columns(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.columns.iter().filter(|c| !c.is_primary_key)
    }

    /// Column names in ordinal order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.column_name.as_str()).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}
