//! Unified data type system for WrenDB.
//!
//! `DataType` is the single source of truth for column types across the
//! schema descriptors, the storage layer, and change-stream serialization.
//! The SQL dialect a schema was declared in is carried separately as
//! [`Dialect`]: in the PostgreSQL dialect, `Json` columns are `JSONB` and
//! `Numeric` columns are PG `numeric`, which only affects how type
//! descriptors and mod values are rendered.

use serde::{Deserialize, Serialize};

/// SQL dialect a schema was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Dialect {
    /// Default (GoogleSQL-style) dialect.
    #[default]
    GoogleSql,
    /// PostgreSQL dialect. `Json` means `JSONB`, `Numeric` means PG `numeric`.
    Postgresql,
}

/// Column data types supported by WrenDB.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Bool,
    Int64,
    Float32,
    Float64,
    String,
    Bytes,
    Date,
    Timestamp,
    /// Arbitrary-precision decimal (precision 38, scale 9).
    Numeric,
    /// JSON document. `JSONB` in the PostgreSQL dialect.
    Json,
    /// Array of a single element type. Arrays of arrays are not supported.
    Array(Box<DataType>),
}

impl DataType {
    /// Returns the element type if this is an array type.
    pub fn array_element_type(&self) -> Option<&DataType> {
        match self {
            DataType::Array(inner) => Some(inner),
            _ => None,
        }
    }

    /// Convenience constructor for array types.
    pub fn array_of(element: DataType) -> Self {
        DataType::Array(Box::new(element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_element_type() {
        let arr = DataType::array_of(DataType::Float32);
        assert_eq!(arr.array_element_type(), Some(&DataType::Float32));
        assert_eq!(DataType::Int64.array_element_type(), None);
    }

    #[test]
    fn test_default_dialect() {
        assert_eq!(Dialect::default(), Dialect::GoogleSql);
    }
}
