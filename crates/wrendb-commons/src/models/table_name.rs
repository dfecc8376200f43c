//! Type-safe wrapper for table names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe wrapper for table names.
///
/// Table names are case-sensitive and stored exactly as given: the name of a
/// user table is emitted verbatim in change-stream records and must
/// round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TableName(String);

impl TableName {
    /// Creates a new TableName from a string.
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the table name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner String.
    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TableName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TableName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_name_preserves_case() {
        let name = TableName::new("TestTable");
        assert_eq!(name.as_str(), "TestTable");
        assert_ne!(name, TableName::new("testtable"));
    }

    #[test]
    fn test_table_name_conversions() {
        let a = TableName::from("users");
        let b = TableName::from("users".to_string());
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "users");
        assert_eq!(b.into_string(), "users");
    }
}
