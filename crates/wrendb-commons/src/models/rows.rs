//! Stored row representation.

use crate::models::{Key, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A typed row as held by the storage layer: the primary key plus a column
/// name → value map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub key: Key,
    pub values: BTreeMap<String, Value>,
}

impl Row {
    pub fn new(key: Key, values: BTreeMap<String, Value>) -> Self {
        Self { key, values }
    }

    /// Builds a row from parallel column/value slices.
    pub fn from_columns(key: Key, columns: &[&str], values: Vec<Value>) -> Self {
        let values = columns
            .iter()
            .map(|c| c.to_string())
            .zip(values)
            .collect();
        Self { key, values }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }
}
