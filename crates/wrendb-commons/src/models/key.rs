//! Primary-key tuples.

use crate::models::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A primary-key tuple, with parts in the table's primary-key column order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key(Vec<Value>);

impl Key {
    pub fn new(parts: Vec<Value>) -> Self {
        Self(parts)
    }

    pub fn parts(&self) -> &[Value] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Value>> for Key {
    fn from(parts: Vec<Value>) -> Self {
        Self(parts)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key(")?;
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", part)?;
        }
        write!(f, ")")
    }
}
