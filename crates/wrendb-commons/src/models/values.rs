//! Domain values for WrenDB rows and mutations.

use crate::models::Timestamp;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Scale (fractional digits) of [`NumericValue`].
const NUMERIC_SCALE: u32 = 9;
const NUMERIC_SCALE_FACTOR: i128 = 1_000_000_000;

/// Arbitrary-precision decimal value (precision 38, scale 9), stored as a
/// scaled `i128`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NumericValue {
    /// Value scaled by 10^9.
    units: i128,
}

impl NumericValue {
    pub fn from_i64(value: i64) -> Self {
        Self {
            units: value as i128 * NUMERIC_SCALE_FACTOR,
        }
    }

    /// Parses a decimal string such as `"200.75"` or `"-11"`.
    ///
    /// Fractional digits beyond the supported scale are truncated.
    pub fn parse(value: &str) -> Result<Self, String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err("numeric parse failed: empty string".to_string());
        }

        let negative = trimmed.starts_with('-');
        let unsigned = trimmed.strip_prefix('-').unwrap_or(trimmed);
        let mut parts = unsigned.splitn(2, '.');
        let integer_part = parts.next().unwrap_or("0");
        let fractional_part = parts.next().unwrap_or("");

        let mut normalized_fraction = fractional_part.to_string();
        while normalized_fraction.len() < NUMERIC_SCALE as usize {
            normalized_fraction.push('0');
        }
        if normalized_fraction.len() > NUMERIC_SCALE as usize {
            normalized_fraction.truncate(NUMERIC_SCALE as usize);
        }

        let joined = format!("{integer_part}{normalized_fraction}");
        let mut units = joined
            .parse::<i128>()
            .map_err(|e| format!("numeric parse failed for '{value}': {e}"))?;
        if negative {
            units = -units;
        }
        Ok(Self { units })
    }

    /// Raw scaled representation.
    pub fn units(&self) -> i128 {
        self.units
    }
}

impl fmt::Display for NumericValue {
    /// Canonical decimal form: no exponent, trailing fractional zeros
    /// trimmed, no fractional point for whole values (`11`, `-0.5`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.units < 0 { "-" } else { "" };
        let abs = self.units.unsigned_abs();
        let integer = abs / NUMERIC_SCALE_FACTOR as u128;
        let fraction = abs % NUMERIC_SCALE_FACTOR as u128;
        if fraction == 0 {
            write!(f, "{sign}{integer}")
        } else {
            let digits = format!("{:09}", fraction);
            write!(f, "{sign}{integer}.{}", digits.trim_end_matches('0'))
        }
    }
}

impl From<i64> for NumericValue {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

/// A single typed value in a row, key, or mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
    Bytes(Vec<u8>),
    /// Calendar date as whole days since the Unix epoch.
    Date(i32),
    Timestamp(Timestamp),
    Numeric(NumericValue),
    Json(serde_json::Value),
    Array(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Convenience constructor for string values.
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int64(_) => 2,
            Value::Float32(_) => 3,
            Value::Float64(_) => 4,
            Value::String(_) => 5,
            Value::Bytes(_) => 6,
            Value::Date(_) => 7,
            Value::Timestamp(_) => 8,
            Value::Numeric(_) => 9,
            Value::Json(_) => 10,
            Value::Array(_) => 11,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Value::Timestamp(v)
    }
}

impl From<NumericValue> for Value {
    fn from(v: NumericValue) -> Self {
        Value::Numeric(v)
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    /// Total order used for key comparisons in the storage layer. Values of
    /// different types order by type rank; floats use `total_cmp`; JSON
    /// values compare by their serialized text.
    fn cmp(&self, other: &Self) -> Ordering {
        let rank_cmp = self.rank().cmp(&other.rank());
        if rank_cmp != Ordering::Equal {
            return rank_cmp;
        }
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int64(a), Value::Int64(b)) => a.cmp(b),
            (Value::Float32(a), Value::Float32(b)) => a.total_cmp(b),
            (Value::Float64(a), Value::Float64(b)) => a.total_cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Bytes(a), Value::Bytes(b)) => a.cmp(b),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
            (Value::Numeric(a), Value::Numeric(b)) => a.cmp(b),
            (Value::Json(a), Value::Json(b)) => a.to_string().cmp(&b.to_string()),
            (Value::Array(a), Value::Array(b)) => a.cmp(b),
            _ => unreachable!("equal ranks imply equal variants"),
        }
    }
}
