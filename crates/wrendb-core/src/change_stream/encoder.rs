//! Canonical JSON serialization of domain values.
//!
//! Produces the JSON text stored in the `keys`, `new_values`, and
//! `old_values` fields of a mod. The form is pinned by downstream consumers:
//! - object keys in ascending lexicographic order
//! - 64-bit integers and NUMERIC values as quoted decimal strings
//! - floats as their shortest round-trip decimal (float32 promoted to double
//!   first)
//! - timestamps as RFC-3339 UTC
//! - bytes as base64
//! - JSONB values (PostgreSQL dialect) as a string holding the value's
//!   compact JSON text

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::NaiveDate;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use wrendb_commons::models::schemas::TableDefinition;
use wrendb_commons::models::{Dialect, Key, Value};

/// Canonical form of an empty JSON object, used for `old_values` (always,
/// under NEW_VALUES capture) and for `new_values` of DELETE mods.
pub const EMPTY_JSON_OBJECT: &str = "{}";

/// Day number of 1970-01-01 in chrono's days-from-CE scheme.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Encodes one value to its canonical JSON form.
pub fn encode_value(value: &Value, dialect: Dialect) -> Result<JsonValue> {
    match value {
        Value::Null => Ok(JsonValue::Null),
        Value::Bool(b) => Ok(JsonValue::Bool(*b)),
        Value::Int64(i) => Ok(JsonValue::String(i.to_string())),
        Value::Float32(f) => Ok(encode_double(f64::from(*f))),
        Value::Float64(f) => Ok(encode_double(*f)),
        Value::String(s) => Ok(JsonValue::String(s.clone())),
        Value::Bytes(b) => Ok(JsonValue::String(BASE64.encode(b))),
        Value::Date(days) => encode_date(*days),
        Value::Timestamp(ts) => ts
            .to_rfc3339()
            .map(JsonValue::String)
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "timestamp out of renderable range: {}us",
                    ts.as_unix_micros()
                ))
            }),
        Value::Numeric(n) => Ok(JsonValue::String(n.to_string())),
        Value::Json(j) => Ok(encode_json(j, dialect)),
        Value::Array(items) => items
            .iter()
            .map(|item| encode_value(item, dialect))
            .collect::<Result<Vec<_>>>()
            .map(JsonValue::Array),
    }
}

/// Shortest round-trip decimal. Non-finite values cannot be JSON numbers and
/// are rendered as strings.
fn encode_double(f: f64) -> JsonValue {
    match serde_json::Number::from_f64(f) {
        Some(n) => JsonValue::Number(n),
        None if f.is_nan() => JsonValue::String("NaN".to_string()),
        None if f > 0.0 => JsonValue::String("Infinity".to_string()),
        None => JsonValue::String("-Infinity".to_string()),
    }
}

fn encode_date(days: i32) -> Result<JsonValue> {
    NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE)
        .map(|d| JsonValue::String(d.format("%Y-%m-%d").to_string()))
        .ok_or_else(|| Error::InvalidArgument(format!("date out of range: {days} days")))
}

/// In the PostgreSQL dialect a JSON value is a JSONB value; JSONB renders as
/// a string holding the document's compact text (`2024` becomes `"2024"`).
/// In the default dialect the document is embedded as-is.
fn encode_json(j: &JsonValue, dialect: Dialect) -> JsonValue {
    match dialect {
        Dialect::GoogleSql => j.clone(),
        Dialect::Postgresql => JsonValue::String(j.to_string()),
    }
}

/// Serializes (column name, encoded value) pairs as a JSON object with keys
/// in ascending lexicographic order.
pub fn encode_object(fields: impl IntoIterator<Item = (String, JsonValue)>) -> Result<String> {
    let map: BTreeMap<String, JsonValue> = fields.into_iter().collect();
    serde_json::to_string(&map).map_err(|e| Error::Internal(format!("mod serialization: {e}")))
}

/// Builds the `key` JSON of a mod: primary-key column names mapped to their
/// encoded key values.
pub fn encode_key_json(table: &TableDefinition, key: &Key, dialect: Dialect) -> Result<String> {
    let pk_columns: Vec<_> = table.primary_key_columns().collect();
    if pk_columns.len() != key.len() {
        return Err(Error::InvalidArgument(format!(
            "key arity mismatch for table '{}': {} key columns, {} key values",
            table.table_name,
            pk_columns.len(),
            key.len()
        )));
    }
    let mut fields = Vec::with_capacity(key.len());
    for (column, value) in pk_columns.iter().zip(key.parts()) {
        fields.push((column.column_name.clone(), encode_value(value, dialect)?));
    }
    encode_object(fields)
}
