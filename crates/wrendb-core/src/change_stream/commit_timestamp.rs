//! Commit-timestamp sentinel resolution and mutation validation.
//!
//! A client may write [`COMMIT_TIMESTAMP_SENTINEL`] to a column declared
//! with `allows_commit_timestamp = true`; the commit path replaces it with
//! the transaction's real commit timestamp. Resolution runs before mods are
//! encoded, so the sentinel never reaches a change stream — neither in the
//! record's `commit_timestamp` column nor inside `new_values`.

use crate::error::{Error, Result};
use crate::ops::{DeleteOp, InsertOp, UpdateOp, WriteOp};
use wrendb_commons::constants::COMMIT_TIMESTAMP_SENTINEL;
use wrendb_commons::models::schemas::{ColumnDefinition, TableDefinition};
use wrendb_commons::models::{Key, Timestamp, Value};

/// Validates a mutation against its table and returns a copy with every
/// commit-timestamp sentinel replaced by `commit_ts`.
///
/// Fails with `InvalidArgument` on column/value arity mismatch, key arity
/// mismatch, or a column that does not exist in the table.
pub fn resolve_commit_timestamps(
    op: &WriteOp,
    table: &TableDefinition,
    commit_ts: Timestamp,
) -> Result<WriteOp> {
    let key = resolve_key(op.key(), table, commit_ts)?;
    match op {
        WriteOp::Insert(insert) => {
            let values = resolve_values(&insert.columns, &insert.values, table, commit_ts)?;
            Ok(WriteOp::Insert(InsertOp {
                table: insert.table.clone(),
                key,
                columns: insert.columns.clone(),
                values,
            }))
        }
        WriteOp::Update(update) => {
            let values = resolve_values(&update.columns, &update.values, table, commit_ts)?;
            Ok(WriteOp::Update(UpdateOp {
                table: update.table.clone(),
                key,
                columns: update.columns.clone(),
                values,
            }))
        }
        WriteOp::Delete(delete) => Ok(WriteOp::Delete(DeleteOp {
            table: delete.table.clone(),
            key,
        })),
    }
}

fn resolve_values(
    columns: &[String],
    values: &[Value],
    table: &TableDefinition,
    commit_ts: Timestamp,
) -> Result<Vec<Value>> {
    if columns.len() != values.len() {
        return Err(Error::InvalidArgument(format!(
            "mutation on table '{}' has {} columns but {} values",
            table.table_name,
            columns.len(),
            values.len()
        )));
    }
    columns
        .iter()
        .zip(values)
        .map(|(column_name, value)| {
            let column = table.find_column(column_name).ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "unknown column '{}' in mutation on table '{}'",
                    column_name, table.table_name
                ))
            })?;
            Ok(resolve_value(value, column, commit_ts))
        })
        .collect()
}

fn resolve_key(key: &Key, table: &TableDefinition, commit_ts: Timestamp) -> Result<Key> {
    let pk_columns: Vec<_> = table.primary_key_columns().collect();
    if pk_columns.len() != key.len() {
        return Err(Error::InvalidArgument(format!(
            "key arity mismatch for table '{}': {} key columns, {} key values",
            table.table_name,
            pk_columns.len(),
            key.len()
        )));
    }
    let parts = pk_columns
        .iter()
        .zip(key.parts())
        .map(|(column, value)| resolve_value(value, column, commit_ts))
        .collect();
    Ok(Key::new(parts))
}

fn resolve_value(value: &Value, column: &ColumnDefinition, commit_ts: Timestamp) -> Value {
    match value {
        Value::Timestamp(ts)
            if column.allows_commit_timestamp && *ts == COMMIT_TIMESTAMP_SENTINEL =>
        {
            Value::Timestamp(commit_ts)
        }
        other => other.clone(),
    }
}
