//! Row-level write operations.
//!
//! A committing transaction's buffer is an ordered list of [`WriteOp`]s;
//! the change-stream pipeline also emits its records as [`WriteOp`]s against
//! each stream's internal data table.

use std::fmt;
use wrendb_commons::models::{Key, TableName, Value};

/// Insert a new row.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertOp {
    pub table: TableName,
    pub key: Key,
    pub columns: Vec<String>,
    pub values: Vec<Value>,
}

/// Update columns of an existing row.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOp {
    pub table: TableName,
    pub key: Key,
    pub columns: Vec<String>,
    pub values: Vec<Value>,
}

/// Delete a row by key.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOp {
    pub table: TableName,
    pub key: Key,
}

/// A buffered row mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    Insert(InsertOp),
    Update(UpdateOp),
    Delete(DeleteOp),
}

impl WriteOp {
    pub fn insert(
        table: TableName,
        key: Key,
        columns: Vec<String>,
        values: Vec<Value>,
    ) -> Self {
        WriteOp::Insert(InsertOp {
            table,
            key,
            columns,
            values,
        })
    }

    pub fn update(
        table: TableName,
        key: Key,
        columns: Vec<String>,
        values: Vec<Value>,
    ) -> Self {
        WriteOp::Update(UpdateOp {
            table,
            key,
            columns,
            values,
        })
    }

    pub fn delete(table: TableName, key: Key) -> Self {
        WriteOp::Delete(DeleteOp { table, key })
    }

    pub fn table(&self) -> &TableName {
        match self {
            WriteOp::Insert(op) => &op.table,
            WriteOp::Update(op) => &op.table,
            WriteOp::Delete(op) => &op.table,
        }
    }

    pub fn key(&self) -> &Key {
        match self {
            WriteOp::Insert(op) => &op.key,
            WriteOp::Update(op) => &op.key,
            WriteOp::Delete(op) => &op.key,
        }
    }

    pub fn mod_type(&self) -> ModType {
        match self {
            WriteOp::Insert(_) => ModType::Insert,
            WriteOp::Update(_) => ModType::Update,
            WriteOp::Delete(_) => ModType::Delete,
        }
    }

    /// Affected columns and values, if the operation carries any.
    pub fn columns_and_values(&self) -> Option<(&[String], &[Value])> {
        match self {
            WriteOp::Insert(op) => Some((&op.columns, &op.values)),
            WriteOp::Update(op) => Some((&op.columns, &op.values)),
            WriteOp::Delete(_) => None,
        }
    }
}

/// The kind of row mutation a mod represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModType {
    Insert,
    Update,
    Delete,
}

impl ModType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModType::Insert => "INSERT",
            ModType::Update => "UPDATE",
            ModType::Delete => "DELETE",
        }
    }
}

impl fmt::Display for ModType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
