//! In-memory row store.
//!
//! Reference `RowStore` backend over nested B-tree maps. Used by tests and
//! by embedders that do not need durability.

use crate::storage_trait::{Result, RowStore, StoreError};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use wrendb_commons::models::{Key, Row, TableName, Value};

/// In-memory, thread-safe row store with key-ordered scans.
#[derive(Default)]
pub struct MemoryRowStore {
    tables: RwLock<BTreeMap<TableName, BTreeMap<Key, Row>>>,
}

impl MemoryRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently stored in a table.
    pub fn row_count(&self, table: &TableName) -> usize {
        self.tables
            .read()
            .get(table)
            .map(|rows| rows.len())
            .unwrap_or(0)
    }
}

impl RowStore for MemoryRowStore {
    fn read(&self, table: &TableName, key: &Key) -> Result<Option<Row>> {
        Ok(self
            .tables
            .read()
            .get(table)
            .and_then(|rows| rows.get(key))
            .cloned())
    }

    fn insert(
        &self,
        table: &TableName,
        key: Key,
        columns: &[&str],
        values: Vec<Value>,
    ) -> Result<()> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey("empty key".to_string()));
        }
        if columns.len() != values.len() {
            return Err(StoreError::ArityMismatch {
                columns: columns.len(),
                values: values.len(),
            });
        }
        let row = Row::from_columns(key.clone(), columns, values);
        self.tables
            .write()
            .entry(table.clone())
            .or_default()
            .insert(key, row);
        Ok(())
    }

    fn scan(&self, table: &TableName) -> Result<Vec<Row>> {
        Ok(self
            .tables
            .read()
            .get(table)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TableName {
        TableName::new("t")
    }

    #[test]
    fn test_insert_and_read() {
        let store = MemoryRowStore::new();
        store
            .insert(
                &table(),
                Key::new(vec![Value::Int64(1)]),
                &["id", "name"],
                vec![Value::Int64(1), Value::string("a")],
            )
            .unwrap();

        let row = store
            .read(&table(), &Key::new(vec![Value::Int64(1)]))
            .unwrap()
            .unwrap();
        assert_eq!(row.get("name"), Some(&Value::string("a")));
    }

    #[test]
    fn test_read_missing_table_is_none() {
        let store = MemoryRowStore::new();
        assert!(store
            .read(&table(), &Key::new(vec![Value::Int64(1)]))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_scan_missing_table_is_empty() {
        let store = MemoryRowStore::new();
        assert!(store.scan(&table()).unwrap().is_empty());
    }

    #[test]
    fn test_scan_is_key_ordered() {
        let store = MemoryRowStore::new();
        for id in [3_i64, 1, 2] {
            store
                .insert(
                    &table(),
                    Key::new(vec![Value::Int64(id)]),
                    &["id"],
                    vec![Value::Int64(id)],
                )
                .unwrap();
        }
        let ids: Vec<_> = store
            .scan(&table())
            .unwrap()
            .into_iter()
            .map(|r| r.get("id").cloned().unwrap())
            .collect();
        assert_eq!(
            ids,
            vec![Value::Int64(1), Value::Int64(2), Value::Int64(3)]
        );
    }

    #[test]
    fn test_insert_replaces_existing_row() {
        let store = MemoryRowStore::new();
        let key = Key::new(vec![Value::Int64(1)]);
        store
            .insert(&table(), key.clone(), &["id", "v"], vec![
                Value::Int64(1),
                Value::string("old"),
            ])
            .unwrap();
        store
            .insert(&table(), key.clone(), &["id", "v"], vec![
                Value::Int64(1),
                Value::string("new"),
            ])
            .unwrap();
        assert_eq!(store.row_count(&table()), 1);
        let row = store.read(&table(), &key).unwrap().unwrap();
        assert_eq!(row.get("v"), Some(&Value::string("new")));
    }

    #[test]
    fn test_arity_mismatch_rejected() {
        let store = MemoryRowStore::new();
        let err = store
            .insert(
                &table(),
                Key::new(vec![Value::Int64(1)]),
                &["id"],
                vec![Value::Int64(1), Value::string("extra")],
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::ArityMismatch { .. }));
    }

    #[test]
    fn test_empty_key_rejected() {
        let store = MemoryRowStore::new();
        let err = store
            .insert(&table(), Key::new(vec![]), &[], vec![])
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey(_)));
    }
}
