//! # wrendb-store
//!
//! Storage abstraction for WrenDB: a typed-row key-value interface over
//! tables, plus an in-memory reference backend.
//!
//! The change-stream core consumes storage exclusively through the
//! [`RowStore`] trait; the engine behind it (LSM tree, B-tree, remote
//! service) is not this crate's concern.
//!
//! ## Example Usage
//!
//! ```rust
//! use wrendb_commons::models::{Key, TableName, Value};
//! use wrendb_store::{MemoryRowStore, RowStore};
//!
//! let store = MemoryRowStore::new();
//! let table = TableName::new("users");
//! store
//!     .insert(
//!         &table,
//!         Key::new(vec![Value::Int64(1)]),
//!         &["id", "name"],
//!         vec![Value::Int64(1), Value::string("wren")],
//!     )
//!     .unwrap();
//! assert_eq!(store.scan(&table).unwrap().len(), 1);
//! ```

pub mod memory;
pub mod storage_trait;

pub use memory::MemoryRowStore;
pub use storage_trait::{RowStore, StoreError};
