//! # wrendb-commons
//!
//! Shared types, constants, and schema descriptors for WrenDB.
//!
//! This crate provides the foundational domain model used by the other WrenDB
//! crates (wrendb-store, wrendb-core):
//! - Typed identifier wrappers (`TableName`)
//! - The unified data type system (`DataType`, `Dialect`)
//! - Domain values (`Value`, `NumericValue`, `Timestamp`, `Key`, `Row`)
//! - Schema descriptors (`TableDefinition`, `ColumnDefinition`,
//!   `ChangeStreamDefinition`, `Schema`)
//!
//! ## Example Usage
//!
//! ```rust
//! use wrendb_commons::models::schemas::{ColumnDefinition, TableDefinition};
//! use wrendb_commons::models::{DataType, TableName};
//!
//! let columns = vec![
//!     ColumnDefinition::primary_key("id", 1, DataType::Int64),
//!     ColumnDefinition::simple("name", 2, DataType::String),
//! ];
//! let table = TableDefinition::new(TableName::new("users"), columns).unwrap();
//! assert_eq!(table.table_name.as_str(), "users");
//! ```

pub mod constants;
pub mod models;

// Re-export commonly used types at crate root
pub use constants::COMMIT_TIMESTAMP_SENTINEL;
pub use models::{DataType, Dialect, Key, NumericValue, Row, TableName, Timestamp, Value};
