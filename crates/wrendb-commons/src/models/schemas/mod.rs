//! Schema Models
//!
//! Single source of truth for schema descriptors: tables, columns, change
//! streams, and the schema catalog consumed by the change-stream pipeline.
//! Descriptors are read-only once constructed.

pub mod change_stream_definition;
pub mod column_definition;
pub mod schema;
pub mod table_definition;

pub use change_stream_definition::{ChangeStreamDefinition, TrackSpec, ValueCaptureType};
pub use column_definition::ColumnDefinition;
pub use schema::{Schema, SchemaBuilder};
pub use table_definition::TableDefinition;
