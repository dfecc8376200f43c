//! # wrendb-core
//!
//! Change-stream materialization core for WrenDB, a Spanner-like relational
//! database emulator.
//!
//! Given a schema with declared change streams, one committing transaction's
//! ordered row mutations, the resolved commit timestamp, and a partition
//! token per stream, this crate produces the data-change records each stream
//! persists — honoring the mod grouping discipline, projecting tracked
//! columns, serializing values to their canonical JSON forms, and stamping
//! the transaction-global record fields.
//!
//! # Core Components
//!
//! - [`change_stream::build_change_stream_write_ops`]: the high-level façade
//! - [`change_stream::ChangeStreamTransaction`]: per-transaction grouping
//!   state with the `log_table_mod` / `build_mutation` contract
//! - [`change_stream::encoder`]: canonical JSON serialization of values
//! - [`change_stream::type_descriptor`]: dialect-aware column type JSON
//! - [`change_stream::partition`]: active partition-token lookup
//! - [`change_stream::commit_timestamp`]: commit-timestamp sentinel
//!   resolution
//!
//! # Example
//!
//! ```rust,ignore
//! use wrendb_core::change_stream::build_change_stream_write_ops;
//!
//! let write_ops =
//!     build_change_stream_write_ops(&schema, &buffered_ops, &store, txn_id, commit_ts)?;
//! // Apply write_ops to the stream data tables together with the base writes.
//! ```

pub mod change_stream;
pub mod config;
pub mod error;
pub mod ops;

// Re-export commonly used items
pub use change_stream::{build_change_stream_write_ops, ChangeStreamTransaction};
pub use config::{ChangeStreamConfig, RecordCountScope};
pub use error::{Error, Result};
pub use ops::{DeleteOp, InsertOp, ModType, UpdateOp, WriteOp};
