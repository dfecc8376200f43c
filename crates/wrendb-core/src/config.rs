//! Configuration for change-stream materialization.

use serde::{Deserialize, Serialize};

/// Scope of the `number_of_records_in_transaction` field stamped on every
/// emitted data-change record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RecordCountScope {
    /// Count records across all change streams in the transaction.
    #[default]
    TransactionWide,
    /// Count only the records of the record's own change stream.
    PerStream,
}

/// Tunables of the change-stream pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeStreamConfig {
    pub record_count_scope: RecordCountScope,
}
