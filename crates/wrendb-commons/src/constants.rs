//! System-wide constants for WrenDB.
//!
//! Centralizes constant definitions used across the WrenDB crates:
//! - The commit-timestamp sentinel
//! - Internal change-stream table naming
//! - Column names of the change-stream internal tables

use crate::models::Timestamp;

/// Placeholder timestamp a client stores in a column with
/// `allows_commit_timestamp = true` to request server-side substitution with
/// the real commit timestamp. Defined as the maximum representable timestamp
/// so it can never collide with a real commit time.
pub const COMMIT_TIMESTAMP_SENTINEL: Timestamp = Timestamp::MAX;

/// Name prefix of the internal table holding a change stream's data-change
/// records. The full name is `_change_stream_data_<stream_name>`.
pub const CHANGE_STREAM_DATA_TABLE_PREFIX: &str = "_change_stream_data_";

/// Name prefix of the internal table holding a change stream's partition
/// tokens. The full name is `_change_stream_partition_<stream_name>`.
pub const CHANGE_STREAM_PARTITION_TABLE_PREFIX: &str = "_change_stream_partition_";

/// Column names of a change stream's data table, in ordinal order.
pub struct DataTableColumns;

impl DataTableColumns {
    pub const PARTITION_TOKEN: &'static str = "partition_token";
    pub const COMMIT_TIMESTAMP: &'static str = "commit_timestamp";
    pub const SERVER_TRANSACTION_ID: &'static str = "server_transaction_id";
    pub const RECORD_SEQUENCE: &'static str = "record_sequence";
    pub const IS_LAST_RECORD_IN_TRANSACTION_IN_PARTITION: &'static str =
        "is_last_record_in_transaction_in_partition";
    pub const TABLE_NAME: &'static str = "table_name";
    pub const COLUMN_TYPES_NAME: &'static str = "column_types_name";
    pub const COLUMN_TYPES_TYPE: &'static str = "column_types_type";
    pub const COLUMN_TYPES_IS_PRIMARY_KEY: &'static str = "column_types_is_primary_key";
    pub const COLUMN_TYPES_ORDINAL_POSITION: &'static str = "column_types_ordinal_position";
    pub const MODS_KEYS: &'static str = "mods_keys";
    pub const MODS_NEW_VALUES: &'static str = "mods_new_values";
    pub const MODS_OLD_VALUES: &'static str = "mods_old_values";
    pub const MOD_TYPE: &'static str = "mod_type";
    pub const VALUE_CAPTURE_TYPE: &'static str = "value_capture_type";
    pub const NUMBER_OF_RECORDS_IN_TRANSACTION: &'static str = "number_of_records_in_transaction";
    pub const NUMBER_OF_PARTITIONS_IN_TRANSACTION: &'static str =
        "number_of_partitions_in_transaction";
    pub const TRANSACTION_TAG: &'static str = "transaction_tag";
    pub const IS_SYSTEM_TRANSACTION: &'static str = "is_system_transaction";
}

/// Column names of a change stream's partition table.
pub struct PartitionTableColumns;

impl PartitionTableColumns {
    pub const PARTITION_TOKEN: &'static str = "partition_token";
    pub const START_TIME: &'static str = "start_time";
    pub const END_TIME: &'static str = "end_time";
    pub const PARENTS: &'static str = "parents";
    pub const CHILDREN: &'static str = "children";
}
