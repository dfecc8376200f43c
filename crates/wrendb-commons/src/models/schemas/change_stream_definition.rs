//! Change stream definition.
//!
//! A change stream tracks row-level mutations to some set of columns of some
//! tables. Each stream owns two internal tables, synthesized at definition
//! time:
//! - `_change_stream_data_<name>`: one row per emitted data-change record
//! - `_change_stream_partition_<name>`: the stream's partition tokens

use crate::constants::{
    DataTableColumns, PartitionTableColumns, CHANGE_STREAM_DATA_TABLE_PREFIX,
    CHANGE_STREAM_PARTITION_TABLE_PREFIX,
};
use crate::models::schemas::{ColumnDefinition, TableDefinition};
use crate::models::{DataType, TableName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which columns of a tracked table a change stream captures.
///
/// Primary-key columns are always captured; a `TrackSpec` only governs
/// non-key columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackSpec {
    /// `FOR <table>` / `FOR ALL`: every non-key column.
    AllColumns,
    /// `FOR <table>(col, ...)`: the listed non-key columns.
    ColumnSet(Vec<String>),
    /// `FOR <table>()`: key columns only.
    KeysOnly,
}

/// Capture policy of a change stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValueCaptureType {
    #[default]
    NewValues,
}

impl ValueCaptureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueCaptureType::NewValues => "NEW_VALUES",
        }
    }
}

impl fmt::Display for ValueCaptureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete definition of a change stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeStreamDefinition {
    stream_name: String,
    value_capture_type: ValueCaptureType,
    tracked_tables: BTreeMap<TableName, TrackSpec>,
    data_table: TableDefinition,
    partition_table: TableDefinition,
}

impl ChangeStreamDefinition {
    /// Create a change stream tracking the given tables, synthesizing its
    /// internal data and partition tables.
    pub fn new(
        stream_name: impl Into<String>,
        tracked_tables: BTreeMap<TableName, TrackSpec>,
    ) -> Result<Self, String> {
        let stream_name = stream_name.into();
        if stream_name.is_empty() {
            return Err("Change stream name cannot be empty".to_string());
        }
        let data_table = Self::build_data_table(&stream_name)?;
        let partition_table = Self::build_partition_table(&stream_name)?;
        Ok(Self {
            stream_name,
            value_capture_type: ValueCaptureType::NewValues,
            tracked_tables,
            data_table,
            partition_table,
        })
    }

    pub fn stream_name(&self) -> &str {
        &self.stream_name
    }

    pub fn value_capture_type(&self) -> ValueCaptureType {
        self.value_capture_type
    }

    /// Track spec for a table, or `None` if the stream does not track it.
    pub fn track_spec(&self, table: &TableName) -> Option<&TrackSpec> {
        self.tracked_tables.get(table)
    }

    pub fn tracked_tables(&self) -> &BTreeMap<TableName, TrackSpec> {
        &self.tracked_tables
    }

    pub fn data_table(&self) -> &TableDefinition {
        &self.data_table
    }

    pub fn partition_table(&self) -> &TableDefinition {
        &self.partition_table
    }

    fn build_data_table(stream_name: &str) -> Result<TableDefinition, String> {
        let string_array = DataType::array_of(DataType::String);
        let columns = vec![
            ColumnDefinition::primary_key(DataTableColumns::PARTITION_TOKEN, 1, DataType::String),
            ColumnDefinition::primary_key(
                DataTableColumns::COMMIT_TIMESTAMP,
                2,
                DataType::Timestamp,
            ),
            ColumnDefinition::primary_key(
                DataTableColumns::SERVER_TRANSACTION_ID,
                3,
                DataType::String,
            ),
            ColumnDefinition::primary_key(DataTableColumns::RECORD_SEQUENCE, 4, DataType::String),
            ColumnDefinition::simple(
                DataTableColumns::IS_LAST_RECORD_IN_TRANSACTION_IN_PARTITION,
                5,
                DataType::Bool,
            ),
            ColumnDefinition::simple(DataTableColumns::TABLE_NAME, 6, DataType::String),
            ColumnDefinition::simple(DataTableColumns::COLUMN_TYPES_NAME, 7, string_array.clone()),
            ColumnDefinition::simple(DataTableColumns::COLUMN_TYPES_TYPE, 8, string_array.clone()),
            ColumnDefinition::simple(
                DataTableColumns::COLUMN_TYPES_IS_PRIMARY_KEY,
                9,
                DataType::array_of(DataType::Bool),
            ),
            ColumnDefinition::simple(
                DataTableColumns::COLUMN_TYPES_ORDINAL_POSITION,
                10,
                DataType::array_of(DataType::Int64),
            ),
            ColumnDefinition::simple(DataTableColumns::MODS_KEYS, 11, string_array.clone()),
            ColumnDefinition::simple(DataTableColumns::MODS_NEW_VALUES, 12, string_array.clone()),
            ColumnDefinition::simple(DataTableColumns::MODS_OLD_VALUES, 13, string_array.clone()),
            ColumnDefinition::simple(DataTableColumns::MOD_TYPE, 14, DataType::String),
            ColumnDefinition::simple(DataTableColumns::VALUE_CAPTURE_TYPE, 15, DataType::String),
            ColumnDefinition::simple(
                DataTableColumns::NUMBER_OF_RECORDS_IN_TRANSACTION,
                16,
                DataType::Int64,
            ),
            ColumnDefinition::simple(
                DataTableColumns::NUMBER_OF_PARTITIONS_IN_TRANSACTION,
                17,
                DataType::Int64,
            ),
            ColumnDefinition::simple(DataTableColumns::TRANSACTION_TAG, 18, DataType::String),
            ColumnDefinition::simple(DataTableColumns::IS_SYSTEM_TRANSACTION, 19, DataType::Bool),
        ];
        TableDefinition::new(
            TableName::new(format!("{CHANGE_STREAM_DATA_TABLE_PREFIX}{stream_name}")),
            columns,
        )
    }

    fn build_partition_table(stream_name: &str) -> Result<TableDefinition, String> {
        let columns = vec![
            ColumnDefinition::primary_key(
                PartitionTableColumns::PARTITION_TOKEN,
                1,
                DataType::String,
            ),
            ColumnDefinition::simple(PartitionTableColumns::START_TIME, 2, DataType::Timestamp),
            ColumnDefinition::simple(PartitionTableColumns::END_TIME, 3, DataType::Timestamp),
            ColumnDefinition::simple(
                PartitionTableColumns::PARENTS,
                4,
                DataType::array_of(DataType::String),
            ),
            ColumnDefinition::simple(
                PartitionTableColumns::CHILDREN,
                5,
                DataType::array_of(DataType::String),
            ),
        ];
        TableDefinition::new(
            TableName::new(format!(
                "{CHANGE_STREAM_PARTITION_TABLE_PREFIX}{stream_name}"
            )),
            columns,
        )
    }
}
