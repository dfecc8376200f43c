//! Data-change records and their materialization as data-table rows.

use crate::change_stream::mod_group::{Mod, ModGroup, RecordColumnType};
use crate::ops::{ModType, WriteOp};
use wrendb_commons::constants::DataTableColumns;
use wrendb_commons::models::schemas::{ChangeStreamDefinition, ValueCaptureType};
use wrendb_commons::models::{Key, TableName, Timestamp, Value};

/// One row destined for a change stream's data table.
///
/// `record_sequence`, `is_last_record_in_transaction_in_partition`, and
/// `number_of_records_in_transaction` are stamped during finalization; the
/// remaining fields are fixed when the record's mod group closes.
#[derive(Debug, Clone)]
pub struct DataChangeRecord {
    pub partition_token: String,
    pub commit_timestamp: Timestamp,
    pub server_transaction_id: String,
    pub record_sequence: String,
    pub is_last_record_in_transaction_in_partition: bool,
    pub table_name: TableName,
    pub column_types: Vec<RecordColumnType>,
    pub mods: Vec<Mod>,
    pub mod_type: ModType,
    pub value_capture_type: ValueCaptureType,
    pub number_of_records_in_transaction: i64,
    pub number_of_partitions_in_transaction: i64,
    pub transaction_tag: String,
    pub is_system_transaction: bool,
    /// The stream data table this record will be inserted into.
    pub data_table: TableName,
}

/// Converts a closed mod group into a data-change record.
pub fn record_from_group(
    group: ModGroup,
    change_stream: &ChangeStreamDefinition,
    txn_id: i64,
    commit_ts: Timestamp,
) -> DataChangeRecord {
    DataChangeRecord {
        partition_token: group.partition_token,
        commit_timestamp: commit_ts,
        server_transaction_id: txn_id.to_string(),
        record_sequence: String::new(),
        is_last_record_in_transaction_in_partition: false,
        table_name: group.table_name,
        column_types: group.column_types,
        mods: group.mods,
        mod_type: group.mod_type,
        value_capture_type: change_stream.value_capture_type(),
        number_of_records_in_transaction: 0,
        number_of_partitions_in_transaction: 1,
        transaction_tag: String::new(),
        is_system_transaction: false,
        data_table: change_stream.data_table().table_name.clone(),
    }
}

/// Materializes a finalized record as an `Insert` on the stream's data
/// table. Values are listed in the data table's ordinal order; the row key
/// is the table's four-column primary key.
pub fn record_to_write_op(record: &DataChangeRecord) -> WriteOp {
    let columns: Vec<String> = vec![
        DataTableColumns::PARTITION_TOKEN.to_string(),
        DataTableColumns::COMMIT_TIMESTAMP.to_string(),
        DataTableColumns::SERVER_TRANSACTION_ID.to_string(),
        DataTableColumns::RECORD_SEQUENCE.to_string(),
        DataTableColumns::IS_LAST_RECORD_IN_TRANSACTION_IN_PARTITION.to_string(),
        DataTableColumns::TABLE_NAME.to_string(),
        DataTableColumns::COLUMN_TYPES_NAME.to_string(),
        DataTableColumns::COLUMN_TYPES_TYPE.to_string(),
        DataTableColumns::COLUMN_TYPES_IS_PRIMARY_KEY.to_string(),
        DataTableColumns::COLUMN_TYPES_ORDINAL_POSITION.to_string(),
        DataTableColumns::MODS_KEYS.to_string(),
        DataTableColumns::MODS_NEW_VALUES.to_string(),
        DataTableColumns::MODS_OLD_VALUES.to_string(),
        DataTableColumns::MOD_TYPE.to_string(),
        DataTableColumns::VALUE_CAPTURE_TYPE.to_string(),
        DataTableColumns::NUMBER_OF_RECORDS_IN_TRANSACTION.to_string(),
        DataTableColumns::NUMBER_OF_PARTITIONS_IN_TRANSACTION.to_string(),
        DataTableColumns::TRANSACTION_TAG.to_string(),
        DataTableColumns::IS_SYSTEM_TRANSACTION.to_string(),
    ];

    let values = vec![
        Value::String(record.partition_token.clone()),
        Value::Timestamp(record.commit_timestamp),
        Value::String(record.server_transaction_id.clone()),
        Value::String(record.record_sequence.clone()),
        Value::Bool(record.is_last_record_in_transaction_in_partition),
        Value::String(record.table_name.to_string()),
        Value::Array(
            record
                .column_types
                .iter()
                .map(|c| Value::String(c.name.clone()))
                .collect(),
        ),
        Value::Array(
            record
                .column_types
                .iter()
                .map(|c| Value::String(c.type_json.clone()))
                .collect(),
        ),
        Value::Array(
            record
                .column_types
                .iter()
                .map(|c| Value::Bool(c.is_primary_key))
                .collect(),
        ),
        Value::Array(
            record
                .column_types
                .iter()
                .map(|c| Value::Int64(c.ordinal_position))
                .collect(),
        ),
        Value::Array(
            record
                .mods
                .iter()
                .map(|m| Value::String(m.key_json.clone()))
                .collect(),
        ),
        Value::Array(
            record
                .mods
                .iter()
                .map(|m| Value::String(m.new_values_json.clone()))
                .collect(),
        ),
        Value::Array(
            record
                .mods
                .iter()
                .map(|m| Value::String(m.old_values_json.clone()))
                .collect(),
        ),
        Value::String(record.mod_type.as_str().to_string()),
        Value::String(record.value_capture_type.as_str().to_string()),
        Value::Int64(record.number_of_records_in_transaction),
        Value::Int64(record.number_of_partitions_in_transaction),
        Value::String(record.transaction_tag.clone()),
        Value::Bool(record.is_system_transaction),
    ];

    let key = Key::new(vec![
        Value::String(record.partition_token.clone()),
        Value::Timestamp(record.commit_timestamp),
        Value::String(record.server_transaction_id.clone()),
        Value::String(record.record_sequence.clone()),
    ]);

    WriteOp::insert(record.data_table.clone(), key, columns, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change_stream::encoder::EMPTY_JSON_OBJECT;
    use std::collections::BTreeMap;
    use wrendb_commons::models::schemas::TrackSpec;

    fn change_stream() -> ChangeStreamDefinition {
        let mut tracked = BTreeMap::new();
        tracked.insert(TableName::new("TestTable"), TrackSpec::AllColumns);
        ChangeStreamDefinition::new("Stream", tracked).unwrap()
    }

    fn sample_group() -> ModGroup {
        ModGroup {
            table_name: TableName::new("TestTable"),
            mod_type: ModType::Insert,
            column_names: vec!["int64_col".to_string()],
            column_types: vec![RecordColumnType {
                name: "int64_col".to_string(),
                type_json: r#"{"code":"INT64"}"#.to_string(),
                is_primary_key: true,
                ordinal_position: 1,
            }],
            mods: vec![Mod {
                key_json: r#"{"int64_col":"1"}"#.to_string(),
                new_values_json: EMPTY_JSON_OBJECT.to_string(),
                old_values_json: EMPTY_JSON_OBJECT.to_string(),
            }],
            partition_token: "11111".to_string(),
        }
    }

    #[test]
    fn test_record_from_group_carries_stream_fields() {
        let cs = change_stream();
        let record = record_from_group(sample_group(), &cs, 7, Timestamp::from_unix_micros(1));
        assert_eq!(record.server_transaction_id, "7");
        assert_eq!(record.data_table.as_str(), "_change_stream_data_Stream");
        assert_eq!(record.value_capture_type.as_str(), "NEW_VALUES");
        assert_eq!(record.number_of_partitions_in_transaction, 1);
        assert!(!record.is_system_transaction);
        assert_eq!(record.transaction_tag, "");
    }

    #[test]
    fn test_write_op_shape() {
        let cs = change_stream();
        let mut record =
            record_from_group(sample_group(), &cs, 1, Timestamp::from_unix_micros(1_000_000));
        record.record_sequence = "00000000".to_string();
        record.is_last_record_in_transaction_in_partition = true;
        record.number_of_records_in_transaction = 1;

        let op = record_to_write_op(&record);
        let WriteOp::Insert(insert) = op else {
            panic!("expected insert op");
        };
        assert_eq!(insert.table, cs.data_table().table_name);
        assert_eq!(insert.columns.len(), 19);
        assert_eq!(insert.values.len(), 19);
        assert_eq!(insert.key.len(), 4);
        assert_eq!(insert.values[0], Value::String("11111".to_string()));
        assert_eq!(insert.values[3], Value::String("00000000".to_string()));
        assert_eq!(insert.values[4], Value::Bool(true));
        assert_eq!(insert.values[5], Value::String("TestTable".to_string()));
        assert_eq!(insert.values[13], Value::String("INSERT".to_string()));
        assert_eq!(insert.values[14], Value::String("NEW_VALUES".to_string()));
        assert_eq!(insert.values[15], Value::Int64(1));
    }

    #[test]
    fn test_parallel_array_lengths() {
        let cs = change_stream();
        let record = record_from_group(sample_group(), &cs, 1, Timestamp::from_unix_micros(1));
        let op = record_to_write_op(&record);
        let WriteOp::Insert(insert) = op else {
            panic!("expected insert op");
        };
        for idx in 6..=9 {
            let Value::Array(items) = &insert.values[idx] else {
                panic!("expected array at index {idx}");
            };
            assert_eq!(items.len(), record.column_types.len());
        }
        for idx in 10..=12 {
            let Value::Array(items) = &insert.values[idx] else {
                panic!("expected array at index {idx}");
            };
            assert_eq!(items.len(), record.mods.len());
        }
    }
}
