//! Partition-token lookup.
//!
//! Each change stream shards its output by partition token; tokens live in
//! the stream's internal partition table. This core writes each transaction's
//! records to the stream's currently active partition (the row whose
//! `end_time` is null). Partition lifecycle (rotation, TTL) is managed
//! elsewhere.

use crate::error::Result;
use wrendb_commons::constants::PartitionTableColumns;
use wrendb_commons::models::schemas::ChangeStreamDefinition;
use wrendb_commons::models::Value;
use wrendb_store::RowStore;

/// Returns the stream's active partition token, or `None` if the partition
/// table has no active row — in which case the stream emits nothing for the
/// transaction. Storage failures propagate.
pub fn active_partition_token(
    change_stream: &ChangeStreamDefinition,
    store: &dyn RowStore,
) -> Result<Option<String>> {
    let partition_table = &change_stream.partition_table().table_name;
    let rows = store.scan(partition_table)?;
    for row in rows {
        let ended = !matches!(
            row.get(PartitionTableColumns::END_TIME),
            None | Some(Value::Null)
        );
        if ended {
            continue;
        }
        if let Some(Value::String(token)) = row.get(PartitionTableColumns::PARTITION_TOKEN) {
            return Ok(Some(token.clone()));
        }
    }
    log::debug!(
        "No active partition token for change stream '{}'; stream disabled for this transaction",
        change_stream.stream_name()
    );
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use wrendb_commons::models::schemas::TrackSpec;
    use wrendb_commons::models::{Key, TableName, Timestamp};
    use wrendb_store::MemoryRowStore;

    fn change_stream() -> ChangeStreamDefinition {
        let mut tracked = BTreeMap::new();
        tracked.insert(TableName::new("t"), TrackSpec::AllColumns);
        ChangeStreamDefinition::new("S", tracked).unwrap()
    }

    fn seed_token(store: &MemoryRowStore, cs: &ChangeStreamDefinition, token: &str, end: Value) {
        store
            .insert(
                &cs.partition_table().table_name,
                Key::new(vec![Value::string(token)]),
                &[
                    PartitionTableColumns::PARTITION_TOKEN,
                    PartitionTableColumns::END_TIME,
                ],
                vec![Value::string(token), end],
            )
            .unwrap();
    }

    #[test]
    fn test_active_token_found() {
        let store = MemoryRowStore::new();
        let cs = change_stream();
        seed_token(&store, &cs, "11111", Value::Null);
        assert_eq!(
            active_partition_token(&cs, &store).unwrap(),
            Some("11111".to_string())
        );
    }

    #[test]
    fn test_ended_partitions_are_skipped() {
        let store = MemoryRowStore::new();
        let cs = change_stream();
        seed_token(
            &store,
            &cs,
            "00000",
            Value::Timestamp(Timestamp::from_unix_micros(5)),
        );
        seed_token(&store, &cs, "22222", Value::Null);
        assert_eq!(
            active_partition_token(&cs, &store).unwrap(),
            Some("22222".to_string())
        );
    }

    #[test]
    fn test_empty_partition_table_yields_none() {
        let store = MemoryRowStore::new();
        let cs = change_stream();
        assert_eq!(active_partition_token(&cs, &store).unwrap(), None);
    }
}
