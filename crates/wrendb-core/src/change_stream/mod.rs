//! Change-stream materialization pipeline.
//!
//! Transforms one committing transaction's buffered row mutations into
//! data-change records on every change stream that tracks the mutated
//! tables, and returns the records as `Insert` write ops against each
//! stream's internal data table.
//!
//! Control flow: [`build_change_stream_write_ops`] walks the buffered
//! mutations in order, resolves each tracking stream's partition token, and
//! feeds every (mutation, stream) pair through
//! [`ChangeStreamTransaction::log_table_mod`], which validates the mutation,
//! resolves commit-timestamp sentinels, projects the tracked columns, and
//! drives the per-stream mod-group state machine. Finalization
//! ([`ChangeStreamTransaction::build_mutation`]) closes open groups, stamps
//! the transaction-global fields, and materializes the records.

pub mod commit_timestamp;
pub mod encoder;
pub mod mod_group;
pub mod partition;
pub mod record_builder;
pub mod tracked_columns;
pub mod type_descriptor;

use crate::config::{ChangeStreamConfig, RecordCountScope};
use crate::error::{Error, Result};
use crate::ops::WriteOp;
use commit_timestamp::resolve_commit_timestamps;
use encoder::{encode_key_json, encode_object, encode_value, EMPTY_JSON_OBJECT};
use mod_group::{Mod, ModGroup, RecordColumnType};
use partition::active_partition_token;
use record_builder::{record_from_group, record_to_write_op, DataChangeRecord};
use std::collections::BTreeMap;
use tracked_columns::projected_columns;
use type_descriptor::type_descriptor_json;
use wrendb_commons::models::schemas::{ChangeStreamDefinition, ColumnDefinition, Schema};
use wrendb_commons::models::{Timestamp, Value};
use wrendb_store::RowStore;

/// Builds the change-stream write ops for one transaction, using the default
/// configuration.
///
/// For every buffered mutation, every change stream tracking the mutated
/// table contributes mods to its open mod group; closed groups become one
/// data-change record each. The returned ops are `Insert`s on the streams'
/// data tables, in emission order. Streams without an active partition token
/// are silently skipped.
pub fn build_change_stream_write_ops(
    schema: &Schema,
    buffered_ops: &[WriteOp],
    store: &dyn RowStore,
    txn_id: i64,
    commit_ts: Timestamp,
) -> Result<Vec<WriteOp>> {
    build_change_stream_write_ops_with_config(
        schema,
        buffered_ops,
        store,
        txn_id,
        commit_ts,
        &ChangeStreamConfig::default(),
    )
}

/// [`build_change_stream_write_ops`] with an explicit configuration.
pub fn build_change_stream_write_ops_with_config(
    schema: &Schema,
    buffered_ops: &[WriteOp],
    store: &dyn RowStore,
    txn_id: i64,
    commit_ts: Timestamp,
    config: &ChangeStreamConfig,
) -> Result<Vec<WriteOp>> {
    let mut txn =
        ChangeStreamTransaction::with_config(schema, store, txn_id, commit_ts, config.clone());
    // Partition tokens are looked up once per stream per transaction.
    let mut token_by_stream: BTreeMap<String, Option<String>> = BTreeMap::new();

    for op in buffered_ops {
        if schema.find_table(op.table()).is_none() {
            return Err(Error::FailedPrecondition(format!(
                "mutation references table '{}' absent from the schema",
                op.table()
            )));
        }
        for change_stream in schema.change_streams() {
            if change_stream.track_spec(op.table()).is_none() {
                continue;
            }
            let token = match token_by_stream.get(change_stream.stream_name()) {
                Some(token) => token.clone(),
                None => {
                    let token = active_partition_token(change_stream, txn.store())?;
                    token_by_stream
                        .insert(change_stream.stream_name().to_string(), token.clone());
                    token
                }
            };
            let Some(token) = token else {
                continue;
            };
            txn.log_table_mod(op, change_stream, &token)?;
        }
    }

    Ok(txn.build_mutation())
}

/// Per-transaction change-stream state: the records emitted so far and the
/// open mod group of each stream.
///
/// The grouping state is local to one call of the commit path; nothing is
/// shared across transactions. Maps are keyed by stream name in `BTreeMap`s,
/// which fixes a deterministic cross-stream emission order.
pub struct ChangeStreamTransaction<'a> {
    schema: &'a Schema,
    store: &'a dyn RowStore,
    txn_id: i64,
    commit_ts: Timestamp,
    config: ChangeStreamConfig,
    records_by_change_stream: BTreeMap<String, Vec<DataChangeRecord>>,
    last_mod_group_by_change_stream: BTreeMap<String, ModGroup>,
}

impl<'a> ChangeStreamTransaction<'a> {
    pub fn new(
        schema: &'a Schema,
        store: &'a dyn RowStore,
        txn_id: i64,
        commit_ts: Timestamp,
    ) -> Self {
        Self::with_config(schema, store, txn_id, commit_ts, ChangeStreamConfig::default())
    }

    pub fn with_config(
        schema: &'a Schema,
        store: &'a dyn RowStore,
        txn_id: i64,
        commit_ts: Timestamp,
        config: ChangeStreamConfig,
    ) -> Self {
        Self {
            schema,
            store,
            txn_id,
            commit_ts,
            config,
            records_by_change_stream: BTreeMap::new(),
            last_mod_group_by_change_stream: BTreeMap::new(),
        }
    }

    /// The store this transaction reads partition tokens from.
    pub fn store(&self) -> &dyn RowStore {
        self.store
    }

    /// Feeds one mutation into one change stream's grouping state.
    ///
    /// Validates the mutation, resolves commit-timestamp sentinels, projects
    /// the stream's tracked columns, and either extends the stream's open mod
    /// group or closes it into a data-change record and opens a new one. A
    /// mutation that is invisible to the stream (untracked table, or an
    /// update touching only untracked columns) is a no-op.
    pub fn log_table_mod(
        &mut self,
        op: &WriteOp,
        change_stream: &ChangeStreamDefinition,
        partition_token: &str,
    ) -> Result<()> {
        let table = self.schema.find_table(op.table()).ok_or_else(|| {
            Error::FailedPrecondition(format!(
                "mutation references table '{}' absent from the schema",
                op.table()
            ))
        })?;
        let op = resolve_commit_timestamps(op, table, self.commit_ts)?;

        let Some(spec) = change_stream.track_spec(&table.table_name) else {
            return Ok(());
        };
        let Some(projected) = projected_columns(table, spec, &op) else {
            log::trace!(
                "Mutation on '{}' touches no column tracked by change stream '{}'",
                table.table_name,
                change_stream.stream_name()
            );
            return Ok(());
        };

        let dialect = self.schema.dialect();
        let key_json = encode_key_json(table, op.key(), dialect)?;
        let new_values_json = self.encode_new_values(&op, &projected)?;
        let mod_entry = Mod {
            key_json,
            new_values_json,
            old_values_json: EMPTY_JSON_OBJECT.to_string(),
        };

        let mod_type = op.mod_type();
        let column_names: Vec<String> = projected
            .iter()
            .map(|c| c.column_name.clone())
            .collect();
        let stream_name = change_stream.stream_name().to_string();

        if let Some(group) = self.last_mod_group_by_change_stream.get_mut(&stream_name) {
            if group.accepts(&table.table_name, mod_type, &column_names) {
                group.mods.push(mod_entry);
                return Ok(());
            }
        }

        // Boundary: close the open group (if any) and open a new one.
        if let Some(closed) = self.last_mod_group_by_change_stream.remove(&stream_name) {
            log::debug!(
                "Closing mod group for change stream '{}' ({} mods, {} on '{}')",
                stream_name,
                closed.mods.len(),
                closed.mod_type,
                closed.table_name
            );
            let record = record_from_group(closed, change_stream, self.txn_id, self.commit_ts);
            self.records_by_change_stream
                .entry(stream_name.clone())
                .or_default()
                .push(record);
        }

        let column_types = projected
            .iter()
            .map(|c| RecordColumnType {
                name: c.column_name.clone(),
                type_json: type_descriptor_json(&c.data_type, dialect),
                is_primary_key: c.is_primary_key,
                ordinal_position: i64::from(c.ordinal_position),
            })
            .collect();
        self.last_mod_group_by_change_stream.insert(
            stream_name,
            ModGroup {
                table_name: table.table_name.clone(),
                mod_type,
                column_names,
                column_types,
                mods: vec![mod_entry],
                partition_token: partition_token.to_string(),
            },
        );
        Ok(())
    }

    /// Finalizes the transaction: closes every open mod group, stamps
    /// `record_sequence` (dense, zero-padded, in emission order across all
    /// streams), `number_of_records_in_transaction`, and the per-partition
    /// last-record flag, and materializes each record as an `Insert` on its
    /// stream's data table.
    pub fn build_mutation(mut self) -> Vec<WriteOp> {
        let open_groups = std::mem::take(&mut self.last_mod_group_by_change_stream);
        for (stream_name, group) in open_groups {
            let Some(change_stream) = self.schema.find_change_stream(&stream_name) else {
                log::warn!("Dropping mod group of unknown change stream '{stream_name}'");
                continue;
            };
            let record = record_from_group(group, change_stream, self.txn_id, self.commit_ts);
            self.records_by_change_stream
                .entry(stream_name)
                .or_default()
                .push(record);
        }

        let total_records: i64 = self
            .records_by_change_stream
            .values()
            .map(|records| records.len() as i64)
            .sum();

        let mut write_ops = Vec::with_capacity(total_records as usize);
        let mut sequence: i64 = 0;
        for records in self.records_by_change_stream.values_mut() {
            let stream_records = records.len() as i64;
            for (idx, record) in records.iter_mut().enumerate() {
                record.record_sequence = format!("{:08}", sequence);
                sequence += 1;
                record.is_last_record_in_transaction_in_partition =
                    idx as i64 + 1 == stream_records;
                record.number_of_records_in_transaction = match self.config.record_count_scope {
                    RecordCountScope::TransactionWide => total_records,
                    RecordCountScope::PerStream => stream_records,
                };
                write_ops.push(record_to_write_op(record));
            }
        }

        log::debug!(
            "Transaction {} emitted {} change-stream records across {} streams",
            self.txn_id,
            total_records,
            self.records_by_change_stream.len()
        );
        write_ops
    }

    /// `new_values` JSON for a mod: the projected non-key columns with their
    /// supplied values. For INSERT, a projected column the mutation does not
    /// mention is an explicit `null`; for DELETE the object is empty.
    fn encode_new_values(
        &self,
        op: &WriteOp,
        projected: &[&ColumnDefinition],
    ) -> Result<String> {
        let Some((columns, values)) = op.columns_and_values() else {
            return Ok(EMPTY_JSON_OBJECT.to_string());
        };
        let dialect = self.schema.dialect();
        let supplied: BTreeMap<&str, &Value> = columns
            .iter()
            .map(|c| c.as_str())
            .zip(values.iter())
            .collect();
        let mut fields = Vec::new();
        for column in projected.iter().filter(|c| !c.is_primary_key) {
            let encoded = match supplied.get(column.column_name.as_str()) {
                Some(value) => encode_value(value, dialect)?,
                None => serde_json::Value::Null,
            };
            fields.push((column.column_name.clone(), encoded));
        }
        encode_object(fields)
    }
}
