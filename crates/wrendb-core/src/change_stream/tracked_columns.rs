//! Resolution of the columns a mod projects.
//!
//! Given a change stream's track spec for a table and a mutation, determines
//! the ordered column set the resulting mod carries:
//! - INSERT and DELETE always project the primary key plus every tracked
//!   non-key column (an INSERT that omits a tracked column emits `null` for
//!   it; a DELETE emits no new values at all).
//! - UPDATE projects the primary key plus the touched tracked non-key
//!   columns; an update that touches only untracked columns yields no mod.
//!
//! Projected columns are always listed in table ordinal order.

use crate::ops::WriteOp;
use std::collections::BTreeSet;
use wrendb_commons::models::schemas::{ColumnDefinition, TableDefinition, TrackSpec};

/// Names of the non-key columns of `table` captured under `spec`.
pub fn tracked_non_key_columns<'a>(
    table: &'a TableDefinition,
    spec: &'a TrackSpec,
) -> BTreeSet<&'a str> {
    match spec {
        TrackSpec::AllColumns => table
            .non_key_columns()
            .map(|c| c.column_name.as_str())
            .collect(),
        TrackSpec::ColumnSet(columns) => columns.iter().map(|c| c.as_str()).collect(),
        TrackSpec::KeysOnly => BTreeSet::new(),
    }
}

/// Columns the mod for `op` projects, in table ordinal order, or `None` if
/// the mutation is invisible to a stream with this track spec.
pub fn projected_columns<'a>(
    table: &'a TableDefinition,
    spec: &TrackSpec,
    op: &WriteOp,
) -> Option<Vec<&'a ColumnDefinition>> {
    let tracked = tracked_non_key_columns(table, spec);
    match op {
        WriteOp::Insert(_) | WriteOp::Delete(_) => Some(
            table
                .columns
                .iter()
                .filter(|c| c.is_primary_key || tracked.contains(c.column_name.as_str()))
                .collect(),
        ),
        WriteOp::Update(update) => {
            let touched: BTreeSet<&str> = update
                .columns
                .iter()
                .map(|c| c.as_str())
                .filter(|c| tracked.contains(c))
                .collect();
            if touched.is_empty() {
                return None;
            }
            Some(
                table
                    .columns
                    .iter()
                    .filter(|c| c.is_primary_key || touched.contains(c.column_name.as_str()))
                    .collect(),
            )
        }
    }
}
