//! Mod groups: the accumulation unit behind data-change records.
//!
//! A mod group collects the mods of contiguous mutations that share a table,
//! a projected column set, and a mod type within one change stream. A group
//! is opened by the first contributing mutation, extended by compatible
//! mutations, and closed — into exactly one data-change record — when an
//! incompatible mutation arrives or the transaction ends.

use crate::ops::ModType;
use wrendb_commons::models::TableName;

/// One row-level contribution inside a data-change record.
#[derive(Debug, Clone, PartialEq)]
pub struct Mod {
    pub key_json: String,
    pub new_values_json: String,
    pub old_values_json: String,
}

/// Type metadata of one projected column, shared by every mod in a group.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordColumnType {
    pub name: String,
    pub type_json: String,
    pub is_primary_key: bool,
    pub ordinal_position: i64,
}

/// The open mod group of one change stream.
#[derive(Debug, Clone)]
pub struct ModGroup {
    pub table_name: TableName,
    pub mod_type: ModType,
    /// Projected column names in table ordinal order.
    pub column_names: Vec<String>,
    pub column_types: Vec<RecordColumnType>,
    pub mods: Vec<Mod>,
    pub partition_token: String,
}

impl ModGroup {
    /// Whether a mod with the given attributes extends this group. Any
    /// difference in table, projected columns, or mod type forces a record
    /// boundary.
    pub fn accepts(
        &self,
        table_name: &TableName,
        mod_type: ModType,
        column_names: &[String],
    ) -> bool {
        self.table_name == *table_name
            && self.mod_type == mod_type
            && self.column_names == column_names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> ModGroup {
        ModGroup {
            table_name: TableName::new("TestTable"),
            mod_type: ModType::Insert,
            column_names: vec!["int64_col".to_string(), "string_col".to_string()],
            column_types: vec![],
            mods: vec![],
            partition_token: "11111".to_string(),
        }
    }

    #[test]
    fn test_accepts_same_shape() {
        let g = group();
        assert!(g.accepts(
            &TableName::new("TestTable"),
            ModType::Insert,
            &["int64_col".to_string(), "string_col".to_string()],
        ));
    }

    #[test]
    fn test_mod_type_change_forces_boundary() {
        let g = group();
        assert!(!g.accepts(
            &TableName::new("TestTable"),
            ModType::Update,
            &["int64_col".to_string(), "string_col".to_string()],
        ));
    }

    #[test]
    fn test_table_change_forces_boundary() {
        let g = group();
        assert!(!g.accepts(
            &TableName::new("TestTable2"),
            ModType::Insert,
            &["int64_col".to_string(), "string_col".to_string()],
        ));
    }

    #[test]
    fn test_column_set_change_forces_boundary() {
        let g = group();
        assert!(!g.accepts(
            &TableName::new("TestTable"),
            ModType::Insert,
            &["int64_col".to_string()],
        ));
    }
}
