//! Schema catalog: the read-only set of tables and change streams a
//! transaction commits against.

use crate::models::schemas::{ChangeStreamDefinition, TableDefinition, TrackSpec};
use crate::models::{Dialect, TableName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A read-only schema: user tables plus declared change streams, in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    dialect: Dialect,
    tables: Vec<TableDefinition>,
    change_streams: Vec<ChangeStreamDefinition>,
}

impl Schema {
    pub fn builder(dialect: Dialect) -> SchemaBuilder {
        SchemaBuilder::new(dialect)
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn tables(&self) -> &[TableDefinition] {
        &self.tables
    }

    /// Change streams in declaration order; the pipeline iterates these in
    /// order, which fixes the cross-stream emission order.
    pub fn change_streams(&self) -> &[ChangeStreamDefinition] {
        &self.change_streams
    }

    pub fn find_table(&self, table_name: &TableName) -> Option<&TableDefinition> {
        self.tables.iter().find(|t| &t.table_name == table_name)
    }

    pub fn find_change_stream(&self, stream_name: &str) -> Option<&ChangeStreamDefinition> {
        self.change_streams
            .iter()
            .find(|cs| cs.stream_name() == stream_name)
    }
}

/// Builder for [`Schema`]. Tables must be added before the streams that
/// track them.
#[derive(Debug)]
pub struct SchemaBuilder {
    dialect: Dialect,
    tables: Vec<TableDefinition>,
    change_streams: Vec<ChangeStreamDefinition>,
    error: Option<String>,
}

impl SchemaBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            tables: Vec::new(),
            change_streams: Vec::new(),
            error: None,
        }
    }

    /// Add a user table.
    pub fn table(mut self, table: TableDefinition) -> Self {
        if self.error.is_some() {
            return self;
        }
        if self.tables.iter().any(|t| t.table_name == table.table_name) {
            self.error = Some(format!("Duplicate table '{}'", table.table_name));
            return self;
        }
        self.tables.push(table);
        self
    }

    /// `CREATE CHANGE STREAM <name> FOR ALL`: track every table declared so
    /// far, all columns.
    pub fn change_stream_for_all(self, stream_name: impl Into<String>) -> Self {
        let tracked: Vec<(TableName, TrackSpec)> = self
            .tables
            .iter()
            .map(|t| (t.table_name.clone(), TrackSpec::AllColumns))
            .collect();
        self.change_stream(stream_name, tracked)
    }

    /// `CREATE CHANGE STREAM <name> FOR <table>[(cols...)] ...`.
    pub fn change_stream(
        mut self,
        stream_name: impl Into<String>,
        tracked: Vec<(TableName, TrackSpec)>,
    ) -> Self {
        if self.error.is_some() {
            return self;
        }
        let stream_name = stream_name.into();
        if self
            .change_streams
            .iter()
            .any(|cs| cs.stream_name() == stream_name)
        {
            self.error = Some(format!("Duplicate change stream '{stream_name}'"));
            return self;
        }

        let mut tracked_tables = BTreeMap::new();
        for (table_name, spec) in tracked {
            let Some(table) = self.tables.iter().find(|t| t.table_name == table_name) else {
                self.error = Some(format!(
                    "Change stream '{stream_name}' tracks unknown table '{table_name}'"
                ));
                return self;
            };
            if let TrackSpec::ColumnSet(columns) = &spec {
                for column_name in columns {
                    match table.find_column(column_name) {
                        None => {
                            self.error = Some(format!(
                                "Change stream '{stream_name}' tracks unknown column \
                                 '{table_name}.{column_name}'"
                            ));
                            return self;
                        }
                        Some(col) if col.is_primary_key => {
                            self.error = Some(format!(
                                "Change stream '{stream_name}' cannot list key column \
                                 '{table_name}.{column_name}'"
                            ));
                            return self;
                        }
                        Some(_) => {}
                    }
                }
            }
            if tracked_tables.insert(table_name.clone(), spec).is_some() {
                self.error = Some(format!(
                    "Change stream '{stream_name}' tracks table '{table_name}' twice"
                ));
                return self;
            }
        }

        match ChangeStreamDefinition::new(stream_name, tracked_tables) {
            Ok(cs) => self.change_streams.push(cs),
            Err(e) => self.error = Some(e),
        }
        self
    }

    pub fn build(self) -> Result<Schema, String> {
        if let Some(error) = self.error {
            return Err(error);
        }
        Ok(Schema {
            dialect: self.dialect,
            tables: self.tables,
            change_streams: self.change_streams,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schemas::ColumnDefinition;
    use crate::models::DataType;

    fn orders() -> TableDefinition {
        TableDefinition::new(
            TableName::new("Orders"),
            vec![
                ColumnDefinition::primary_key("id", 1, DataType::Int64),
                ColumnDefinition::simple("status", 2, DataType::String),
            ],
        )
        .unwrap()
    }

    fn items() -> TableDefinition {
        TableDefinition::new(
            TableName::new("Items"),
            vec![
                ColumnDefinition::primary_key("id", 1, DataType::Int64),
                ColumnDefinition::simple("label", 2, DataType::String),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_for_all_expands_over_declared_tables() {
        let schema = Schema::builder(Dialect::GoogleSql)
            .table(orders())
            .table(items())
            .change_stream_for_all("Everything")
            .build()
            .unwrap();
        let cs = schema.find_change_stream("Everything").unwrap();
        assert_eq!(cs.tracked_tables().len(), 2);
        assert_eq!(
            cs.track_spec(&TableName::new("Orders")),
            Some(&TrackSpec::AllColumns)
        );
    }

    #[test]
    fn test_column_set_validation() {
        let result = Schema::builder(Dialect::GoogleSql)
            .table(orders())
            .change_stream(
                "Bad",
                vec![(
                    TableName::new("Orders"),
                    TrackSpec::ColumnSet(vec!["missing".to_string()]),
                )],
            )
            .build();
        assert!(result.unwrap_err().contains("unknown column"));
    }

    #[test]
    fn test_column_set_rejects_key_columns() {
        let result = Schema::builder(Dialect::GoogleSql)
            .table(orders())
            .change_stream(
                "Bad",
                vec![(
                    TableName::new("Orders"),
                    TrackSpec::ColumnSet(vec!["id".to_string()]),
                )],
            )
            .build();
        assert!(result.unwrap_err().contains("key column"));
    }

    #[test]
    fn test_unknown_table_rejected() {
        let result = Schema::builder(Dialect::GoogleSql)
            .change_stream(
                "Bad",
                vec![(TableName::new("Nope"), TrackSpec::KeysOnly)],
            )
            .build();
        assert!(result.unwrap_err().contains("unknown table"));
    }

    #[test]
    fn test_duplicate_stream_rejected() {
        let result = Schema::builder(Dialect::GoogleSql)
            .table(orders())
            .change_stream_for_all("S")
            .change_stream_for_all("S")
            .build();
        assert!(result.unwrap_err().contains("Duplicate change stream"));
    }

    #[test]
    fn test_declaration_order_preserved() {
        let schema = Schema::builder(Dialect::GoogleSql)
            .table(orders())
            .change_stream_for_all("B_Second")
            .change_stream_for_all("A_First")
            .build()
            .unwrap();
        let names: Vec<_> = schema
            .change_streams()
            .iter()
            .map(|cs| cs.stream_name())
            .collect();
        assert_eq!(names, vec!["B_Second", "A_First"]);
    }

    #[test]
    fn test_find_table_is_case_sensitive() {
        let schema = Schema::builder(Dialect::GoogleSql)
            .table(orders())
            .build()
            .unwrap();
        assert!(schema.find_table(&TableName::new("Orders")).is_some());
        assert!(schema.find_table(&TableName::new("orders")).is_none());
    }
}
