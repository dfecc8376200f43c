//! Per-column JSON type descriptors.
//!
//! Every projected column of a data-change record carries a JSON description
//! of its SQL type in `column_types_type`. Key order is fixed: `code`, then
//! `type_annotation`, then `array_element_type` (serde emits struct fields in
//! declaration order).

use serde::Serialize;
use wrendb_commons::models::{DataType, Dialect};

/// JSON type descriptor of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDescriptor {
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    type_annotation: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    array_element_type: Option<Box<TypeDescriptor>>,
}

impl TypeDescriptor {
    fn scalar(code: &'static str) -> Self {
        Self {
            code,
            type_annotation: None,
            array_element_type: None,
        }
    }

    fn annotated(code: &'static str, annotation: &'static str) -> Self {
        Self {
            code,
            type_annotation: Some(annotation),
            array_element_type: None,
        }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

/// Builds the type descriptor for a column type under the given dialect.
///
/// In the PostgreSQL dialect, `JSONB` and `numeric` carry `type_annotation`
/// (`PG_JSONB` / `PG_NUMERIC`); arrays of these propagate the annotation to
/// the element descriptor.
pub fn type_descriptor(data_type: &DataType, dialect: Dialect) -> TypeDescriptor {
    match data_type {
        DataType::Bool => TypeDescriptor::scalar("BOOL"),
        DataType::Int64 => TypeDescriptor::scalar("INT64"),
        DataType::Float32 => TypeDescriptor::scalar("FLOAT32"),
        DataType::Float64 => TypeDescriptor::scalar("FLOAT64"),
        DataType::String => TypeDescriptor::scalar("STRING"),
        DataType::Bytes => TypeDescriptor::scalar("BYTES"),
        DataType::Date => TypeDescriptor::scalar("DATE"),
        DataType::Timestamp => TypeDescriptor::scalar("TIMESTAMP"),
        DataType::Numeric => match dialect {
            Dialect::GoogleSql => TypeDescriptor::scalar("NUMERIC"),
            Dialect::Postgresql => TypeDescriptor::annotated("NUMERIC", "PG_NUMERIC"),
        },
        DataType::Json => match dialect {
            Dialect::GoogleSql => TypeDescriptor::scalar("JSON"),
            Dialect::Postgresql => TypeDescriptor::annotated("JSON", "PG_JSONB"),
        },
        DataType::Array(element) => TypeDescriptor {
            code: "ARRAY",
            type_annotation: None,
            array_element_type: Some(Box::new(type_descriptor(element, dialect))),
        },
    }
}

/// JSON text of a column's type descriptor.
pub fn type_descriptor_json(data_type: &DataType, dialect: Dialect) -> String {
    serde_json::to_string(&type_descriptor(data_type, dialect)).unwrap_or_default()
}
