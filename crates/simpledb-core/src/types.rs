//! Core types: column kinds, column definitions, table schemas, and input values.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// File extension of a table's backing document.
pub const TABLE_FILE_EXTENSION: &str = "json";

/// The semantic kind of a column.
///
/// Stored by name in the table document. Names resolve through this fixed
/// table only; anything else fails to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    #[serde(rename = "int", alias = "integer")]
    Int,
    #[serde(rename = "float", alias = "real", alias = "double")]
    Float,
    #[serde(rename = "str", alias = "text", alias = "string")]
    Str,
    #[serde(rename = "bool", alias = "boolean")]
    Bool,
    #[serde(rename = "date")]
    Date,
}

impl ColumnType {
    /// The on-disk name, also used in type-mismatch messages.
    pub fn name(self) -> &'static str {
        match self {
            ColumnType::Int => "int",
            ColumnType::Float => "float",
            ColumnType::Str => "str",
            ColumnType::Bool => "bool",
            ColumnType::Date => "date",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A column definition (name + kind).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// Ordered column definitions of a table.
///
/// Position matters: `insert` matches values to columns by index. Column names
/// are not checked for uniqueness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    columns: Vec<ColumnDef>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column.
    pub fn column(mut self, name: &str, column_type: ColumnType) -> Self {
        self.columns.push(ColumnDef::new(name, column_type));
        self
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A typed value supplied to `insert` or used in a query predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Date(NaiveDate),
}

impl Value {
    /// The runtime kind of this value.
    pub fn kind(&self) -> ColumnType {
        match self {
            Value::Int(_) => ColumnType::Int,
            Value::Float(_) => ColumnType::Float,
            Value::Str(_) => ColumnType::Str,
            Value::Bool(_) => ColumnType::Bool,
            Value::Date(_) => ColumnType::Date,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_serializes_as_column_array() {
        let schema = Schema::new()
            .column("id", ColumnType::Int)
            .column("name", ColumnType::Str)
            .column("born", ColumnType::Date);

        let encoded = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            encoded,
            json!([
                {"name": "id", "type": "int"},
                {"name": "name", "type": "str"},
                {"name": "born", "type": "date"}
            ])
        );

        let decoded: Schema = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, schema);
    }

    #[test]
    fn test_column_type_aliases() {
        let schema: Schema = serde_json::from_value(json!([
            {"name": "a", "type": "integer"},
            {"name": "b", "type": "real"},
            {"name": "c", "type": "text"},
            {"name": "d", "type": "boolean"}
        ]))
        .unwrap();
        let kinds: Vec<ColumnType> = schema.columns().iter().map(|c| c.column_type).collect();
        assert_eq!(
            kinds,
            vec![
                ColumnType::Int,
                ColumnType::Float,
                ColumnType::Str,
                ColumnType::Bool
            ]
        );
    }

    #[test]
    fn test_unknown_type_name_is_rejected() {
        let result: Result<Schema, _> =
            serde_json::from_value(json!([{"name": "x", "type": "__import__('os')"}]));
        assert!(result.is_err());
    }

    #[test]
    fn test_value_kinds() {
        assert_eq!(Value::from(1).kind(), ColumnType::Int);
        assert_eq!(Value::from(1.5).kind(), ColumnType::Float);
        assert_eq!(Value::from("x").kind(), ColumnType::Str);
        assert_eq!(Value::from(true).kind(), ColumnType::Bool);
        let d = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        assert_eq!(Value::from(d).kind(), ColumnType::Date);
        assert_eq!(ColumnType::Date.to_string(), "date");
    }
}
