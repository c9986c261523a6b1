//! Row objects returned by table reads.

use std::ops::Index;

use chrono::NaiveDate;
use serde_json::Value;

use crate::codec::DATE_FORMAT;
use crate::storage::StoredRow;

/// One stored record, exposing each column by name.
///
/// Values are handed back exactly as stored: date columns read as their
/// `YYYY-MM-DD` string unless decoded with [`Row::get_date`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    table: String,
    fields: StoredRow,
}

impl Row {
    pub(crate) fn new(table: &str, fields: StoredRow) -> Self {
        Self {
            table: table.to_string(),
            fields,
        }
    }

    /// Name of the table this row was read from.
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    pub fn get_i64(&self, column: &str) -> Option<i64> {
        self.get(column)?.as_i64()
    }

    pub fn get_f64(&self, column: &str) -> Option<f64> {
        self.get(column)?.as_f64()
    }

    pub fn get_str(&self, column: &str) -> Option<&str> {
        self.get(column)?.as_str()
    }

    pub fn get_bool(&self, column: &str) -> Option<bool> {
        self.get(column)?.as_bool()
    }

    /// Decode a stored ISO-8601 date. `None` if absent or not a date string.
    pub fn get_date(&self, column: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.get_str(column)?, DATE_FORMAT).ok()
    }

    /// Column names present in this row, in stored order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    pub fn into_map(self) -> StoredRow {
        self.fields
    }
}

impl Index<&str> for Row {
    type Output = Value;

    /// Missing columns index to `null`, as with `serde_json::Value`.
    fn index(&self, column: &str) -> &Value {
        self.fields.get(column).unwrap_or(&Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Row {
        let fields = json!({
            "id": 3,
            "ratio": 0.5,
            "name": "Grace",
            "active": true,
            "born": "1906-12-09"
        });
        Row::new("people", fields.as_object().unwrap().clone())
    }

    #[test]
    fn test_named_access() {
        let row = sample();
        assert_eq!(row.table(), "people");
        assert_eq!(row["name"], "Grace");
        assert_eq!(row["missing"], Value::Null);
        assert_eq!(row.get("id"), Some(&json!(3)));
        assert!(row.get("missing").is_none());
    }

    #[test]
    fn test_typed_accessors() {
        let row = sample();
        assert_eq!(row.get_i64("id"), Some(3));
        assert_eq!(row.get_f64("ratio"), Some(0.5));
        assert_eq!(row.get_str("name"), Some("Grace"));
        assert_eq!(row.get_bool("active"), Some(true));
        assert_eq!(row.get_str("born"), Some("1906-12-09"));
        assert_eq!(
            row.get_date("born"),
            NaiveDate::from_ymd_opt(1906, 12, 9)
        );
        assert_eq!(row.get_date("name"), None);
        assert_eq!(row.get_i64("name"), None);
    }

    #[test]
    fn test_columns_keep_stored_order() {
        let row = sample();
        let cols: Vec<&str> = row.columns().collect();
        assert_eq!(cols, vec!["id", "ratio", "name", "active", "born"]);
        assert_eq!(row.len(), 5);
    }
}
