//! Row codec: validates typed values against a schema and converts them to
//! their stored JSON form.
//!
//! Dates are the only kind with a dedicated encoding (`YYYY-MM-DD`). The
//! conversion is one-way: stored rows are handed back as JSON, so a date
//! column reads as a string.

use serde_json::{Map, Number};

use crate::error::ValidationError;
use crate::types::{Schema, Value};

/// ISO-8601 calendar date format used for stored dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Check `values` positionally against `schema`.
///
/// Fails on arity first, then on the first (left-most) value whose kind does
/// not match its column.
pub fn validate(schema: &Schema, values: &[Value]) -> Result<(), ValidationError> {
    if values.len() != schema.len() {
        return Err(ValidationError::FieldCount {
            expected: schema.len(),
            actual: values.len(),
        });
    }

    for (value, column) in values.iter().zip(schema.columns()) {
        if value.kind() != column.column_type {
            return Err(ValidationError::FieldType {
                column: column.name.clone(),
                given: value.kind().name(),
                expected: column.column_type.name(),
            });
        }
        if let Value::Float(f) = value
            && !f.is_finite()
        {
            return Err(ValidationError::InvalidValue {
                column: column.name.clone(),
                reason: format!("{f} cannot be stored"),
            });
        }
    }

    Ok(())
}

/// Zip `values` with the schema's column names into a stored row.
///
/// Callers validate first; a non-finite float that slips through is stored
/// as null.
pub fn format_row(schema: &Schema, values: &[Value]) -> Map<String, serde_json::Value> {
    schema
        .column_names()
        .zip(values)
        .map(|(name, value)| (name.to_string(), to_json(value)))
        .collect()
}

/// Stored JSON form of a single value.
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Int(i) => serde_json::Value::from(*i),
        Value::Float(f) => Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Str(s) => serde_json::Value::String(s.clone()),
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Date(d) => serde_json::Value::String(d.format(DATE_FORMAT).to_string()),
    }
}

/// Whether a stored JSON value equals an expected (already encoded) value.
///
/// Numbers compare numerically, so `1` matches `1.0`. Mismatched JSON kinds
/// never match.
pub fn stored_eq(stored: &serde_json::Value, expected: &serde_json::Value) -> bool {
    use serde_json::Value as Json;

    match (stored, expected) {
        (Json::Null, Json::Null) => true,
        (Json::Number(a), Json::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => a == b,
            _ => a.as_f64().zip(b.as_f64()).is_some_and(|(a, b)| a == b),
        },
        (Json::String(a), Json::String(b)) => a == b,
        (Json::Bool(a), Json::Bool(b)) => a == b,
        _ => false,
    }
}
