//! Fetched rows
//!
//! The executor hands back driver-neutral [`Record`]s so repositories and
//! callers never touch `sqlx` row types directly.

use serde::ser::{Serialize, SerializeMap, Serializer};
use sqlx::any::AnyRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};
use type_mapping::{FromSqlValue, SqlValue, TypeMismatch};

/// One result row: column names in select order with their values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    columns: Vec<String>,
    values: Vec<SqlValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, column: impl Into<String>, value: SqlValue) {
        self.columns.push(column.into());
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Value of the first column with this name
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .position(|name| name == column)
            .map(|index| &self.values[index])
    }

    pub fn get_index(&self, index: usize) -> Option<&SqlValue> {
        self.values.get(index)
    }

    /// Typed lookup; `Ok(None)` when the column is absent
    pub fn get_as<T: FromSqlValue>(&self, column: &str) -> Result<Option<T>, TypeMismatch> {
        self.get(column)
            .map(|value| T::from_sql_value(value.clone()))
            .transpose()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub fn into_pairs(self) -> impl Iterator<Item = (String, SqlValue)> {
        self.columns.into_iter().zip(self.values)
    }

    /// Decode a driver row column by column
    pub fn from_row(row: &AnyRow) -> Result<Self, sqlx::Error> {
        let mut record = Record::with_capacity(row.len());
        for (index, column) in row.columns().iter().enumerate() {
            record.push(column.name(), decode_column(row, index)?);
        }
        Ok(record)
    }
}

fn decode_column(row: &AnyRow, index: usize) -> Result<SqlValue, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(SqlValue::Null);
    }

    let type_name = raw.type_info().name().to_string();
    let value = match type_name.as_str() {
        "NULL" => SqlValue::Null,
        "BOOLEAN" => SqlValue::Bool(row.try_get::<bool, _>(index)?),
        "SMALLINT" => SqlValue::Int(row.try_get::<i16, _>(index)? as i64),
        "INTEGER" => SqlValue::Int(row.try_get::<i32, _>(index)? as i64),
        "BIGINT" => SqlValue::Int(row.try_get::<i64, _>(index)?),
        "REAL" => SqlValue::Float(row.try_get::<f32, _>(index)? as f64),
        "DOUBLE" => SqlValue::Float(row.try_get::<f64, _>(index)?),
        "BLOB" => SqlValue::Bytes(row.try_get::<Vec<u8>, _>(index)?),
        _ => SqlValue::Text(row.try_get::<String, _>(index)?),
    };
    Ok(value)
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

impl FromIterator<(String, SqlValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, SqlValue)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (column, value) in iter {
            record.push(column, value);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        [
            ("id".to_string(), SqlValue::from("u1")),
            ("age".to_string(), SqlValue::Int(42)),
            ("bio".to_string(), SqlValue::Null),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_lookup_by_column() {
        let record = sample();
        assert_eq!(record.len(), 3);
        assert_eq!(record.get("age"), Some(&SqlValue::Int(42)));
        assert_eq!(record.get("missing"), None);
        assert_eq!(record.get_index(0), Some(&SqlValue::from("u1")));
    }

    #[test]
    fn test_typed_lookup() {
        let record = sample();
        assert_eq!(record.get_as::<i64>("age").unwrap(), Some(42));
        assert_eq!(record.get_as::<Option<String>>("bio").unwrap(), Some(None));
        assert!(record.get_as::<bool>("id").is_err());
    }

    #[test]
    fn test_serializes_as_map() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json, serde_json::json!({"id": "u1", "age": 42, "bio": null}));
    }
}
