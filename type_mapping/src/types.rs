//! Runtime value model
//!
//! Every argument bound to a statement and every column fetched from a row
//! travels as a [`SqlValue`].

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum SqlValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Short name of the variant, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            SqlValue::Null => "null",
            SqlValue::Bool(_) => "bool",
            SqlValue::Int(_) => "int",
            SqlValue::Float(_) => "float",
            SqlValue::Text(_) => "text",
            SqlValue::Bytes(_) => "bytes",
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::Int(i) => Some(*i),
            SqlValue::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SqlValue::Float(f) => Some(*f),
            SqlValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SqlValue::Bool(b) => Some(*b),
            SqlValue::Int(i) => Some(*i != 0),
            _ => None,
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => f.write_str("NULL"),
            SqlValue::Bool(b) => write!(f, "{}", b),
            SqlValue::Int(i) => write!(f, "{}", i),
            SqlValue::Float(v) => write!(f, "{}", v),
            SqlValue::Text(s) => write!(f, "'{}'", s),
            SqlValue::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl From<String> for SqlValue {
    fn from(val: String) -> Self {
        SqlValue::Text(val)
    }
}

impl From<&str> for SqlValue {
    fn from(val: &str) -> Self {
        SqlValue::Text(val.to_string())
    }
}

impl From<bool> for SqlValue {
    fn from(val: bool) -> Self {
        SqlValue::Bool(val)
    }
}

macro_rules! int_into_sql_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for SqlValue {
                fn from(val: $ty) -> Self {
                    SqlValue::Int(i64::from(val))
                }
            }
        )*
    };
}

int_into_sql_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for SqlValue {
    fn from(val: f32) -> Self {
        SqlValue::Float(f64::from(val))
    }
}

impl From<f64> for SqlValue {
    fn from(val: f64) -> Self {
        SqlValue::Float(val)
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(val: Vec<u8>) -> Self {
        SqlValue::Bytes(val)
    }
}

impl From<&[u8]> for SqlValue {
    fn from(val: &[u8]) -> Self {
        SqlValue::Bytes(val.to_vec())
    }
}

/// UUIDs are stored in their hyphenated text form
impl From<Uuid> for SqlValue {
    fn from(val: Uuid) -> Self {
        SqlValue::Text(val.hyphenated().to_string())
    }
}

/// Timestamps are stored as RFC 3339 text
impl From<chrono::DateTime<chrono::Utc>> for SqlValue {
    fn from(val: chrono::DateTime<chrono::Utc>) -> Self {
        SqlValue::Text(val.to_rfc3339())
    }
}

/// JSON documents are stored as their compact text encoding
impl From<serde_json::Value> for SqlValue {
    fn from(val: serde_json::Value) -> Self {
        match val {
            serde_json::Value::Null => SqlValue::Null,
            other => SqlValue::Text(other.to_string()),
        }
    }
}

impl<T> From<Option<T>> for SqlValue
where
    T: Into<SqlValue>,
{
    fn from(val: Option<T>) -> Self {
        match val {
            Some(v) => v.into(),
            None => SqlValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_widening() {
        assert_eq!(SqlValue::from(7u8), SqlValue::Int(7));
        assert_eq!(SqlValue::from(-3i32), SqlValue::Int(-3));
        assert_eq!(SqlValue::from(u32::MAX), SqlValue::Int(u32::MAX as i64));
    }

    #[test]
    fn test_option_maps_none_to_null() {
        assert_eq!(SqlValue::from(None::<String>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some("a")), SqlValue::Text("a".to_string()));
    }

    #[test]
    fn test_json_null_is_sql_null() {
        assert_eq!(SqlValue::from(serde_json::Value::Null), SqlValue::Null);
        assert_eq!(
            SqlValue::from(serde_json::json!({"a": 1})),
            SqlValue::Text("{\"a\":1}".to_string())
        );
    }

    #[test]
    fn test_untagged_serialization() {
        let values = vec![
            SqlValue::Null,
            SqlValue::Int(1),
            SqlValue::Text("x".to_string()),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, "[null,1,\"x\"]");
    }

    #[test]
    fn test_loose_accessors() {
        assert_eq!(SqlValue::Int(0).as_bool(), Some(false));
        assert_eq!(SqlValue::Int(2).as_f64(), Some(2.0));
        assert_eq!(SqlValue::Text("t".into()).as_i64(), None);
    }
}
