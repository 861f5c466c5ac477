//! Conversions from fetched values back into Rust types
//!
//! Drivers do not agree on how they hand back booleans and numbers (SQLite
//! and MySQL report `boolean` columns as integers), so the conversions
//! accept the loose encodings a column of the target type can come back as.

use crate::types::SqlValue;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot convert {found} into {expected}")]
pub struct TypeMismatch {
    pub expected: &'static str,
    pub found: String,
}

impl TypeMismatch {
    pub fn new(expected: &'static str, found: &SqlValue) -> Self {
        Self {
            expected,
            found: format!("{} value {}", found.kind_name(), found),
        }
    }

    fn with_reason(expected: &'static str, found: &SqlValue, reason: impl std::fmt::Display) -> Self {
        Self {
            expected,
            found: format!("{} value {} ({})", found.kind_name(), found, reason),
        }
    }
}

/// Types that can be rebuilt from a fetched column value
pub trait FromSqlValue: Sized {
    fn from_sql_value(value: SqlValue) -> Result<Self, TypeMismatch>;
}

impl FromSqlValue for SqlValue {
    fn from_sql_value(value: SqlValue) -> Result<Self, TypeMismatch> {
        Ok(value)
    }
}

impl<T: FromSqlValue> FromSqlValue for Option<T> {
    fn from_sql_value(value: SqlValue) -> Result<Self, TypeMismatch> {
        match value {
            SqlValue::Null => Ok(None),
            other => T::from_sql_value(other).map(Some),
        }
    }
}

impl FromSqlValue for bool {
    fn from_sql_value(value: SqlValue) -> Result<Self, TypeMismatch> {
        value
            .as_bool()
            .ok_or_else(|| TypeMismatch::new("bool", &value))
    }
}

impl FromSqlValue for i64 {
    fn from_sql_value(value: SqlValue) -> Result<Self, TypeMismatch> {
        match value {
            SqlValue::Int(i) => Ok(i),
            SqlValue::Bool(b) => Ok(i64::from(b)),
            SqlValue::Float(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => Ok(f as i64),
            other => Err(TypeMismatch::new("i64", &other)),
        }
    }
}

macro_rules! narrow_int_from_sql_value {
    ($($ty:ty),*) => {
        $(
            impl FromSqlValue for $ty {
                fn from_sql_value(value: SqlValue) -> Result<Self, TypeMismatch> {
                    let wide = i64::from_sql_value(value.clone())
                        .map_err(|_| TypeMismatch::new(stringify!($ty), &value))?;
                    <$ty>::try_from(wide)
                        .map_err(|e| TypeMismatch::with_reason(stringify!($ty), &value, e))
                }
            }
        )*
    };
}

narrow_int_from_sql_value!(i8, i16, i32, u8, u16, u32);

impl FromSqlValue for f64 {
    fn from_sql_value(value: SqlValue) -> Result<Self, TypeMismatch> {
        value.as_f64().ok_or_else(|| TypeMismatch::new("f64", &value))
    }
}

impl FromSqlValue for f32 {
    fn from_sql_value(value: SqlValue) -> Result<Self, TypeMismatch> {
        value
            .as_f64()
            .map(|f| f as f32)
            .ok_or_else(|| TypeMismatch::new("f32", &value))
    }
}

impl FromSqlValue for String {
    fn from_sql_value(value: SqlValue) -> Result<Self, TypeMismatch> {
        match value {
            SqlValue::Text(s) => Ok(s),
            other => Err(TypeMismatch::new("String", &other)),
        }
    }
}

impl FromSqlValue for Vec<u8> {
    fn from_sql_value(value: SqlValue) -> Result<Self, TypeMismatch> {
        match value {
            SqlValue::Bytes(b) => Ok(b),
            SqlValue::Text(s) => Ok(s.into_bytes()),
            other => Err(TypeMismatch::new("Vec<u8>", &other)),
        }
    }
}

impl FromSqlValue for Uuid {
    fn from_sql_value(value: SqlValue) -> Result<Self, TypeMismatch> {
        match &value {
            SqlValue::Text(s) => {
                Uuid::parse_str(s).map_err(|e| TypeMismatch::with_reason("Uuid", &value, e))
            }
            SqlValue::Bytes(b) => {
                Uuid::from_slice(b).map_err(|e| TypeMismatch::with_reason("Uuid", &value, e))
            }
            _ => Err(TypeMismatch::new("Uuid", &value)),
        }
    }
}

impl FromSqlValue for chrono::DateTime<chrono::Utc> {
    fn from_sql_value(value: SqlValue) -> Result<Self, TypeMismatch> {
        let SqlValue::Text(s) = &value else {
            return Err(TypeMismatch::new("DateTime<Utc>", &value));
        };
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&chrono::Utc));
        }
        // MySQL DATETIME / SQLite CURRENT_TIMESTAMP rendering
        chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|e| TypeMismatch::with_reason("DateTime<Utc>", &value, e))
    }
}

impl FromSqlValue for serde_json::Value {
    fn from_sql_value(value: SqlValue) -> Result<Self, TypeMismatch> {
        match &value {
            SqlValue::Null => Ok(serde_json::Value::Null),
            SqlValue::Text(s) => serde_json::from_str(s)
                .map_err(|e| TypeMismatch::with_reason("serde_json::Value", &value, e)),
            SqlValue::Bool(b) => Ok(serde_json::Value::Bool(*b)),
            SqlValue::Int(i) => Ok(serde_json::Value::from(*i)),
            SqlValue::Float(f) => Ok(serde_json::Value::from(*f)),
            SqlValue::Bytes(_) => Err(TypeMismatch::new("serde_json::Value", &value)),
        }
    }
}
