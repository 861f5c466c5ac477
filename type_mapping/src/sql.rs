//! SQL type conversion utilities
//!
//! This module maps Rust type names, as they appear in struct definitions,
//! to column kinds and DDL strings. The derive macro calls it at expansion time.

/// Column family a Rust field maps onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlKind {
    String,
    Boolean,
    Integer,
    Float,
    Text,
    Bytes,
}

impl SqlKind {
    /// DDL used when a field does not declare its own
    pub fn default_ddl(&self) -> &'static str {
        match self {
            SqlKind::String => "varchar(100)",
            SqlKind::Boolean => "boolean",
            SqlKind::Integer => "bigint",
            SqlKind::Float => "real",
            SqlKind::Text => "text",
            SqlKind::Bytes => "blob",
        }
    }
}

/// Strip whitespace so `Option < String >` and `Option<String>` compare equal
fn normalize(rust_type: &str) -> String {
    rust_type.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Check if a Rust type is Optional (nullable in SQL)
pub fn is_optional_type(rust_type: &str) -> bool {
    let normalized = normalize(rust_type);
    normalized.starts_with("Option<")
        || normalized.starts_with("std::option::Option<")
        || normalized.starts_with("::std::option::Option<")
}

/// `Option<T>` -> `T`, anything else unchanged (whitespace removed)
pub fn unwrap_optional_type(rust_type: &str) -> String {
    let normalized = normalize(rust_type);
    if is_optional_type(&normalized) {
        if let (Some(start), Some(end)) = (normalized.find('<'), normalized.rfind('>')) {
            return normalized[start + 1..end].to_string();
        }
    }
    normalized
}

/// Map a Rust type name to its column family, looking through `Option`
pub fn sql_kind_of(rust_type: &str) -> Option<SqlKind> {
    let inner = unwrap_optional_type(rust_type);
    let kind = match inner.as_str() {
        "String" | "std::string::String" => SqlKind::String,
        "Uuid" | "uuid::Uuid" => SqlKind::String,
        "DateTime<Utc>" | "chrono::DateTime<chrono::Utc>" => SqlKind::String,
        "bool" => SqlKind::Boolean,
        "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" => SqlKind::Integer,
        "f32" | "f64" => SqlKind::Float,
        "serde_json::Value" | "Value" => SqlKind::Text,
        "Vec<u8>" => SqlKind::Bytes,
        _ => return None,
    };
    Some(kind)
}

/// Map Rust type names to column DDL for table creation
pub fn rust_type_to_sql_type(rust_type: &str) -> Option<&'static str> {
    let inner = unwrap_optional_type(rust_type);
    match inner.as_str() {
        "Uuid" | "uuid::Uuid" => Some("varchar(36)"),
        "DateTime<Utc>" | "chrono::DateTime<chrono::Utc>" => Some("varchar(40)"),
        _ => sql_kind_of(&inner).map(|kind| kind.default_ddl()),
    }
}
