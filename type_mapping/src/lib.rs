//! Unified value mapping between Rust types and SQL columns
//! This crate provides the value model and conversions used across the entityhaus ecosystem

pub mod convert;
pub mod sql;
pub mod types;

pub use convert::{FromSqlValue, TypeMismatch};
pub use sql::{is_optional_type, rust_type_to_sql_type, sql_kind_of, unwrap_optional_type, SqlKind};
pub use types::SqlValue;
