//! Entity Object - Core data-access layer for EntityHaus
//!
//! This crate provides the field descriptors and schema builder that derive SQL
//! from entity declarations, the bounded connection pool, the statement
//! executor, and the repository operations built on top of them.

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod dialect;
pub mod errors;
pub mod executor;
pub mod field;
pub mod pool;
pub mod prelude;
pub mod record;
pub mod repository;
pub mod schema;
pub mod traits;
pub mod validation;

pub use dialect::Dialect;
pub use errors::EntityError;
pub use executor::{Executor, ExecutorTransaction};
pub use field::{FieldDefault, FieldDescriptor};
pub use pool::{ConnectionPool, ScopedConnection};
pub use record::Record;
pub use repository::{FindOptions, Limit, Repository};
pub use schema::EntitySchema;
pub use traits::*;
pub use validation::{Identifier, IdentifierKind, ValidationError};

pub use type_mapping::{FromSqlValue, SqlValue, TypeMismatch};
