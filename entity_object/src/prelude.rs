//! Convenience re-exports for common entity-object usage

// Core traits
pub use crate::traits::{Entity, EntityStore};

// Error types
pub use crate::errors::EntityError;

// Mapping and SQL generation
pub use crate::dialect::Dialect;
pub use crate::field::{FieldDefault, FieldDescriptor};
pub use crate::schema::EntitySchema;

// Execution
pub use crate::executor::{Executor, ExecutorTransaction};
pub use crate::pool::{ConnectionPool, ScopedConnection};
pub use crate::record::Record;
pub use crate::repository::{FindOptions, Limit, Repository};

// Validation
pub use crate::validation::{Identifier, IdentifierKind, ValidationError};

// Values
pub use type_mapping::{FromSqlValue, SqlValue};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
