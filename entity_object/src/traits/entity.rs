//! The Entity trait
//!
//! Implemented by `#[derive(Entity)]` (or `#[model]`). Field access goes
//! through [`SqlValue`] so repositories can move values between structs and
//! statements without knowing the concrete field types.

use crate::dialect::Dialect;
use crate::errors::EntityError;
use crate::field::FieldDescriptor;
use crate::record::Record;
use crate::schema::EntitySchema;
use type_mapping::SqlValue;

/// A struct mapped onto one table
///
/// Recommended usage:
/// ```ignore
/// use entityhaus::prelude::*;
///
/// #[model]
/// #[entity(table = "users")]
/// pub struct User {
///     #[field(primary_key, ddl = "varchar(50)")]
///     pub id: Option<String>,
///
///     #[field(default = "")]
///     pub name: Option<String>,
///
///     #[field(default = now)]
///     pub created_at: Option<f64>,
/// }
/// ```
pub trait Entity: Default + Send + Sync + 'static {
    /// Type name, also the table name when none is declared
    fn entity_name() -> &'static str;

    fn table_name() -> Option<&'static str> {
        None
    }

    /// `(attribute, descriptor)` pairs in declaration order
    fn declared_fields() -> Vec<(&'static str, FieldDescriptor)>;

    /// Current value of an attribute; `None` when unset or unknown
    fn get_field(&self, attribute: &str) -> Option<SqlValue>;

    fn set_field(&mut self, attribute: &str, value: SqlValue) -> Result<(), EntityError>;

    fn build_schema(dialect: Dialect) -> Result<EntitySchema, EntityError> {
        EntitySchema::build(
            Self::entity_name(),
            Self::table_name(),
            Self::declared_fields(),
            dialect,
        )
    }

    /// Populate a fresh instance from a fetched row
    fn from_record(record: &Record, schema: &EntitySchema) -> Result<Self, EntityError> {
        let mut entity = Self::default();
        for (column, value) in record.iter() {
            let attribute = schema.attribute_for_column(column).unwrap_or(column);
            entity.set_field(attribute, value.clone())?;
        }
        Ok(entity)
    }
}
