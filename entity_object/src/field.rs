//! Field descriptors
//!
//! A [`FieldDescriptor`] holds the mapping metadata of one column. It is a
//! plain value: the schema builder is the one that checks descriptors
//! against each other.

use std::fmt;
use std::sync::Arc;
use type_mapping::SqlValue;

/// Produces a fresh default each time it is called
pub type DefaultFn = Arc<dyn Fn() -> SqlValue + Send + Sync>;

/// What to bind for a field the entity has no value for
#[derive(Clone, Default)]
pub enum FieldDefault {
    #[default]
    None,
    Value(SqlValue),
    Factory(DefaultFn),
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDefault::None => f.write_str("None"),
            FieldDefault::Value(value) => f.debug_tuple("Value").field(value).finish(),
            FieldDefault::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: String,
    sql_type: String,
    primary_key: bool,
    default: FieldDefault,
}

impl FieldDescriptor {
    pub fn new(sql_type: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            sql_type: sql_type.into(),
            primary_key: false,
            default: FieldDefault::None,
        }
    }

    /// `varchar(100)`, no default
    pub fn string() -> Self {
        Self::new("varchar(100)")
    }

    /// `boolean`, defaults to false
    pub fn boolean() -> Self {
        Self::new("boolean").with_default(false)
    }

    /// `bigint`, defaults to 0
    pub fn integer() -> Self {
        Self::new("bigint").with_default(0i64)
    }

    /// `real`, defaults to 0.0
    pub fn float() -> Self {
        Self::new("real").with_default(0.0f64)
    }

    /// `text`, no default
    pub fn text() -> Self {
        Self::new("text")
    }

    pub fn bytes() -> Self {
        Self::new("blob")
    }

    /// Column name; leave unset to use the declaring attribute's name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn ddl(mut self, sql_type: impl Into<String>) -> Self {
        self.sql_type = sql_type.into();
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<SqlValue>) -> Self {
        self.default = FieldDefault::Value(value.into());
        self
    }

    pub fn with_default_fn<F, V>(mut self, factory: F) -> Self
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<SqlValue>,
    {
        self.default = FieldDefault::Factory(Arc::new(move || factory().into()));
        self
    }

    pub fn without_default(mut self) -> Self {
        self.default = FieldDefault::None;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sql_type(&self) -> &str {
        &self.sql_type
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn default_policy(&self) -> &FieldDefault {
        &self.default
    }

    pub fn has_default(&self) -> bool {
        !matches!(self.default, FieldDefault::None)
    }

    pub fn column_name<'a>(&'a self, attribute: &'a str) -> &'a str {
        if self.name.is_empty() {
            attribute
        } else {
            &self.name
        }
    }

    /// The default value, computed now for factory defaults
    pub fn resolve_default(&self) -> Option<SqlValue> {
        match &self.default {
            FieldDefault::None => None,
            FieldDefault::Value(value) => Some(value.clone()),
            FieldDefault::Factory(factory) => Some(factory()),
        }
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}:{}", self.sql_type, self.name)?;
        if self.primary_key {
            f.write_str(", primary key")?;
        }
        f.write_str(">")
    }
}
