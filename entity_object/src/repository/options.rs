use crate::errors::EntityError;
use type_mapping::SqlValue;

/// Row window for `find_all`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Count(i64),
    Range { offset: i64, count: i64 },
}

impl Limit {
    /// Accepts `[count]` or `[offset, count]`
    pub fn from_parts(parts: &[i64]) -> Result<Self, EntityError> {
        let limit = match *parts {
            [count] => Limit::Count(count),
            [offset, count] => Limit::Range { offset, count },
            _ => {
                return Err(EntityError::InvalidArgument(format!(
                    "Invalid limit value: {:?}",
                    parts
                )))
            }
        };
        limit.validate()?;
        Ok(limit)
    }

    pub fn validate(&self) -> Result<(), EntityError> {
        let negative = match *self {
            Limit::Count(count) => count < 0,
            Limit::Range { offset, count } => offset < 0 || count < 0,
        };
        if negative {
            return Err(EntityError::InvalidArgument(format!(
                "Invalid limit value: {:?}",
                self
            )));
        }
        Ok(())
    }
}

impl From<i64> for Limit {
    fn from(count: i64) -> Self {
        Limit::Count(count)
    }
}

impl From<(i64, i64)> for Limit {
    fn from((offset, count): (i64, i64)) -> Self {
        Limit::Range { offset, count }
    }
}

/// Filter, ordering and window for `find_all`
///
/// `where_clause` and `order_by` are inserted into the statement as written;
/// only `args` are bound. Never build them from untrusted input.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    pub where_clause: Option<String>,
    pub args: Vec<SqlValue>,
    pub order_by: Option<String>,
    pub limit: Option<Limit>,
}

impl FindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_where(mut self, clause: impl Into<String>, args: Vec<SqlValue>) -> Self {
        self.where_clause = Some(clause.into());
        self.args = args;
        self
    }

    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn with_limit(mut self, limit: impl Into<Limit>) -> Self {
        self.limit = Some(limit.into());
        self
    }
}
