//! Identifier checks for table and column names
//!
//! Names are always quoted before they reach SQL text, so keywords, spaces and
//! punctuation are fine. Rejected are names no quoting rule can carry: empty
//! ones, ones past the server limit and ones with control characters.

use crate::dialect::Dialect;
use std::fmt;
use thiserror::Error;

/// Smallest identifier limit across the supported servers (PostgreSQL, in bytes)
pub const MAX_IDENTIFIER_LENGTH: usize = 63;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    Table,
    Column,
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierKind::Table => write!(f, "table"),
            IdentifierKind::Column => write!(f, "column"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} name cannot be empty")]
    Empty(IdentifierKind),

    #[error("{kind} name '{name}' is {length} bytes (max {max})", max = MAX_IDENTIFIER_LENGTH)]
    TooLong {
        kind: IdentifierKind,
        name: String,
        length: usize,
    },

    #[error("{kind} name {name:?} contains control characters")]
    ControlCharacter { kind: IdentifierKind, name: String },
}

/// A table or column name that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    kind: IdentifierKind,
    name: String,
}

impl Identifier {
    pub fn table(name: &str) -> Result<Self, ValidationError> {
        Self::new(IdentifierKind::Table, name)
    }

    pub fn column(name: &str) -> Result<Self, ValidationError> {
        Self::new(IdentifierKind::Column, name)
    }

    fn new(kind: IdentifierKind, name: &str) -> Result<Self, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::Empty(kind));
        }
        if name.len() > MAX_IDENTIFIER_LENGTH {
            return Err(ValidationError::TooLong {
                kind,
                name: name.to_string(),
                length: name.len(),
            });
        }
        if name.chars().any(char::is_control) {
            return Err(ValidationError::ControlCharacter {
                kind,
                name: name.to_string(),
            });
        }
        Ok(Self {
            kind,
            name: name.to_string(),
        })
    }

    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The name wrapped in the dialect's identifier quotes
    pub fn quoted(&self, dialect: Dialect) -> String {
        dialect.quote_identifier(&self.name)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_names_that_need_quoting() {
        let long = "a".repeat(MAX_IDENTIFIER_LENGTH);
        for name in ["users", "UserProfiles", "select", "created at", "a", &long] {
            assert!(Identifier::table(name).is_ok(), "{}", name);
        }

        let column = Identifier::column("order").unwrap();
        assert_eq!(column.kind(), IdentifierKind::Column);
        assert_eq!(column.quoted(Dialect::MySql), "`order`");
        assert_eq!(column.to_string(), "order");
    }

    #[test]
    fn test_rejections() {
        assert_eq!(
            Identifier::table(""),
            Err(ValidationError::Empty(IdentifierKind::Table))
        );
        assert!(matches!(
            Identifier::column("bad\0name"),
            Err(ValidationError::ControlCharacter { kind: IdentifierKind::Column, .. })
        ));
        assert!(Identifier::column("line\nbreak").is_err());

        let err = Identifier::table(&"a".repeat(64)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { length: 64, .. }));
        assert!(err.to_string().starts_with("table name"));
        assert!(err.to_string().ends_with("is 64 bytes (max 63)"));
    }
}
