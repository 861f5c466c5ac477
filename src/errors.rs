//! Error types for the EntityHaus crate
//!
//! This module contains all error types that can be returned by EntityHaus operations.

use entity_object::EntityError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EntityHausError {
    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Entity already registered: {0}")]
    SchemaAlreadyRegistered(String),

    #[error("Entity not registered: {0}")]
    SchemaNotRegistered(String),
}

impl EntityHausError {
    /// Underlying data-access error, when there is one
    pub fn as_entity_error(&self) -> Option<&EntityError> {
        match self {
            EntityHausError::Entity(err) => Some(err),
            _ => None,
        }
    }
}
