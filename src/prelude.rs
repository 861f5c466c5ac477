//! Convenience re-exports for common EntityHaus usage
//!
//! This prelude module re-exports the most commonly used items from the EntityHaus ecosystem,
//! making it easier to import everything you need with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use entityhaus::prelude::*;
//!
//! // Now you have access to all the common EntityHaus types and traits
//! ```

// Core EntityHaus components
pub use crate::core::EntityHaus;
pub use crate::errors::EntityHausError;
pub use crate::migration;

// Re-export centralized config
pub use config::{AppConfig, Backend, DatabaseConfig};

// Re-export commonly used entity-object types for convenience
pub use entity_object::prelude::*;

// Re-export entity_object module for macro-generated code
pub use entity_object;

// Re-export entity derive for model creation
pub use entity_derive::{model, Entity};

// Common external dependencies
pub use anyhow;
pub use async_trait;
pub use sqlx;
pub use tokio;
