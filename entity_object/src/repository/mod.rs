//! Repositories
//!
//! A [`Repository`] pairs the executor with one registered schema and turns
//! entity values into statement arguments and fetched rows back into entities.

pub mod core;
pub mod entity_store;
pub mod options;

pub use self::core::Repository;
pub use options::{FindOptions, Limit};
