//! Traits for database operations
//!
//! This module contains the traits that connect user types to the
//! data-access layer: [`Entity`] describes a mapped struct and
//! [`EntityStore`] the operations a repository offers for it.

pub mod entity;
pub mod store;

// Re-export all public items for convenience
pub use entity::Entity;
pub use store::EntityStore;
