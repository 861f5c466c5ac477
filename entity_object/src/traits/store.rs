//! Trait definitions
//!
//! This module defines the operations a repository offers for one entity type.

use super::entity::Entity;
use crate::errors::EntityError;
use crate::repository::FindOptions;
use async_trait::async_trait;
use std::fmt::Debug;
use type_mapping::SqlValue;

/// CRUD and filtered selects over a single table
#[async_trait]
pub trait EntityStore: Clone + Send + Sync + Debug {
    /// The entity type this store reads and writes
    type Model: Entity;

    /// Look an entity up by primary key
    async fn find<K>(&self, key: K) -> Result<Option<Self::Model>, EntityError>
    where
        K: Into<SqlValue> + Send;

    /// Select entities with an optional filter, ordering and limit
    async fn find_all(&self, options: FindOptions) -> Result<Vec<Self::Model>, EntityError>;

    /// Evaluate one aggregate expression, e.g. `count(*)`
    async fn find_number(
        &self,
        expr: &str,
        where_clause: Option<&str>,
        args: Vec<SqlValue>,
    ) -> Result<Option<SqlValue>, EntityError>;

    /// Insert the entity, filling unset fields from their defaults
    async fn save(&self, entity: &mut Self::Model) -> Result<u64, EntityError>;

    /// Write the entity's current values to the row with its key
    async fn update(&self, entity: &Self::Model) -> Result<u64, EntityError>;

    /// Delete the row with the entity's key
    async fn remove(&self, entity: &Self::Model) -> Result<u64, EntityError>;
}
