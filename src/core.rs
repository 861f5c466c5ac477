//! Core EntityHaus functionality
//!
//! This module contains the main EntityHaus struct: it owns the connection
//! pool, the executor built on it, and the registry of entity schemas.

use entity_object::{ConnectionPool, Entity, EntitySchema, Executor, Repository};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::errors::EntityHausError;
use config::{AppConfig, DatabaseConfig};

/// Main EntityHaus coordinator that manages the database connection and entity schemas
pub struct EntityHaus {
    executor: Executor,
    schemas: HashMap<TypeId, Arc<EntitySchema>>,
}

impl std::fmt::Debug for EntityHaus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityHaus")
            .field("pool", self.executor.pool())
            .field("entities", &self.registered_entities())
            .finish()
    }
}

impl EntityHaus {
    /// Create new EntityHaus with database connection
    pub async fn new(config: DatabaseConfig) -> Result<Self, EntityHausError> {
        let pool = ConnectionPool::connect(&config).await?;
        Ok(Self::from_pool(pool))
    }

    /// Connect using the configuration file named by the environment
    pub async fn from_env() -> Result<Self, EntityHausError> {
        let config = AppConfig::load()?;
        Self::new(config.database).await
    }

    pub fn from_pool(pool: ConnectionPool) -> Self {
        Self {
            executor: Executor::new(pool),
            schemas: HashMap::new(),
        }
    }

    /// Get database pool reference
    pub fn pool(&self) -> &ConnectionPool {
        self.executor.pool()
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Build and store the schema for an entity type
    ///
    /// Each type registers once; a second call fails without touching the
    /// stored schema.
    pub fn register<E: Entity>(&mut self) -> Result<Arc<EntitySchema>, EntityHausError> {
        let type_id = TypeId::of::<E>();
        if self.schemas.contains_key(&type_id) {
            return Err(EntityHausError::SchemaAlreadyRegistered(
                E::entity_name().to_string(),
            ));
        }

        let schema = Arc::new(E::build_schema(self.executor.dialect())?);
        self.schemas.insert(type_id, Arc::clone(&schema));
        info!(
            "Registered entity {} on table {}",
            schema.entity_name(),
            schema.table_name()
        );
        Ok(schema)
    }

    pub fn schema<E: Entity>(&self) -> Result<Arc<EntitySchema>, EntityHausError> {
        self.schemas
            .get(&TypeId::of::<E>())
            .cloned()
            .ok_or_else(|| EntityHausError::SchemaNotRegistered(E::entity_name().to_string()))
    }

    /// Repository for a registered entity type
    pub fn repository<E: Entity>(&self) -> Result<Repository<E>, EntityHausError> {
        let schema = self.schema::<E>()?;
        Ok(Repository::new(self.executor.clone(), schema))
    }

    pub fn is_registered<E: Entity>(&self) -> bool {
        self.schemas.contains_key(&TypeId::of::<E>())
    }

    /// List all registered entity names
    pub fn registered_entities(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .schemas
            .values()
            .map(|schema| schema.entity_name())
            .collect();
        names.sort_unstable();
        names
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), EntityHausError> {
        self.executor.query("select 1", &[], Some(1)).await?;
        Ok(())
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.executor.pool().close().await;
    }
}
