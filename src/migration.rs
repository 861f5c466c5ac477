//! Database migration functionality
//!
//! This module provides table creation for registered entity types, using the
//! DDL their schemas derive from the declared field types.

use crate::core::EntityHaus;
use crate::errors::EntityHausError;
use entity_object::Entity;
use tracing::info;

impl EntityHaus {
    /// Create the table for a registered entity
    /// If recreate is true, drops existing table first
    pub async fn migrate<E: Entity>(&self, recreate: bool) -> Result<(), EntityHausError> {
        let schema = self.schema::<E>()?;

        // Drop table if recreate is requested
        if recreate {
            let drop_sql = schema.drop_table_sql();
            info!("Dropping table with SQL: {}", drop_sql);
            self.executor().execute(&drop_sql, &[], true).await?;
        }

        // Create the table
        let create_table_sql = schema.create_table_sql();
        info!("Creating table with SQL: {}", create_table_sql);
        self.executor().execute(&create_table_sql, &[], true).await?;

        Ok(())
    }

    /// Register an entity and create its table
    pub async fn register_with_migration<E: Entity>(
        &mut self,
        recreate: bool,
    ) -> Result<(), EntityHausError> {
        self.register::<E>()?;
        self.migrate::<E>(recreate).await
    }
}
