use crate::errors::EntityError;
use crate::executor::Executor;
use crate::record::Record;
use crate::schema::EntitySchema;
use crate::traits::Entity;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::warn;
use type_mapping::SqlValue;

/// Repository for one registered entity type
pub struct Repository<E: Entity> {
    pub(crate) executor: Executor,
    pub(crate) schema: Arc<EntitySchema>,
    pub(crate) _phantom: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
            schema: Arc::clone(&self.schema),
            _phantom: PhantomData,
        }
    }
}

impl<E: Entity> std::fmt::Debug for Repository<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("entity", &self.schema.entity_name())
            .field("table", &self.schema.table_name())
            .field("dialect", &self.executor.dialect())
            .finish()
    }
}

impl<E: Entity> Repository<E> {
    pub fn new(executor: Executor, schema: Arc<EntitySchema>) -> Self {
        Self {
            executor,
            schema,
            _phantom: PhantomData,
        }
    }

    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    pub(crate) fn to_entities(&self, records: Vec<Record>) -> Result<Vec<E>, EntityError> {
        trace_log!("mapping {} rows into {}", records.len(), self.schema.entity_name());
        records
            .iter()
            .map(|record| E::from_record(record, &self.schema))
            .collect()
    }

    /// Current value; Null when unset
    pub(crate) fn current_value(entity: &E, attribute: &str) -> SqlValue {
        entity
            .get_field(attribute)
            .filter(|value| !value.is_null())
            .unwrap_or(SqlValue::Null)
    }

    /// Current value, or the declared default written back onto the entity
    pub(crate) fn value_or_default(
        &self,
        entity: &mut E,
        attribute: &str,
    ) -> Result<SqlValue, EntityError> {
        if let Some(value) = entity.get_field(attribute).filter(|value| !value.is_null()) {
            return Ok(value);
        }

        let default = self
            .schema
            .descriptor(attribute)
            .and_then(|descriptor| descriptor.resolve_default());
        match default {
            Some(value) => {
                debug_log!("using default value for {}: {}", attribute, value);
                entity.set_field(attribute, value.clone())?;
                Ok(value)
            }
            None => Ok(SqlValue::Null),
        }
    }

    pub(crate) fn check_affected(&self, operation: &str, affected: u64) {
        if affected != 1 {
            warn!(
                "failed to {} {} record: affected rows: {}",
                operation,
                self.schema.entity_name(),
                affected
            );
        }
    }
}
