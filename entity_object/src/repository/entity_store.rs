//! Repository operations
//!
//! Every statement comes from the schema's cached templates; the only SQL
//! assembled here is the optional where / order by / limit tail.

use super::core::Repository;
use super::options::FindOptions;
use crate::errors::EntityError;
use crate::traits::{Entity, EntityStore};
use async_trait::async_trait;
use type_mapping::SqlValue;

#[async_trait]
impl<E: Entity> EntityStore for Repository<E> {
    type Model = E;

    async fn find<K>(&self, key: K) -> Result<Option<E>, EntityError>
    where
        K: Into<SqlValue> + Send,
    {
        let args = [key.into()];
        let records = self
            .executor
            .query(self.schema.find_by_key_sql(), &args, Some(1))
            .await?;
        records
            .first()
            .map(|record| E::from_record(record, &self.schema))
            .transpose()
    }

    async fn find_all(&self, options: FindOptions) -> Result<Vec<E>, EntityError> {
        let FindOptions {
            where_clause,
            mut args,
            order_by,
            limit,
        } = options;

        let mut sql = self.schema.select_sql().to_string();
        if let Some(clause) = where_clause.filter(|c| !c.trim().is_empty()) {
            sql.push_str(" where ");
            sql.push_str(&clause);
        }
        if let Some(order) = order_by.filter(|o| !o.trim().is_empty()) {
            sql.push_str(" order by ");
            sql.push_str(&order);
        }
        if let Some(limit) = limit {
            limit.validate()?;
            let (clause, limit_args) = self.executor.dialect().limit_clause(limit);
            sql.push(' ');
            sql.push_str(clause);
            args.extend(limit_args);
        }

        let records = self.executor.query(&sql, &args, None).await?;
        self.to_entities(records)
    }

    async fn find_number(
        &self,
        expr: &str,
        where_clause: Option<&str>,
        args: Vec<SqlValue>,
    ) -> Result<Option<SqlValue>, EntityError> {
        let mut sql = format!(
            "select {} as _num_ from {}",
            expr,
            self.schema.quoted_table_name()
        );
        if let Some(clause) = where_clause.filter(|c| !c.trim().is_empty()) {
            sql.push_str(" where ");
            sql.push_str(clause);
        }

        let records = self.executor.query(&sql, &args, Some(1)).await?;
        Ok(records
            .into_iter()
            .next()
            .and_then(|record| record.get("_num_").cloned())
            .filter(|value| !value.is_null()))
    }

    async fn save(&self, entity: &mut E) -> Result<u64, EntityError> {
        let mut args = Vec::with_capacity(self.schema.fields().len() + 1);
        for attribute in self.schema.fields() {
            args.push(self.value_or_default(entity, attribute)?);
        }
        args.push(self.value_or_default(entity, self.schema.primary_key())?);

        let affected = self
            .executor
            .execute_default(self.schema.insert_sql(), &args)
            .await?;
        self.check_affected("insert", affected);
        Ok(affected)
    }

    async fn update(&self, entity: &E) -> Result<u64, EntityError> {
        let mut args: Vec<SqlValue> = self
            .schema
            .fields()
            .iter()
            .map(|attribute| Self::current_value(entity, attribute))
            .collect();
        args.push(Self::current_value(entity, self.schema.primary_key()));

        let affected = self
            .executor
            .execute_default(self.schema.update_sql(), &args)
            .await?;
        self.check_affected("update", affected);
        Ok(affected)
    }

    async fn remove(&self, entity: &E) -> Result<u64, EntityError> {
        let args = [Self::current_value(entity, self.schema.primary_key())];
        let affected = self
            .executor
            .execute_default(self.schema.delete_sql(), &args)
            .await?;
        self.check_affected("remove", affected);
        Ok(affected)
    }
}
