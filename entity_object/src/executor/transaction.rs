//! Transaction support for Executor
//!
//! This module lets several statements share one connection and commit or
//! roll back together.

use super::core::{prepare, run_execute, run_query};
use super::Executor;
use crate::dialect::Dialect;
use crate::errors::EntityError;
use crate::record::Record;
use sqlx::{Any, Transaction};
use tracing::info;
use type_mapping::SqlValue;

/// An open transaction on one checked-out connection
///
/// Dropping it without calling [`commit`](Self::commit) rolls back.
///
/// # Example
/// ```ignore
/// let mut tx = executor.begin().await?;
/// tx.execute("update accounts set balance=balance-? where id=?", &[100.into(), "a".into()]).await?;
/// tx.execute("update accounts set balance=balance+? where id=?", &[100.into(), "b".into()]).await?;
/// tx.commit().await?;
/// ```
pub struct ExecutorTransaction {
    tx: Transaction<'static, Any>,
    dialect: Dialect,
}

impl Executor {
    /// Begin a new database transaction
    pub async fn begin(&self) -> Result<ExecutorTransaction, EntityError> {
        let tx = self
            .pool()
            .inner()
            .begin()
            .await
            .map_err(EntityError::checkout)?;
        Ok(ExecutorTransaction {
            tx,
            dialect: self.dialect(),
        })
    }
}

impl ExecutorTransaction {
    pub async fn query(
        &mut self,
        sql: &str,
        args: &[SqlValue],
        limit: Option<usize>,
    ) -> Result<Vec<Record>, EntityError> {
        let native = prepare(self.dialect, sql, args)?;
        debug_log!("SQL (tx): {} ARGS: {:?}", native, args);
        run_query(&mut self.tx, &native, args, limit).await
    }

    pub async fn execute(&mut self, sql: &str, args: &[SqlValue]) -> Result<u64, EntityError> {
        let native = prepare(self.dialect, sql, args)?;
        debug_log!("SQL (tx): {} ARGS: {:?}", native, args);
        run_execute(&mut self.tx, &native, args).await
    }

    /// Commit the transaction
    pub async fn commit(self) -> Result<(), EntityError> {
        self.tx
            .commit()
            .await
            .map_err(|e| EntityError::query_execution("commit", e))?;
        info!("transaction committed");
        Ok(())
    }

    /// Rollback the transaction
    pub async fn rollback(self) -> Result<(), EntityError> {
        self.tx
            .rollback()
            .await
            .map_err(|e| EntityError::query_execution("rollback", e))?;
        info!("transaction rolled back");
        Ok(())
    }

    /// Get a mutable reference to the underlying transaction
    pub fn as_mut(&mut self) -> &mut Transaction<'static, Any> {
        &mut self.tx
    }
}
