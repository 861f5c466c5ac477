use crate::dialect::Dialect;
use crate::errors::EntityError;
use crate::pool::ConnectionPool;
use crate::record::Record;
use futures::TryStreamExt;
use sqlx::any::AnyArguments;
use sqlx::query::Query;
use sqlx::{Any, AnyConnection, Connection};
use std::borrow::Cow;
use tracing::{info, warn};
use type_mapping::SqlValue;

/// Runs parameterized statements against a [`ConnectionPool`]
#[derive(Clone, Debug)]
pub struct Executor {
    pool: ConnectionPool,
}

impl Executor {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    pub fn dialect(&self) -> Dialect {
        self.pool.dialect()
    }

    /// Run a select and collect at most `limit` rows (all rows when `None`)
    pub async fn query(
        &self,
        sql: &str,
        args: &[SqlValue],
        limit: Option<usize>,
    ) -> Result<Vec<Record>, EntityError> {
        let native = prepare(self.dialect(), sql, args)?;
        debug_log!("SQL: {} ARGS: {:?}", native, args);

        let mut conn = self.pool.acquire().await?;
        let records = run_query(conn.as_connection(), &native, args, limit).await?;
        info!("rows returned: {}", records.len());
        Ok(records)
    }

    /// Run a mutating statement and return the affected row count
    ///
    /// With `autocommit` off the statement runs inside its own transaction,
    /// committed on success and rolled back on any failure.
    pub async fn execute(
        &self,
        sql: &str,
        args: &[SqlValue],
        autocommit: bool,
    ) -> Result<u64, EntityError> {
        let native = prepare(self.dialect(), sql, args)?;
        debug_log!("SQL: {} ARGS: {:?} autocommit={}", native, args, autocommit);

        let mut conn = self.pool.acquire().await?;
        let affected = if autocommit {
            run_execute(conn.as_connection(), &native, args).await?
        } else {
            let mut tx = conn
                .as_connection()
                .begin()
                .await
                .map_err(|e| EntityError::query_execution("begin", e))?;
            match run_execute(&mut *tx, &native, args).await {
                Ok(affected) => {
                    tx.commit()
                        .await
                        .map_err(|e| EntityError::query_execution("commit", e))?;
                    affected
                }
                Err(err) => {
                    if let Err(rollback_err) = tx.rollback().await {
                        warn!("Rollback after failed statement also failed: {}", rollback_err);
                    }
                    return Err(err);
                }
            }
        };

        info!("rows affected: {}", affected);
        Ok(affected)
    }

    /// `execute` using the pool's configured autocommit mode
    pub async fn execute_default(&self, sql: &str, args: &[SqlValue]) -> Result<u64, EntityError> {
        self.execute(sql, args, self.pool.autocommit()).await
    }
}

/// Check the argument count and rewrite placeholders for the dialect
pub(crate) fn prepare<'s>(
    dialect: Dialect,
    sql: &'s str,
    args: &[SqlValue],
) -> Result<Cow<'s, str>, EntityError> {
    let expected = dialect.count_placeholders(sql);
    if expected != args.len() {
        return Err(EntityError::ArgumentMismatch {
            expected,
            actual: args.len(),
        });
    }
    Ok(dialect.translate_placeholders(sql))
}

pub(crate) fn bind_args<'q>(
    mut query: Query<'q, Any, AnyArguments<'q>>,
    args: &'q [SqlValue],
) -> Query<'q, Any, AnyArguments<'q>> {
    for arg in args {
        query = match arg {
            SqlValue::Null => query.bind(Option::<String>::None),
            SqlValue::Bool(b) => query.bind(*b),
            SqlValue::Int(i) => query.bind(*i),
            SqlValue::Float(f) => query.bind(*f),
            SqlValue::Text(s) => query.bind(s.as_str()),
            SqlValue::Bytes(b) => query.bind(b.as_slice()),
        };
    }
    query
}

pub(crate) async fn run_query(
    conn: &mut AnyConnection,
    sql: &str,
    args: &[SqlValue],
    limit: Option<usize>,
) -> Result<Vec<Record>, EntityError> {
    let query = bind_args(sqlx::query(sql), args);
    let decode = |row: &sqlx::any::AnyRow| {
        Record::from_row(row).map_err(|e| EntityError::query_execution(sql, e))
    };

    match limit {
        None => {
            let rows = query
                .fetch_all(conn)
                .await
                .map_err(|e| EntityError::query_execution(sql, e))?;
            rows.iter().map(decode).collect()
        }
        Some(limit) => {
            let mut records = Vec::new();
            let mut rows = query.fetch(conn);
            while records.len() < limit {
                match rows
                    .try_next()
                    .await
                    .map_err(|e| EntityError::query_execution(sql, e))?
                {
                    Some(row) => records.push(decode(&row)?),
                    None => break,
                }
            }
            Ok(records)
        }
    }
}

pub(crate) async fn run_execute(
    conn: &mut AnyConnection,
    sql: &str,
    args: &[SqlValue],
) -> Result<u64, EntityError> {
    let result = bind_args(sqlx::query(sql), args)
        .execute(conn)
        .await
        .map_err(|e| EntityError::query_execution(sql, e))?;
    Ok(result.rows_affected())
}
