//! Bounded connection pool
//!
//! A thin wrapper over the `sqlx` Any pool that remembers which dialect it
//! speaks and the default transaction mode for statements run through it.

use crate::dialect::Dialect;
use crate::errors::EntityError;
use config::DatabaseConfig;
use sqlx::any::AnyPoolOptions;
use sqlx::{AnyConnection, AnyPool};
use sqlx::pool::PoolConnection;
use sqlx::Any;
use std::ops::{Deref, DerefMut};
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
pub struct ConnectionPool {
    inner: AnyPool,
    dialect: Dialect,
    autocommit: bool,
    max_connections: u32,
}

impl std::fmt::Debug for ConnectionPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionPool")
            .field("dialect", &self.dialect)
            .field("autocommit", &self.autocommit)
            .field("size", &self.size())
            .field("idle", &self.num_idle())
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// A checked-out connection; goes back to the pool when dropped
pub struct ScopedConnection {
    conn: PoolConnection<Any>,
}

impl ScopedConnection {
    pub fn as_connection(&mut self) -> &mut AnyConnection {
        &mut self.conn
    }
}

impl Deref for ScopedConnection {
    type Target = AnyConnection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl DerefMut for ScopedConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}

impl ConnectionPool {
    /// Open the pool, establishing `min_connections` up front
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, EntityError> {
        config.validate()?;
        sqlx::any::install_default_drivers();

        let optional = |seconds: u64| (seconds > 0).then(|| Duration::from_secs(seconds));
        let inner = AnyPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .idle_timeout(optional(config.idle_timeout_seconds))
            .max_lifetime(optional(config.max_lifetime_seconds))
            .connect(&config.connection_string())
            .await
            .map_err(EntityError::Connection)?;

        info!(
            "Connection pool ready: {} (min {}, max {})",
            config.redacted_connection_string(),
            config.min_connections,
            config.max_connections
        );

        Ok(Self {
            inner,
            dialect: Dialect::from(config.backend),
            autocommit: config.autocommit,
            max_connections: config.max_connections,
        })
    }

    /// Wait for a free connection
    pub async fn acquire(&self) -> Result<ScopedConnection, EntityError> {
        let conn = self.inner.acquire().await.map_err(EntityError::checkout)?;
        Ok(ScopedConnection { conn })
    }

    pub fn release(&self, conn: ScopedConnection) {
        drop(conn);
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn autocommit(&self) -> bool {
        self.autocommit
    }

    /// Open connections, idle or in use
    pub fn size(&self) -> u32 {
        self.inner.size()
    }

    pub fn num_idle(&self) -> usize {
        self.inner.num_idle()
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    pub async fn close(&self) {
        self.inner.close().await;
        info!("Connection pool closed");
    }

    pub fn inner(&self) -> &AnyPool {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sqlite_config(dir: &TempDir) -> DatabaseConfig {
        DatabaseConfig::sqlite(dir.path().join("pool.db")).with_pool_bounds(1, 2)
    }

    #[tokio::test]
    async fn test_connect_and_checkout() {
        let dir = TempDir::new().unwrap();
        let pool = ConnectionPool::connect(&sqlite_config(&dir)).await.unwrap();

        assert_eq!(pool.dialect(), Dialect::Sqlite);
        assert_eq!(pool.max_connections(), 2);

        let first = pool.acquire().await.unwrap();
        let second = pool.acquire().await.unwrap();
        assert!(pool.size() <= 2);

        pool.release(first);
        drop(second);
        let third = pool.acquire().await.unwrap();
        assert!(pool.size() <= 2);
        drop(third);

        pool.close().await;
        assert!(pool.is_closed());
    }

    #[tokio::test]
    async fn test_invalid_config_rejected_before_connecting() {
        let dir = TempDir::new().unwrap();
        let config = sqlite_config(&dir).with_pool_bounds(3, 1);

        let err = ConnectionPool::connect(&config).await.unwrap_err();
        assert!(matches!(err, EntityError::Config(_)));
    }
}
