//! Shared fixtures for the integration tests
//!
//! Every test gets its own SQLite file inside a temporary directory, so tests
//! can run in parallel without sharing state.

#![allow(dead_code)]

use entityhaus::prelude::*;
use tempfile::TempDir;

pub fn now() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

#[model]
#[entity(table = "users")]
pub struct User {
    #[field(primary_key, ddl = "varchar(50)")]
    pub id: Option<String>,

    #[field(default = "")]
    pub name: Option<String>,

    #[field(default = now)]
    pub created_at: Option<f64>,
}

impl User {
    pub fn with_id(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            ..Default::default()
        }
    }

    pub fn named(id: &str, name: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            ..Default::default()
        }
    }
}

pub struct TestDb {
    // Keeps the database file alive for the duration of the test
    pub dir: TempDir,
    pub haus: EntityHaus,
}

pub fn sqlite_config(dir: &TempDir) -> DatabaseConfig {
    DatabaseConfig::sqlite(dir.path().join("test.db"))
}

pub async fn open(config: impl FnOnce(DatabaseConfig) -> DatabaseConfig) -> TestDb {
    let dir = TempDir::new().unwrap();
    let haus = EntityHaus::new(config(sqlite_config(&dir))).await.unwrap();
    TestDb { dir, haus }
}

/// Database with the `users` table registered and created
pub async fn open_with_users() -> TestDb {
    let mut db = open(|config| config.with_pool_bounds(1, 4)).await;
    db.haus.register_with_migration::<User>(true).await.unwrap();
    db
}

pub async fn count_users(haus: &EntityHaus) -> i64 {
    let records = haus
        .executor()
        .query("select count(*) as n from users", &[], None)
        .await
        .unwrap();
    records[0].get_as::<i64>("n").unwrap().unwrap()
}
