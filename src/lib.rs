//! # EntityHaus
//!
//! An async data-access layer for MySQL, PostgreSQL and SQLite: a bounded
//! connection pool, a parameterized statement executor, and declarative
//! entity-to-table mapping with generated CRUD statements.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use entityhaus::prelude::*;
//!
//! fn now() -> f64 {
//!     chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
//! }
//!
//! #[model]
//! #[entity(table = "users")]
//! pub struct User {
//!     #[field(primary_key, ddl = "varchar(50)")]
//!     pub id: Option<String>,
//!
//!     #[field(default = "")]
//!     pub name: Option<String>,
//!
//!     #[field(default = now)]
//!     pub created_at: Option<f64>,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::sqlite("app.db").with_pool_bounds(1, 5);
//!
//!     let mut haus = EntityHaus::new(config).await?;
//!     haus.register_with_migration::<User>(false).await?;
//!
//!     let users = haus.repository::<User>()?;
//!
//!     let mut user = User {
//!         id: Some("u-1".to_string()),
//!         name: Some("John Doe".to_string()),
//!         ..Default::default()
//!     };
//!     users.save(&mut user).await?;
//!
//!     let found = users.find("u-1").await?;
//!     println!("Found user: {:?}", found);
//!
//!     haus.close().await;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod errors;
pub mod migration;
pub mod prelude;

// Re-export the main public types for convenience
pub use self::core::EntityHaus;
pub use errors::EntityHausError;

// Re-export centralized config
pub use config::{AppConfig, Backend, DatabaseConfig};

// Re-export internal crates used by macros and public API
// These MUST be public for the generated macro code to work correctly
pub use entity_derive;
pub use entity_object;
pub use type_mapping;

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
