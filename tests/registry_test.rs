//! Integration tests for entity registration and migration

mod common;

use common::{open, User};
use entityhaus::prelude::*;

#[model]
pub struct Orphan {
    pub label: Option<String>,
}

#[model]
pub struct TwoKeys {
    #[field(primary_key)]
    pub left: i64,
    #[field(primary_key)]
    pub right: i64,
}

#[tokio::test]
async fn test_registration_is_one_shot() {
    let mut db = open(|config| config).await;

    let schema = db.haus.register::<User>().unwrap();
    assert_eq!(schema.table_name(), "users");
    assert!(db.haus.is_registered::<User>());

    let err = db.haus.register::<User>().unwrap_err();
    assert!(matches!(err, EntityHausError::SchemaAlreadyRegistered(ref name) if name == "User"));

    // The first schema stays in place
    let stored = db.haus.schema::<User>().unwrap();
    assert!(std::sync::Arc::ptr_eq(&schema, &stored));
    assert_eq!(db.haus.registered_entities(), ["User"]);
}

#[tokio::test]
async fn test_repository_requires_registration() {
    let db = open(|config| config).await;

    let err = db.haus.repository::<User>().unwrap_err();
    assert!(matches!(err, EntityHausError::SchemaNotRegistered(ref name) if name == "User"));
    assert!(db.haus.registered_entities().is_empty());
}

#[tokio::test]
async fn test_primary_key_rules_enforced_at_registration() {
    let mut db = open(|config| config).await;

    let err = db.haus.register::<Orphan>().unwrap_err();
    let entity_err = err.as_entity_error().expect("schema error");
    assert!(entity_err.is_schema());
    assert!(entity_err.to_string().contains("Primary key not found"));

    let err = db.haus.register::<TwoKeys>().unwrap_err();
    assert!(err.to_string().contains("Duplicate primary key for field: right"));

    assert!(!db.haus.is_registered::<Orphan>());
    assert!(!db.haus.is_registered::<TwoKeys>());
}

#[tokio::test]
async fn test_registered_templates() {
    let mut db = open(|config| config).await;
    let schema = db.haus.register::<User>().unwrap();

    assert_eq!(schema.dialect(), Dialect::Sqlite);
    assert_eq!(schema.entity_name(), "User");
    assert_eq!(schema.primary_key(), "id");
    assert_eq!(
        schema.select_sql(),
        "select \"id\", \"name\", \"created_at\" from \"users\""
    );
    assert_eq!(
        schema.insert_sql(),
        "insert into \"users\" (\"name\", \"created_at\", \"id\") values (?, ?, ?)"
    );
    assert_eq!(
        schema.create_table_sql(),
        "create table if not exists \"users\" (\"id\" varchar(50) not null, \
         \"name\" varchar(100), \"created_at\" real, primary key (\"id\"))"
    );
}

#[tokio::test]
async fn test_migrate_recreate_drops_rows() {
    let mut db = open(|config| config).await;
    db.haus.register_with_migration::<User>(false).await.unwrap();
    let users = db.haus.repository::<User>().unwrap();

    users.save(&mut User::named("keep", "Kept")).await.unwrap();

    // Creating again without recreate is a no-op
    db.haus.migrate::<User>(false).await.unwrap();
    assert!(users.find("keep").await.unwrap().is_some());

    db.haus.migrate::<User>(true).await.unwrap();
    assert!(users.find("keep").await.unwrap().is_none());
}

#[tokio::test]
async fn test_migrate_requires_registration() {
    let db = open(|config| config).await;
    let err = db.haus.migrate::<User>(false).await.unwrap_err();
    assert!(matches!(err, EntityHausError::SchemaNotRegistered(_)));
}
