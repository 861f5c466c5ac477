//! Integration tests for repository operations
//!
//! Covers save/find/update/remove on a SQLite database, default handling,
//! windowed selects and aggregate lookups.

mod common;

use common::{count_users, now, open_with_users, User};
use entityhaus::prelude::*;

#[tokio::test]
async fn test_save_fills_defaults_and_find_returns_them() {
    let db = open_with_users().await;
    let users = db.haus.repository::<User>().unwrap();

    let before = now();
    let mut user = User::with_id("test");
    let affected = users.save(&mut user).await.unwrap();
    assert_eq!(affected, 1);

    // Defaults are written back onto the saved entity
    assert_eq!(user.name.as_deref(), Some(""));
    let created_at = user.created_at.expect("created_at defaulted");
    assert!(created_at >= before);

    let found = users.find("test").await.unwrap().expect("saved user");
    assert_eq!(found.id.as_deref(), Some("test"));
    assert_eq!(found.name.as_deref(), Some(""));
    assert_eq!(found.created_at, Some(created_at));
}

#[tokio::test]
async fn test_explicit_values_win_over_defaults() {
    let db = open_with_users().await;
    let users = db.haus.repository::<User>().unwrap();

    let mut user = User {
        id: Some("fixed".to_string()),
        name: Some("Michael".to_string()),
        created_at: Some(1_000.5),
    };
    users.save(&mut user).await.unwrap();

    let found = users.find("fixed").await.unwrap().unwrap();
    assert_eq!(found.name.as_deref(), Some("Michael"));
    assert_eq!(found.created_at, Some(1_000.5));
}

#[tokio::test]
async fn test_find_missing_key_returns_none() {
    let db = open_with_users().await;
    let users = db.haus.repository::<User>().unwrap();

    assert!(users.find("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_changes_only_target_row() {
    let db = open_with_users().await;
    let users = db.haus.repository::<User>().unwrap();

    let mut alice = User::named("a", "Alice");
    let mut bob = User::named("b", "Bob");
    users.save(&mut alice).await.unwrap();
    users.save(&mut bob).await.unwrap();

    alice.name = Some("Alicia".to_string());
    assert_eq!(users.update(&alice).await.unwrap(), 1);

    let alice_row = users.find("a").await.unwrap().unwrap();
    let bob_row = users.find("b").await.unwrap().unwrap();
    assert_eq!(alice_row.name.as_deref(), Some("Alicia"));
    assert_eq!(alice_row.created_at, alice.created_at);
    assert_eq!(bob_row.name.as_deref(), Some("Bob"));
    assert_eq!(bob_row.created_at, bob.created_at);
}

#[tokio::test]
async fn test_update_of_missing_row_reports_zero() {
    let db = open_with_users().await;
    let users = db.haus.repository::<User>().unwrap();

    let ghost = User::named("ghost", "Nobody");
    assert_eq!(users.update(&ghost).await.unwrap(), 0);
    assert_eq!(count_users(&db.haus).await, 0);
}

#[tokio::test]
async fn test_remove_then_find_is_none() {
    let db = open_with_users().await;
    let users = db.haus.repository::<User>().unwrap();

    let mut user = User::named("gone", "Temp");
    users.save(&mut user).await.unwrap();
    assert_eq!(users.remove(&user).await.unwrap(), 1);

    assert!(users.find("gone").await.unwrap().is_none());
    assert_eq!(users.remove(&user).await.unwrap(), 0);
}

#[tokio::test]
async fn test_duplicate_key_save_fails() {
    let db = open_with_users().await;
    let users = db.haus.repository::<User>().unwrap();

    users.save(&mut User::named("dup", "First")).await.unwrap();
    let err = users.save(&mut User::named("dup", "Second")).await.unwrap_err();
    assert!(matches!(err, EntityError::DatabaseExecution { .. }));

    let kept = users.find("dup").await.unwrap().unwrap();
    assert_eq!(kept.name.as_deref(), Some("First"));
}

async fn seed(users: &Repository<User>, count: usize) {
    for i in 0..count {
        let mut user = User::named(&format!("u{}", i), &format!("user {}", i));
        users.save(&mut user).await.unwrap();
    }
}

#[tokio::test]
async fn test_find_all_with_offset_and_count() {
    let db = open_with_users().await;
    let users = db.haus.repository::<User>().unwrap();
    seed(&users, 6).await;

    let window = users
        .find_all(FindOptions::new().with_order_by("id").with_limit((2i64, 3i64)))
        .await
        .unwrap();
    let ids: Vec<_> = window.iter().filter_map(|u| u.id.as_deref()).collect();
    assert_eq!(ids, ["u2", "u3", "u4"]);

    let capped = users
        .find_all(FindOptions::new().with_limit(5i64))
        .await
        .unwrap();
    assert_eq!(capped.len(), 5);

    let all = users.find_all(FindOptions::new()).await.unwrap();
    assert_eq!(all.len(), 6);
}

#[tokio::test]
async fn test_find_all_limit_from_parts() {
    let db = open_with_users().await;
    let users = db.haus.repository::<User>().unwrap();
    seed(&users, 4).await;

    let limit = Limit::from_parts(&[3, 10]).unwrap();
    let tail = users
        .find_all(FindOptions::new().with_order_by("id").with_limit(limit))
        .await
        .unwrap();
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].id.as_deref(), Some("u3"));

    assert!(matches!(
        Limit::from_parts(&[1, 2, 3]),
        Err(EntityError::InvalidArgument(_))
    ));
    let negative = users
        .find_all(FindOptions::new().with_limit(-1i64))
        .await
        .unwrap_err();
    assert!(matches!(negative, EntityError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_find_all_with_where_clause() {
    let db = open_with_users().await;
    let users = db.haus.repository::<User>().unwrap();
    seed(&users, 5).await;

    let matched = users
        .find_all(
            FindOptions::new()
                .with_where("name=? or name=?", vec!["user 1".into(), "user 3".into()])
                .with_order_by("name desc"),
        )
        .await
        .unwrap();
    let ids: Vec<_> = matched.iter().filter_map(|u| u.id.as_deref()).collect();
    assert_eq!(ids, ["u3", "u1"]);

    let err = users
        .find_all(FindOptions::new().with_where("name=?", vec![]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EntityError::ArgumentMismatch {
            expected: 1,
            actual: 0
        }
    ));
}

#[tokio::test]
async fn test_find_number() {
    let db = open_with_users().await;
    let users = db.haus.repository::<User>().unwrap();

    assert_eq!(users.find_number("max(created_at)", None, vec![]).await.unwrap(), None);

    seed(&users, 3).await;
    let total = users.find_number("count(*)", None, vec![]).await.unwrap();
    assert_eq!(total.and_then(|v| v.as_i64()), Some(3));

    let filtered = users
        .find_number("count(id)", Some("name<>?"), vec!["user 0".into()])
        .await
        .unwrap();
    assert_eq!(filtered, Some(SqlValue::Int(2)));
}

#[tokio::test]
async fn test_row_with_wrong_type_reports_mismatch() {
    let db = open_with_users().await;
    let users = db.haus.repository::<User>().unwrap();

    db.haus
        .executor()
        .execute(
            "insert into users (id, name, created_at) values (?, ?, ?)",
            &[
                SqlValue::from("odd"),
                SqlValue::from("Odd"),
                SqlValue::from("yesterday"),
            ],
            true,
        )
        .await
        .unwrap();

    let err = users.find("odd").await.unwrap_err();
    assert!(matches!(err, EntityError::TypeMismatch { ref field, .. } if field == "created_at"));
}

#[model]
#[entity(table = "profiles")]
pub struct Profile {
    #[field(primary_key)]
    pub handle: String,

    #[field(name = "display_name", no_default)]
    pub display: Option<String>,

    #[field(text)]
    pub bio: Option<String>,

    pub visits: i64,

    #[field(skip)]
    pub scratch: Vec<String>,
}

#[tokio::test]
async fn test_renamed_columns_and_plain_fields() {
    let mut db = common::open(|config| config).await;
    db.haus.register_with_migration::<Profile>(false).await.unwrap();
    let profiles = db.haus.repository::<Profile>().unwrap();

    let schema = profiles.schema();
    assert_eq!(schema.column_for("display"), Some("display_name"));
    assert_eq!(schema.fields(), ["display", "bio", "visits"]);
    assert_eq!(schema.descriptor("bio").map(|d| d.sql_type()), Some("text"));

    let mut profile = Profile {
        handle: "ferris".to_string(),
        visits: 3,
        scratch: vec!["not stored".to_string()],
        ..Default::default()
    };
    profiles.save(&mut profile).await.unwrap();
    // No default declared, so it stays unset
    assert_eq!(profile.display, None);

    profile.display = Some("Ferris".to_string());
    profile.visits += 1;
    profiles.update(&profile).await.unwrap();

    let found = profiles.find("ferris").await.unwrap().unwrap();
    assert_eq!(found.display.as_deref(), Some("Ferris"));
    assert_eq!(found.bio, None);
    assert_eq!(found.visits, 4);
    assert!(found.scratch.is_empty());
}

#[model]
#[entity(table = "flags")]
pub struct Flag {
    #[field(primary_key)]
    pub id: String,

    pub admin: Option<bool>,

    pub score: Option<f64>,
}

#[tokio::test]
async fn test_boolean_fields_read_back() {
    let mut db = common::open(|config| config).await;
    db.haus.register_with_migration::<Flag>(true).await.unwrap();
    let flags = db.haus.repository::<Flag>().unwrap();

    let mut set = Flag {
        id: "a".to_string(),
        admin: Some(true),
        score: Some(2.5),
    };
    flags.save(&mut set).await.unwrap();

    let mut defaulted = Flag {
        id: "b".to_string(),
        ..Default::default()
    };
    flags.save(&mut defaulted).await.unwrap();
    assert_eq!(defaulted.admin, Some(false));

    let found = flags.find("a").await.unwrap().expect("saved flag");
    assert_eq!(found.admin, Some(true));
    assert_eq!(found.score, Some(2.5));

    let found = flags.find("b").await.unwrap().expect("saved flag");
    assert_eq!(found.admin, Some(false));
    assert_eq!(found.score, Some(0.0));

    let admins = flags
        .find_all(FindOptions::new().with_where("admin=?", vec![true.into()]))
        .await
        .unwrap();
    let ids: Vec<_> = admins.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, ["a"]);

    set.admin = Some(false);
    flags.update(&set).await.unwrap();
    let all = flags
        .find_all(FindOptions::new().with_order_by("id"))
        .await
        .unwrap();
    assert!(all.iter().all(|f| f.admin == Some(false)));
}
