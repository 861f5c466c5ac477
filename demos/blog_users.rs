//! Walkthrough of registration, CRUD and windowed selects
//!
//! Uses the configuration named by `ENTITYHAUS_CONFIG` when set, otherwise a
//! SQLite file in the system temp directory.
//!
//! ```bash
//! RUST_LOG=info cargo run --example blog_users
//! ```

use anyhow::{anyhow, Result};
use entityhaus::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn now() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

fn next_id() -> String {
    format!("{:015}{}", (now() * 1000.0) as u64, uuid::Uuid::new_v4().simple())
}

#[model]
#[entity(table = "users")]
pub struct User {
    #[field(primary_key, ddl = "varchar(50)", default = next_id)]
    pub id: Option<String>,

    #[field(ddl = "varchar(50)")]
    pub email: Option<String>,

    #[field(default = "")]
    pub name: Option<String>,

    #[field(default = "about:blank", ddl = "varchar(500)")]
    pub image: Option<String>,

    #[field(default = now)]
    pub created_at: Option<f64>,
}

#[model]
#[entity(table = "blogs")]
pub struct Blog {
    #[field(primary_key, ddl = "varchar(50)", default = next_id)]
    pub id: Option<String>,

    #[field(ddl = "varchar(50)")]
    pub user_id: Option<String>,

    #[field(ddl = "varchar(200)")]
    pub name: Option<String>,

    #[field(text)]
    pub content: Option<String>,

    #[field(default = now)]
    pub created_at: Option<f64>,
}

fn database_config() -> Result<DatabaseConfig> {
    if std::env::var_os("ENTITYHAUS_CONFIG").is_some() {
        return Ok(AppConfig::load()?.database);
    }
    let path = std::env::temp_dir().join("entityhaus_blog_users.db");
    Ok(DatabaseConfig::sqlite(path).with_pool_bounds(1, 5))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))?;

    let mut haus = EntityHaus::new(database_config()?).await?;
    haus.register_with_migration::<User>(true).await?;
    haus.register_with_migration::<Blog>(true).await?;
    haus.health_check().await?;

    let users = haus.repository::<User>()?;
    let blogs = haus.repository::<Blog>()?;

    let mut author = User {
        email: Some("ferris@example.com".to_string()),
        name: Some("Ferris".to_string()),
        ..Default::default()
    };
    users.save(&mut author).await?;
    let author_id = author.id.clone().ok_or_else(|| anyhow!("id was not defaulted"))?;
    info!("Saved {:?}", author);

    for n in 1..=5 {
        let mut blog = Blog {
            user_id: Some(author_id.clone()),
            name: Some(format!("Post #{}", n)),
            content: Some(format!("Body of post {}", n)),
            ..Default::default()
        };
        blogs.save(&mut blog).await?;
    }

    let page = blogs
        .find_all(
            FindOptions::new()
                .with_where("user_id=?", vec![author_id.clone().into()])
                .with_order_by("created_at desc")
                .with_limit((1i64, 2i64)),
        )
        .await?;
    for blog in &page {
        info!("Page entry: {}", blog.name.as_deref().unwrap_or_default());
    }

    let summary = haus
        .executor()
        .query(
            "select user_id, count(*) as posts from blogs group by user_id",
            &[],
            None,
        )
        .await?;
    info!("Summary: {}", serde_json::to_string(&summary)?);

    let total = blogs
        .find_number("count(id)", Some("user_id=?"), vec![author_id.clone().into()])
        .await?;
    info!("Blog count for {}: {:?}", author_id, total);

    author.name = Some("Ferris the Crab".to_string());
    users.update(&author).await?;
    if let Some(found) = users.find(author_id.as_str()).await? {
        info!("Updated name: {:?}", found.name);
    }

    for blog in blogs.find_all(FindOptions::new()).await? {
        blogs.remove(&blog).await?;
    }
    users.remove(&author).await?;

    haus.close().await;
    Ok(())
}
