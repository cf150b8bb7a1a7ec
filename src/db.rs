use std::str::FromStr;

use anyhow::Context;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, SqlitePool};

use crate::config::Config;

pub async fn connect(config: &Config) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("invalid DATABASE_URL {}", config.database_url))?
        .create_if_missing(true)
        .foreign_keys(true);

    let db_pool = SqlitePoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect_with(options)
        .await
        .context("failed to open database")?;

    migrate(&db_pool).await?;
    Ok(db_pool)
}

/// Single-connection in-memory database with the schema applied.
///
/// The connection never idles out, otherwise the database would vanish with it.
pub async fn connect_in_memory() -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let db_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    migrate(&db_pool).await?;
    Ok(db_pool)
}

async fn migrate(db_pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(db_pool)
        .await
        .context("failed to run migrations")
}
