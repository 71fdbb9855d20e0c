use anyhow::{Context, Result};
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{Sqlite, SqlitePoolOptions};
use sqlx::Pool;

/// Creates the database if it doesn't exist yet, connects a pool and brings
/// the schema up to date.
pub async fn init_db_connection(database_url: &str, max_connections: u32) -> Result<Pool<Sqlite>> {
    // verify db exists
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        tracing::warn!(database_url, "database not found, creating");
        Sqlite::create_database(database_url)
            .await
            .with_context(|| format!("Unable to create database at {}", database_url))?;
        tracing::info!(database_url, "created database");
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .with_context(|| format!("Failed to create pool on {}", database_url))?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    Ok(pool)
}
