use anyhow::{Context as _, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;

/// DbConnection owns the pool shared by every repository
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open the capture database at `url`, creating it if needed
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url)
                .await
                .with_context(|| format!("create database {url}"))?;
        }

        // LIKE must be case sensitive so that search terms match exactly
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("parse database url {url}"))?
            .pragma("case_sensitive_like", "ON");

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("connect to {url}"))?;

        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().simple().to_string();
        let db_url = format!("sqlite:file:capture_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// The capture engine normally owns this table. Creating it here lets the
    /// server start against an empty database.
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                uuid TEXT NOT NULL UNIQUE,
                origin TEXT NOT NULL DEFAULT '',
                method TEXT NOT NULL DEFAULT '',
                status INTEGER NOT NULL DEFAULT 0,
                content_type TEXT NOT NULL DEFAULT '',
                content_length INTEGER NOT NULL DEFAULT 0,
                host TEXT NOT NULL DEFAULT '',
                url TEXT NOT NULL DEFAULT '',
                path TEXT NOT NULL DEFAULT '',
                scheme TEXT NOT NULL DEFAULT '',
                date_start TEXT NOT NULL,
                date_end TEXT NOT NULL,
                time_taken INTEGER NOT NULL DEFAULT 0,
                header TEXT,
                request_header TEXT,
                body BLOB,
                request_body BLOB
            );
            "#,
        )
        .execute(pool)
        .await
        .context("create records table")?;

        Ok(())
    }
}
