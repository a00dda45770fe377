use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

use crate::config;

/// Handle to the user document store.
///
/// Users live in a single table whose nested maps and post arrays are
/// JSON columns, so one row is one document and every ledger mutation
/// is a single atomic statement.
#[derive(Clone)]
pub struct Pool {
    pool: SqlitePool,
}

impl Pool {
    const ACQUIRE_TIMEOUT_SECS: u64 = 5;

    #[tracing::instrument(skip_all)]
    pub async fn connect(cfg: &config::Database) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(&cfg.url)?.create_if_missing(true);

        let mut pool_opts =
            SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(Self::ACQUIRE_TIMEOUT_SECS));

        // Each connection to an in-memory database opens its own
        // database, so those get exactly one connection.
        if cfg.url.contains(":memory:") {
            pool_opts = pool_opts.max_connections(1);
        }

        let pool = Self {
            pool: pool_opts.connect_with(options).await?,
        };
        pool.migrate().await?;
        Ok(pool)
    }

    /// Fresh single-connection in-memory store, used by tests.
    pub async fn connect_in_memory() -> Result<Self, sqlx::Error> {
        Self::connect(&config::Database {
            url: "sqlite::memory:".to_owned(),
        })
        .await
    }

    pub fn inner(&self) -> &SqlitePool {
        &self.pool
    }

    async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id               TEXT PRIMARY KEY,
                username         TEXT NOT NULL UNIQUE,
                password_hash    TEXT NOT NULL,
                role             TEXT NOT NULL DEFAULT 'user',
                credits          INTEGER NOT NULL DEFAULT 0,
                profile          TEXT NOT NULL,
                completed_fields TEXT NOT NULL,
                last_login       TEXT,
                saved_posts      TEXT NOT NULL DEFAULT '[]',
                reported_posts   TEXT NOT NULL DEFAULT '[]',
                created_at       TEXT NOT NULL DEFAULT (datetime('now')),
                updated_at       TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.pool.fmt(f)
    }
}
