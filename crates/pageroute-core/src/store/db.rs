//! SQLite-backed site database implementation.
//!
//! Handles connection and migrations. Page and redirect queries live in
//! `pages` and `redirects`.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;

/// Identifiers per `IN (...)` query; stays below SQLite's bind-variable limit.
pub(crate) const BATCH_CHUNK: usize = 500;

/// Handle to the SQLite site database holding pages and redirects.
///
/// The default file lives under the XDG state directory:
/// `~/.local/state/pageroute/site.db`.
#[derive(Clone)]
pub struct SiteDb {
    pub(crate) pool: Pool<Sqlite>,
}

impl SiteDb {
    /// Open (or create) the default site database and run migrations.
    pub async fn open_default() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("pageroute")?;
        let state_dir = xdg_dirs.get_state_home().join("pageroute");
        Self::open_at(state_dir.join("site.db")).await
    }

    /// Open (or create) the database at a specific path. Creates parent dirs if needed.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create {}", parent.display()))?;
        }
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .with_context(|| format!("open site database {}", path.display()))?;
        let db = SiteDb { pool };
        db.migrate().await?;
        tracing::debug!("opened site database at {}", path.display());
        Ok(db)
    }

    /// Open an in-memory database (tests, throwaway CLI runs).
    ///
    /// A single pooled connection keeps every query on the same database.
    pub async fn open_memory() -> Result<Self> {
        let options = SqliteConnectOptions::new().in_memory(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        let db = SiteDb { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Close the pool; later queries fail (used to exercise store failures).
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn migrate(&self) -> Result<()> {
        // Identifiers are not unique: one pattern may exist once per language.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS pages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                identifier TEXT NOT NULL,
                content TEXT NOT NULL DEFAULT '',
                live INTEGER NOT NULL DEFAULT 1,
                language TEXT NOT NULL DEFAULT '',
                ending TEXT NOT NULL DEFAULT '',
                parameters_json TEXT
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS pages_identifier ON pages (identifier);")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS redirects (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                old_pattern TEXT NOT NULL UNIQUE,
                new_target TEXT NOT NULL,
                http_code INTEGER NOT NULL DEFAULT 301
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
