//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by concern: catalog writes and episode queries.

#![allow(clippy::absolute_paths, reason = "std paths in error handling are clear")]

mod catalog;
mod query;

use std::time::Duration;

use chrono::NaiveDate;
use paintlog_core::{EpisodeSummary, PoolSettings};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use crate::error::StorageError;

use super::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Connect with default pool settings and apply migrations.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        Self::with_settings(database_url, PoolSettings::default()).await
    }

    /// Connect with explicit pool settings and apply migrations.
    pub async fn with_settings(
        database_url: &str,
        settings: PoolSettings,
    ) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(settings.idle_timeout_secs))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        let storage = Self { pool };
        storage.migrate().await?;
        tracing::info!(max_connections = settings.max_connections, "PgStorage initialized");
        Ok(storage)
    }

    /// Apply the idempotent schema migrations.
    pub async fn migrate(&self) -> Result<(), StorageError> {
        run_pg_migrations(&self.pool).await.map_err(|e| StorageError::Migration(e.to_string()))
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Escape `%`, `_` and `\` so user input matches literally inside a LIKE pattern.
pub(crate) fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// `%value%` with LIKE metacharacters escaped.
pub(crate) fn contains_pattern(s: &str) -> String {
    format!("%{}%", escape_like(s))
}

pub(crate) fn row_to_episode_summary(
    row: &sqlx::postgres::PgRow,
) -> Result<EpisodeSummary, StorageError> {
    let date: Option<NaiveDate> = row.try_get("air_date")?;
    Ok(EpisodeSummary {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        date,
        season: row.try_get("season_number")?,
        episode: row.try_get("episode_number")?,
        colors: row.try_get("colors")?,
        subjects: row.try_get("subjects")?,
    })
}
