//! CatalogStore implementation for PgStorage.

use async_trait::async_trait;
use paintlog_core::NewEpisode;

use super::PgStorage;
use crate::error::StorageError;
use crate::traits::CatalogStore;

/// Tables holding a `(id, name UNIQUE)` vocabulary.
#[derive(Debug, Clone, Copy)]
enum Vocabulary {
    Color,
    Subject,
}

impl Vocabulary {
    fn table(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Subject => "subject",
        }
    }
}

impl PgStorage {
    /// Insert-if-absent, then resolve the id of the row that owns `name`.
    async fn ensure_vocabulary(&self, vocab: Vocabulary, name: &str) -> Result<i32, StorageError> {
        let table = vocab.table();
        let insert =
            format!("INSERT INTO {table} (name) VALUES ($1) ON CONFLICT (name) DO NOTHING RETURNING id");
        let inserted: Option<i32> =
            sqlx::query_scalar(&insert).bind(name).fetch_optional(&self.pool).await?;
        if let Some(id) = inserted {
            tracing::debug!(table, name, id, "vocabulary entry created");
            return Ok(id);
        }

        let select = format!("SELECT id FROM {table} WHERE name = $1");
        let existing: Option<i32> =
            sqlx::query_scalar(&select).bind(name).fetch_optional(&self.pool).await?;
        existing.ok_or_else(|| StorageError::NotFound { entity: table, key: name.to_owned() })
    }
}

#[async_trait]
impl CatalogStore for PgStorage {
    async fn upsert_episode(&self, episode: &NewEpisode) -> Result<i32, StorageError> {
        // The no-op update makes RETURNING yield the existing id on conflict.
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO episode (title, episode_number, season_number, air_date)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (title) DO UPDATE SET title = EXCLUDED.title
             RETURNING id",
        )
        .bind(&episode.title)
        .bind(episode.episode)
        .bind(episode.season)
        .bind(episode.air_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn ensure_color(&self, name: &str) -> Result<i32, StorageError> {
        self.ensure_vocabulary(Vocabulary::Color, name).await
    }

    async fn ensure_subject(&self, name: &str) -> Result<i32, StorageError> {
        self.ensure_vocabulary(Vocabulary::Subject, name).await
    }

    async fn link_episode_color(
        &self,
        episode_id: i32,
        color_id: i32,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "INSERT INTO episode_color (episode_id, color_id)
             VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(episode_id)
        .bind(color_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn link_episode_subject(
        &self,
        episode_id: i32,
        subject_id: i32,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "INSERT INTO episode_subject (episode_id, subject_id)
             VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(episode_id)
        .bind(subject_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
