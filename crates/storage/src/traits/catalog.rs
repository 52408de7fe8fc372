use async_trait::async_trait;
use paintlog_core::NewEpisode;

use crate::error::StorageError;

/// Write side of the catalog: episode upserts, vocabulary resolution, link rows.
///
/// Every operation is idempotent, so a loader can replay the same input safely.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Insert an episode by title, or return the id of the existing row with that title.
    ///
    /// An existing row keeps its air date, season and episode numbers.
    async fn upsert_episode(&self, episode: &NewEpisode) -> Result<i32, StorageError>;

    /// Insert a color name if absent and return its id.
    async fn ensure_color(&self, name: &str) -> Result<i32, StorageError>;

    /// Insert a subject name if absent and return its id.
    async fn ensure_subject(&self, name: &str) -> Result<i32, StorageError>;

    /// Link an episode to a color. Returns `true` if a new link row was inserted.
    async fn link_episode_color(
        &self,
        episode_id: i32,
        color_id: i32,
    ) -> Result<bool, StorageError>;

    /// Link an episode to a subject. Returns `true` if a new link row was inserted.
    async fn link_episode_subject(
        &self,
        episode_id: i32,
        subject_id: i32,
    ) -> Result<bool, StorageError>;
}
