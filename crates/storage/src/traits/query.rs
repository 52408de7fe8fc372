use async_trait::async_trait;
use paintlog_core::{CatalogStats, EpisodeFilter, EpisodeSummary};

use crate::error::StorageError;

/// Read side of the catalog.
#[async_trait]
pub trait EpisodeQueryStore: Send + Sync {
    /// Episodes matching `filter`, each with its full color and subject sets,
    /// ordered by air date.
    async fn find_episodes(
        &self,
        filter: &EpisodeFilter,
    ) -> Result<Vec<EpisodeSummary>, StorageError>;

    /// Row counts for every catalog table.
    async fn catalog_stats(&self) -> Result<CatalogStats, StorageError>;
}
