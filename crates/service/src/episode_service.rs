use std::sync::Arc;

use paintlog_core::{CatalogStats, EpisodeFilter, EpisodeSummary};
use paintlog_storage::EpisodeQueryStore;

use crate::ServiceError;

pub struct EpisodeService {
    store: Arc<dyn EpisodeQueryStore>,
}

impl EpisodeService {
    #[must_use]
    pub fn new(store: Arc<dyn EpisodeQueryStore>) -> Self {
        Self { store }
    }

    pub async fn find_episodes(
        &self,
        filter: &EpisodeFilter,
    ) -> Result<Vec<EpisodeSummary>, ServiceError> {
        Ok(self.store.find_episodes(filter).await?)
    }

    pub async fn stats(&self) -> Result<CatalogStats, ServiceError> {
        Ok(self.store.catalog_stats().await?)
    }
}
