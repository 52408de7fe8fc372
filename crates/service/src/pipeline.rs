use std::path::PathBuf;
use std::sync::Arc;

use paintlog_core::{DEFAULT_COLORS_PATH, DEFAULT_DATES_PATH, DEFAULT_SUBJECTS_PATH};
use paintlog_storage::CatalogStore;

use crate::ServiceError;
use crate::extract::{extract_colors, extract_dates, extract_subjects};
use crate::reconcile::{LoadReport, Reconciler, TransformedCatalog, enrich_episode_numbers};
use crate::transform::{transform_colors, transform_episodes, transform_subjects};

/// Locations of the three episode sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub dates: PathBuf,
    pub colors: PathBuf,
    pub subjects: PathBuf,
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self {
            dates: PathBuf::from(DEFAULT_DATES_PATH),
            colors: PathBuf::from(DEFAULT_COLORS_PATH),
            subjects: PathBuf::from(DEFAULT_SUBJECTS_PATH),
        }
    }
}

/// Extract, transform and load the episode sources into a catalog store.
pub struct EtlService {
    store: Arc<dyn CatalogStore>,
}

impl EtlService {
    #[must_use]
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Read and clean all three sources. Any missing or unusable file fails the run.
    pub fn extract_and_transform(
        &self,
        paths: &SourcePaths,
    ) -> Result<TransformedCatalog, ServiceError> {
        let episodes = transform_episodes(extract_dates(&paths.dates)?);
        let colors = transform_colors(extract_colors(&paths.colors)?);
        let subjects = transform_subjects(extract_subjects(&paths.subjects)?);
        tracing::info!(
            episodes = episodes.len(),
            color_rows = colors.len(),
            subject_pairs = subjects.len(),
            "transformed sources"
        );
        let mut catalog = TransformedCatalog { episodes, colors, subjects };
        enrich_episode_numbers(&mut catalog);
        Ok(catalog)
    }

    pub async fn load(&self, catalog: &TransformedCatalog) -> Result<LoadReport, ServiceError> {
        let report = Reconciler::new(self.store.as_ref()).load(catalog).await?;
        tracing::info!(
            episodes = report.episodes,
            colors = report.colors,
            subjects = report.subjects,
            color_links = report.color_links,
            subject_links = report.subject_links,
            unmatched = report.unmatched(),
            "catalog loaded"
        );
        Ok(report)
    }

    /// Full pipeline run.
    pub async fn run(&self, paths: &SourcePaths) -> Result<LoadReport, ServiceError> {
        tracing::info!(
            dates = %paths.dates.display(),
            colors = %paths.colors.display(),
            subjects = %paths.subjects.display(),
            "starting ETL run"
        );
        let catalog = self.extract_and_transform(paths)?;
        self.load(&catalog).await
    }
}
