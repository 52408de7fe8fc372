//! Reconciler/loader: joins the three transformed tables on the canonical title
//! and writes episodes, vocabularies and link rows through a [`CatalogStore`].
//!
//! The load is strictly sequential. Episodes and vocabularies are resolved before
//! any link is attempted, and every write is insert-if-absent, so replaying the
//! same catalog leaves the store unchanged.

use std::collections::{BTreeSet, HashMap};

use paintlog_core::{ColorRow, EpisodeRecord, NewEpisode, SubjectRow, canonicalize};
use paintlog_storage::{CatalogStore, StorageError};
use serde::Serialize;

/// Output of the three transforms, ready to load.
#[derive(Debug, Clone, Default)]
pub struct TransformedCatalog {
    pub episodes: Vec<EpisodeRecord>,
    pub colors: Vec<ColorRow>,
    pub subjects: Vec<SubjectRow>,
}

/// What a load wrote, and which secondary-source titles found no episode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Distinct episodes resolved (inserted or already present).
    pub episodes: usize,
    /// Distinct color names resolved.
    pub colors: usize,
    /// Distinct subject names resolved.
    pub subjects: usize,
    /// Episode/color links inserted by this run.
    pub color_links: usize,
    /// Episode/subject links inserted by this run.
    pub subject_links: usize,
    pub unmatched_color_titles: BTreeSet<String>,
    pub unmatched_subject_titles: BTreeSet<String>,
}

impl LoadReport {
    #[must_use]
    pub fn unmatched(&self) -> usize {
        self.unmatched_color_titles.len() + self.unmatched_subject_titles.len()
    }
}

/// Fill missing season/episode numbers from the color and subject sources.
///
/// A record keeps any number it already has. Each field is filled separately,
/// from color rows first and subject episode codes second.
pub fn enrich_episode_numbers(catalog: &mut TransformedCatalog) {
    let mut numbers: HashMap<String, (Option<i32>, Option<i32>)> = HashMap::new();
    let mut merge = |title: &str, season: Option<i32>, episode: Option<i32>| {
        if season.is_none() && episode.is_none() {
            return;
        }
        let slot = numbers.entry(canonicalize(title)).or_default();
        slot.0 = slot.0.or(season);
        slot.1 = slot.1.or(episode);
    };
    for row in &catalog.colors {
        merge(&row.title, row.season, row.episode);
    }
    for row in &catalog.subjects {
        if let Some(code) = row.episode_code {
            merge(&row.title, Some(code.season), Some(code.episode));
        }
    }

    let mut enriched = 0_usize;
    for record in &mut catalog.episodes {
        if record.season.is_some() && record.episode.is_some() {
            continue;
        }
        if let Some(&(season, episode)) = numbers.get(&canonicalize(&record.title)) {
            let before = (record.season, record.episode);
            record.season = record.season.or(season);
            record.episode = record.episode.or(episode);
            if before != (record.season, record.episode) {
                enriched += 1;
            }
        }
    }
    if enriched > 0 {
        tracing::debug!(enriched, "filled season/episode numbers from secondary sources");
    }
}

pub struct Reconciler<'a> {
    store: &'a dyn CatalogStore,
}

impl<'a> Reconciler<'a> {
    #[must_use]
    pub fn new(store: &'a dyn CatalogStore) -> Self {
        Self { store }
    }

    /// Write `catalog` to the store. Unmatched titles are reported, not fatal;
    /// the first storage error aborts the load.
    pub async fn load(&self, catalog: &TransformedCatalog) -> Result<LoadReport, StorageError> {
        let mut report = LoadReport::default();

        let episode_ids = self.load_episodes(&catalog.episodes).await?;
        report.episodes = episode_ids.values().collect::<BTreeSet<_>>().len();

        let color_names: BTreeSet<&str> =
            catalog.colors.iter().flat_map(|r| r.colors.iter().map(String::as_str)).collect();
        let mut color_ids = HashMap::with_capacity(color_names.len());
        for name in color_names {
            color_ids.insert(name, self.store.ensure_color(name).await?);
        }
        report.colors = color_ids.len();

        let subject_names: BTreeSet<&str> =
            catalog.subjects.iter().map(|r| r.subject.as_str()).collect();
        let mut subject_ids = HashMap::with_capacity(subject_names.len());
        for name in subject_names {
            subject_ids.insert(name, self.store.ensure_subject(name).await?);
        }
        report.subjects = subject_ids.len();

        for row in &catalog.colors {
            let Some(&episode_id) = episode_ids.get(&canonicalize(&row.title)) else {
                report.unmatched_color_titles.insert(row.title.clone());
                continue;
            };
            for color in &row.colors {
                let Some(&color_id) = color_ids.get(color.as_str()) else {
                    continue;
                };
                if self.store.link_episode_color(episode_id, color_id).await? {
                    report.color_links += 1;
                }
            }
        }

        for row in &catalog.subjects {
            let Some(&episode_id) = episode_ids.get(&canonicalize(&row.title)) else {
                report.unmatched_subject_titles.insert(row.title.clone());
                continue;
            };
            let Some(&subject_id) = subject_ids.get(row.subject.as_str()) else {
                continue;
            };
            if self.store.link_episode_subject(episode_id, subject_id).await? {
                report.subject_links += 1;
            }
        }

        for title in &report.unmatched_color_titles {
            tracing::warn!(%title, "color row matches no episode");
        }
        for title in &report.unmatched_subject_titles {
            tracing::warn!(%title, "subject row matches no episode");
        }
        Ok(report)
    }

    /// Upsert every episode and map canonical title to id. First id wins on collision.
    async fn load_episodes(
        &self,
        episodes: &[EpisodeRecord],
    ) -> Result<HashMap<String, i32>, StorageError> {
        let mut ids: HashMap<String, i32> = HashMap::with_capacity(episodes.len());
        for record in episodes {
            let id = self.store.upsert_episode(&NewEpisode::from(record)).await?;
            let key = canonicalize(&record.title);
            match ids.get(&key) {
                Some(&existing) if existing != id => {
                    tracing::warn!(
                        title = %record.title,
                        canonical = %key,
                        kept = existing,
                        ignored = id,
                        "canonical title collision"
                    );
                },
                Some(_) => {},
                None => {
                    ids.insert(key, id);
                },
            }
        }
        Ok(ids)
    }
}
