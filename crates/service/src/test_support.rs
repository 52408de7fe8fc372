//! In-memory `CatalogStore` mirroring the unique constraints of the PostgreSQL schema.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use async_trait::async_trait;
use paintlog_core::NewEpisode;
use paintlog_storage::{CatalogStore, StorageError};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct CatalogSnapshot {
    pub episodes: BTreeMap<String, i32>,
    pub colors: BTreeMap<String, i32>,
    pub subjects: BTreeMap<String, i32>,
    pub episode_colors: BTreeSet<(i32, i32)>,
    pub episode_subjects: BTreeSet<(i32, i32)>,
}

#[derive(Debug, Default)]
pub(crate) struct MemoryCatalog {
    state: Mutex<CatalogSnapshot>,
    fail_links: bool,
}

fn ensure(map: &mut BTreeMap<String, i32>, name: &str) -> i32 {
    let next = i32::try_from(map.len()).unwrap() + 1;
    *map.entry(name.to_owned()).or_insert(next)
}

impl MemoryCatalog {
    /// A store whose link inserts fail, for abort-path tests.
    pub fn failing_links() -> Self {
        Self { fail_links: true, ..Self::default() }
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        self.state.lock().unwrap().clone()
    }

    pub fn episode_id(&self, title: &str) -> Option<i32> {
        self.state.lock().unwrap().episodes.get(title).copied()
    }

    pub fn link_count(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.episode_colors.len() + state.episode_subjects.len()
    }

    fn names_of(
        vocabulary: &BTreeMap<String, i32>,
        links: &BTreeSet<(i32, i32)>,
        episode_id: i32,
    ) -> Vec<String> {
        vocabulary
            .iter()
            .filter(|(_, id)| links.contains(&(episode_id, **id)))
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn colors_of(&self, episode_id: i32) -> Vec<String> {
        let state = self.state.lock().unwrap();
        Self::names_of(&state.colors, &state.episode_colors, episode_id)
    }

    pub fn subjects_of(&self, episode_id: i32) -> Vec<String> {
        let state = self.state.lock().unwrap();
        Self::names_of(&state.subjects, &state.episode_subjects, episode_id)
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn upsert_episode(&self, episode: &NewEpisode) -> Result<i32, StorageError> {
        Ok(ensure(&mut self.state.lock().unwrap().episodes, &episode.title))
    }

    async fn ensure_color(&self, name: &str) -> Result<i32, StorageError> {
        Ok(ensure(&mut self.state.lock().unwrap().colors, name))
    }

    async fn ensure_subject(&self, name: &str) -> Result<i32, StorageError> {
        Ok(ensure(&mut self.state.lock().unwrap().subjects, name))
    }

    async fn link_episode_color(
        &self,
        episode_id: i32,
        color_id: i32,
    ) -> Result<bool, StorageError> {
        if self.fail_links {
            return Err(StorageError::NotFound {
                entity: "episode_color",
                key: format!("{episode_id}/{color_id}"),
            });
        }
        Ok(self.state.lock().unwrap().episode_colors.insert((episode_id, color_id)))
    }

    async fn link_episode_subject(
        &self,
        episode_id: i32,
        subject_id: i32,
    ) -> Result<bool, StorageError> {
        Ok(self.state.lock().unwrap().episode_subjects.insert((episode_id, subject_id)))
    }
}
