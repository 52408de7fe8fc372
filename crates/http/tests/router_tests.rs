//! Router tests against an in-memory query store.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use paintlog_core::{CatalogStats, EpisodeFilter, EpisodeSummary, FilterMode};
use paintlog_http::{AppState, create_router};
use paintlog_service::EpisodeService;
use paintlog_storage::{EpisodeQueryStore, StorageError};
use serde_json::Value;
use tower::util::ServiceExt;

struct MemoryEpisodes(Vec<EpisodeSummary>);

fn any_contains(haystack: &[String], needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.iter().any(|h| h.to_lowercase().contains(&n.to_lowercase())))
}

impl MemoryEpisodes {
    fn matches(episode: &EpisodeSummary, filter: &EpisodeFilter) -> bool {
        let month = episode.date.map(|d| d.format("%B").to_string()).unwrap_or_default();
        let mut groups = Vec::new();
        if !filter.months.is_empty() {
            groups.push(any_contains(&[month], &filter.months));
        }
        if !filter.colors.is_empty() {
            groups.push(any_contains(&episode.colors, &filter.colors));
        }
        if !filter.subjects.is_empty() {
            groups.push(any_contains(&episode.subjects, &filter.subjects));
        }
        match filter.mode {
            _ if groups.is_empty() => true,
            FilterMode::And => groups.iter().all(|g| *g),
            FilterMode::Or => groups.iter().any(|g| *g),
        }
    }
}

#[async_trait]
impl EpisodeQueryStore for MemoryEpisodes {
    async fn find_episodes(
        &self,
        filter: &EpisodeFilter,
    ) -> Result<Vec<EpisodeSummary>, StorageError> {
        Ok(self.0.iter().filter(|e| Self::matches(e, filter)).cloned().collect())
    }

    async fn catalog_stats(&self) -> Result<CatalogStats, StorageError> {
        Ok(CatalogStats { episodes: self.0.len() as i64, ..CatalogStats::default() })
    }
}

struct BrokenStore;

#[async_trait]
impl EpisodeQueryStore for BrokenStore {
    async fn find_episodes(&self, _: &EpisodeFilter) -> Result<Vec<EpisodeSummary>, StorageError> {
        Err(StorageError::Migration("relation \"episode\" does not exist".to_owned()))
    }

    async fn catalog_stats(&self) -> Result<CatalogStats, StorageError> {
        Err(StorageError::Migration("relation \"episode\" does not exist".to_owned()))
    }
}

fn episode(id: i32, title: &str, date: (i32, u32, u32), colors: &[&str]) -> EpisodeSummary {
    EpisodeSummary {
        id,
        title: title.to_owned(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
        season: Some(1),
        episode: Some(id),
        colors: colors.iter().map(|c| (*c).to_owned()).collect(),
        subjects: vec![],
    }
}

fn app(store: Arc<dyn EpisodeQueryStore>) -> axum::Router {
    let state = AppState { episode_service: Arc::new(EpisodeService::new(store)) };
    create_router(Arc::new(state))
}

fn sample_app() -> axum::Router {
    app(Arc::new(MemoryEpisodes(vec![
        episode(1, "A", (1983, 1, 11), &["blue"]),
        episode(2, "B", (1983, 3, 8), &["red"]),
    ])))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn titles(json: &Value) -> Vec<&str> {
    json.as_array().unwrap().iter().map(|e| e["title"].as_str().unwrap()).collect()
}

#[tokio::test]
async fn health_returns_ok() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = sample_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn version_is_reported() {
    let (status, json) = get(sample_app(), "/api/version").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn no_filter_returns_everything() {
    let (status, json) = get(sample_app(), "/episodes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&json), vec!["A", "B"]);
    assert_eq!(json[0]["date"], "1983-01-11");
    assert_eq!(json[0]["colors"][0], "blue");
    assert!(json[0]["subjects"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn or_mode_unions_categories() {
    let (_, json) = get(sample_app(), "/episodes?month=January&color=red&mode=or").await;
    assert_eq!(titles(&json), vec!["A", "B"]);
}

#[tokio::test]
async fn and_mode_intersects_categories() {
    let (_, json) = get(sample_app(), "/episodes?month=January&color=red&mode=and").await;
    assert!(titles(&json).is_empty());

    let (_, json) = get(sample_app(), "/episodes?month=January&color=red").await;
    assert!(titles(&json).is_empty());
}

#[tokio::test]
async fn unknown_mode_falls_back_to_or() {
    let (_, json) = get(sample_app(), "/episodes?month=January&color=red&mode=maybe").await;
    assert_eq!(titles(&json), vec!["A", "B"]);
}

#[tokio::test]
async fn repeated_values_are_ored() {
    let (_, json) = get(sample_app(), "/episodes?color=blue&color=red").await;
    assert_eq!(titles(&json), vec!["A", "B"]);
}

#[tokio::test]
async fn stats_endpoint() {
    let (status, json) = get(sample_app(), "/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["episodes"], 2);
    assert_eq!(json["episode_subjects"], 0);
}

#[tokio::test]
async fn storage_failure_is_opaque_500() {
    let (status, json) = get(app(Arc::new(BrokenStore)), "/episodes").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "internal server error");
}
