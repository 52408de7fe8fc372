use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use paintlog_core::EpisodeSummary;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::episode_filter;

/// `GET /episodes?month=..&color=..&subject=..&mode=and|or`
pub async fn list_episodes(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<EpisodeSummary>>, ApiError> {
    let filter = episode_filter(&pairs);
    let episodes = state.episode_service.find_episodes(&filter).await?;
    tracing::debug!(matched = episodes.len(), filter = ?filter, "episodes query");
    Ok(Json(episodes))
}
