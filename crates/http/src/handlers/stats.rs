use axum::{Json, extract::State};
use std::sync::Arc;

use paintlog_core::CatalogStats;

use crate::AppState;
use crate::api_error::ApiError;

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<CatalogStats>, ApiError> {
    Ok(Json(state.episode_service.stats().await?))
}
