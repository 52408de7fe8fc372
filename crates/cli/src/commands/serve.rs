use std::sync::Arc;

use anyhow::Result;
use paintlog_http::{AppState, create_router};
use paintlog_service::EpisodeService;
use paintlog_storage::PgStorage;

pub(crate) async fn run(storage: &PgStorage, host: &str, port: u16) -> Result<()> {
    let episode_service = Arc::new(EpisodeService::new(Arc::new(storage.clone())));
    let state = Arc::new(AppState { episode_service });

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
