use std::sync::Arc;

use anyhow::Result;
use paintlog_service::EpisodeService;
use paintlog_storage::PgStorage;

pub(crate) async fn run(storage: &PgStorage) -> Result<()> {
    let stats = EpisodeService::new(Arc::new(storage.clone())).stats().await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
