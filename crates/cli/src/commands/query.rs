use std::sync::Arc;

use anyhow::Result;
use paintlog_core::{EpisodeFilter, FilterMode};
use paintlog_service::EpisodeService;
use paintlog_storage::PgStorage;

pub(crate) async fn run(
    storage: &PgStorage,
    months: Vec<String>,
    colors: Vec<String>,
    subjects: Vec<String>,
    mode: Option<String>,
) -> Result<()> {
    let filter = EpisodeFilter::new(FilterMode::from_param(mode.as_deref()));
    let filter = months.into_iter().fold(filter, |f, m| f.month(m));
    let filter = colors.into_iter().fold(filter, |f, c| f.color(c));
    let filter = subjects.into_iter().fold(filter, |f, s| f.subject(s));

    let service = EpisodeService::new(Arc::new(storage.clone()));
    let episodes = service.find_episodes(&filter).await?;
    println!("{}", serde_json::to_string_pretty(&episodes)?);
    Ok(())
}
