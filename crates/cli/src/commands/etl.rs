use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use paintlog_service::{EtlService, SourcePaths};
use paintlog_storage::PgStorage;

pub(crate) async fn run(
    storage: &PgStorage,
    dates: PathBuf,
    colors: PathBuf,
    subjects: PathBuf,
) -> Result<()> {
    let service = EtlService::new(Arc::new(storage.clone()));
    let report = service.run(&SourcePaths { dates, colors, subjects }).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
