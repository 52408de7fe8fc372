//! Schema creation.

use paintlog_storage::PgStorage;

pub(crate) async fn run(storage: &PgStorage) -> anyhow::Result<()> {
    storage.migrate().await?;
    tracing::info!("catalog schema is up to date");
    println!("Migration complete!");
    Ok(())
}
