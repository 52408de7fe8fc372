mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use paintlog_core::{
    DATABASE_URL_ENV, DEFAULT_COLORS_PATH, DEFAULT_DATES_PATH, DEFAULT_HTTP_PORT,
    DEFAULT_SUBJECTS_PATH, PoolSettings,
};
use paintlog_storage::PgStorage;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "paintlog")]
#[command(about = "Painting-show episode catalog: ETL and query API", long_about = None)]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, global = true, env = DATABASE_URL_ENV, hide_env_values = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the catalog schema
    Migrate,
    /// Extract, transform and load the three episode sources
    Etl {
        #[arg(long, default_value = DEFAULT_DATES_PATH)]
        dates: PathBuf,
        #[arg(long, default_value = DEFAULT_COLORS_PATH)]
        colors: PathBuf,
        #[arg(long, default_value = DEFAULT_SUBJECTS_PATH)]
        subjects: PathBuf,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(short, long, default_value_t = DEFAULT_HTTP_PORT)]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Print episodes matching a filter as JSON
    Query {
        #[arg(long)]
        month: Vec<String>,
        #[arg(long)]
        color: Vec<String>,
        #[arg(long)]
        subject: Vec<String>,
        /// `and` or `or`; anything else means `or`
        #[arg(long)]
        mode: Option<String>,
    },
    /// Print catalog row counts as JSON
    Stats,
}

async fn connect(database_url: Option<String>) -> Result<PgStorage> {
    let url = database_url
        .with_context(|| format!("{DATABASE_URL_ENV} or --database-url must be set"))?;
    let storage = PgStorage::with_settings(&url, PoolSettings::from_env())
        .await
        .context("failed to connect to PostgreSQL")?;
    Ok(storage)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let storage = connect(cli.database_url).await?;

    let result = match cli.command {
        Commands::Migrate => commands::migrate::run(&storage).await,
        Commands::Etl { dates, colors, subjects } => {
            commands::etl::run(&storage, dates, colors, subjects).await
        },
        Commands::Serve { port, host } => commands::serve::run(&storage, &host, port).await,
        Commands::Query { month, color, subject, mode } => {
            commands::query::run(&storage, month, color, subject, mode).await
        },
        Commands::Stats => commands::stats::run(&storage).await,
    };
    storage.close().await;
    result
}
