//! Shared constants for paintlog.
//!
//! Centralizes defaults that are otherwise duplicated between the CLI, storage and HTTP crates.

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Env var overriding [`PG_POOL_MAX_CONNECTIONS`].
pub const PG_POOL_MAX_CONNECTIONS_ENV: &str = "PAINTLOG_PG_MAX_CONNECTIONS";

/// Env var overriding [`PG_POOL_ACQUIRE_TIMEOUT_SECS`].
pub const PG_POOL_ACQUIRE_TIMEOUT_ENV: &str = "PAINTLOG_PG_ACQUIRE_TIMEOUT_SECS";

/// Env var overriding [`PG_POOL_IDLE_TIMEOUT_SECS`].
pub const PG_POOL_IDLE_TIMEOUT_ENV: &str = "PAINTLOG_PG_IDLE_TIMEOUT_SECS";

/// Connection string for the catalog database.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Default location of the free-text air date source.
pub const DEFAULT_DATES_PATH: &str = "data/dates.csv";

/// Default location of the color list source.
pub const DEFAULT_COLORS_PATH: &str = "data/colors.csv";

/// Default location of the subject indicator matrix.
pub const DEFAULT_SUBJECTS_PATH: &str = "data/subjects.csv";

/// Default HTTP port for `paintlog serve`.
pub const DEFAULT_HTTP_PORT: u16 = 5000;
