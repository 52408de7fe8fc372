//! Environment variable parsing with warn-level logging for invalid values.

use crate::constants::{
    PG_POOL_ACQUIRE_TIMEOUT_ENV, PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_ENV,
    PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS, PG_POOL_MAX_CONNECTIONS_ENV,
};

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    match std::env::var(var) {
        Ok(v) => match v.parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        Err(_) => default,
    }
}

/// Connection pool sizing, read from `PAINTLOG_PG_*` env vars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl PoolSettings {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            max_connections: env_parse_with_default(
                PG_POOL_MAX_CONNECTIONS_ENV,
                PG_POOL_MAX_CONNECTIONS,
            ),
            acquire_timeout_secs: env_parse_with_default(
                PG_POOL_ACQUIRE_TIMEOUT_ENV,
                PG_POOL_ACQUIRE_TIMEOUT_SECS,
            ),
            idle_timeout_secs: env_parse_with_default(
                PG_POOL_IDLE_TIMEOUT_ENV,
                PG_POOL_IDLE_TIMEOUT_SECS,
            ),
        }
    }
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: PG_POOL_MAX_CONNECTIONS,
            acquire_timeout_secs: PG_POOL_ACQUIRE_TIMEOUT_SECS,
            idle_timeout_secs: PG_POOL_IDLE_TIMEOUT_SECS,
        }
    }
}
