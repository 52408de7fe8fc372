//! Storage layer for paintlog
//!
//! PostgreSQL-backed episode catalog: schema migrations, idempotent upserts for
//! episodes, vocabularies and link rows, and filtered episode queries.

pub mod error;
mod pg_migrations;
mod pg_storage;
pub mod traits;

pub use error::StorageError;
pub use pg_migrations::run_pg_migrations;
pub use pg_storage::PgStorage;
pub use traits::{CatalogStore, EpisodeQueryStore};
