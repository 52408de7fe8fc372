//! Storage trait abstraction
//!
//! Async domain traits implemented by `PgStorage`; services depend on these
//! rather than on the concrete backend.

pub mod catalog;
pub mod query;

pub use catalog::CatalogStore;
pub use query::EpisodeQueryStore;
