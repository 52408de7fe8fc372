//! Service layer for paintlog
//!
//! Extracts and cleans the three episode sources, reconciles them on the canonical
//! title into the catalog store, and answers filtered episode queries.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure vars are idiomatic")]

pub mod error;
mod episode_service;
pub mod extract;
mod list_literal;
mod pipeline;
pub mod reconcile;
pub mod transform;

#[cfg(test)]
mod test_support;

pub use episode_service::EpisodeService;
pub use error::{ExtractError, ServiceError};
pub use list_literal::parse_list_literal;
pub use pipeline::{EtlService, SourcePaths};
pub use reconcile::{LoadReport, Reconciler, TransformedCatalog};
