//! Core types and helpers for paintlog
//!
//! Domain records shared by the storage, service, HTTP and CLI crates, plus the
//! title canonicalizer that every cross-source join goes through.

mod constants;
mod env_config;
mod episode;
mod filter;
mod title;

pub use constants::*;
pub use env_config::*;
pub use episode::*;
pub use filter::*;
pub use title::*;
