//! Product listings, buyer ratings, and short promo videos (reels) with
//! likes, comments, and share/view counters.
//!
//! Structured like the accounts crate, but the handlers talk to the
//! repositories directly: every operation here is a thin read or write
//! with at most an ownership or verified-seller check in front of it.

pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use error::{CatalogError, CatalogResult};
pub use infra::postgres::PgCatalogRepository;
pub use presentation::router::catalog_router;

#[cfg(test)]
mod tests;
