//! Product catalog abstraction.
//!
//! The engine never fetches products itself. Handlers read the catalog
//! through this trait and pass materialized lists into the scoring
//! functions. Backends: an in-memory catalog for local runs and tests, and a
//! Postgres catalog with an optional Redis read-through cache.

use crate::{
    error::AppResult,
    models::{Outfit, Product},
};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryCatalog;
pub use postgres::PgCatalog;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProductCatalog: Send + Sync {
    /// All active products, in catalog order
    async fn list_products(&self) -> AppResult<Vec<Product>>;

    /// Candidate outfits with their constituent products
    async fn list_outfits(&self) -> AppResult<Vec<Outfit>>;

    /// Catalog backend name for logging
    fn name(&self) -> &'static str;
}
