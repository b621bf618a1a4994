//! Page and redirect stores (SQLite via sqlx).
//!
//! The engine only sees the `PageStore` and `RedirectStore` read contracts;
//! `SiteDb` implements both and adds the small write path used by seed
//! imports and tests.

pub mod db;
mod pages;
mod redirects;
pub mod seed;
pub mod types;

pub use db::SiteDb;
pub use seed::{import_seed, SeedFile};
pub use types::*;

use anyhow::Result;

/// Batched page lookup.
#[allow(async_fn_in_trait)]
pub trait PageStore {
    /// Every row whose identifier is in `identifiers`, in one round trip.
    async fn find_pages(&self, identifiers: &[String]) -> Result<Vec<PageRecord>>;
}

/// Redirect lookup, one call per phase.
#[allow(async_fn_in_trait)]
pub trait RedirectStore {
    /// The row for the first fragment (in slice order) that has one.
    async fn find_redirect(
        &self,
        shape: RedirectShape,
        fragments: &[String],
    ) -> Result<Option<RedirectRecord>>;
}
