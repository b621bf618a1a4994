//! `pageroute import <seed.toml>` – load pages and redirects.

use anyhow::Result;
use pageroute_core::store::{import_seed, SiteDb};
use std::path::Path;

pub async fn run_import(db: &SiteDb, path: &Path) -> Result<()> {
    let (pages, redirects) = import_seed(db, path).await?;
    println!("Imported {pages} pages and {redirects} redirects from {}", path.display());
    Ok(())
}
