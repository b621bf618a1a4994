//! `pageroute remove-page <identifier>`.

use anyhow::Result;
use pageroute_core::store::SiteDb;

pub async fn run_remove_page(db: &SiteDb, identifier: &str) -> Result<()> {
    let n = db.remove_page(identifier).await?;
    if n == 0 {
        tracing::warn!(identifier, "remove-page: no such page");
        println!("No page with identifier {identifier}");
    } else {
        println!("Removed {n} row(s) for {identifier}");
    }
    Ok(())
}
