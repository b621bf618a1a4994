//! `pageroute pages` / `pageroute redirects` – list stored rows.

use anyhow::Result;
use pageroute_core::store::SiteDb;

pub async fn run_pages(db: &SiteDb) -> Result<()> {
    let pages = db.list_pages().await?;
    if pages.is_empty() {
        println!("No pages in database.");
        return Ok(());
    }
    println!("{:<32} {:<6} {:<5} {:<8} {}", "IDENTIFIER", "LIVE", "LANG", "ENDING", "PARAMS");
    for p in pages {
        println!(
            "{:<32} {:<6} {:<5} {:<8} {}",
            p.identifier,
            if p.live { "yes" } else { "no" },
            if p.language.is_empty() { "-" } else { &p.language },
            if p.ending.is_empty() { "-" } else { &p.ending },
            p.parameters.join(",")
        );
    }
    Ok(())
}

pub async fn run_redirects(db: &SiteDb) -> Result<()> {
    let redirects = db.list_redirects().await?;
    if redirects.is_empty() {
        println!("No redirects in database.");
        return Ok(());
    }
    println!("{:<32} {:<5} {}", "OLD", "CODE", "NEW");
    for r in redirects {
        println!("{:<32} {:<5} {}", r.old_pattern, r.http_code, r.new_target);
    }
    Ok(())
}
