//! Shared helpers: a throwaway site database on disk.

use pageroute_core::store::{PageRecord, RedirectRecord, SiteDb};
use tempfile::TempDir;

pub struct Site {
    pub db: SiteDb,
    // Keeps the database file alive for the test.
    _dir: TempDir,
}

pub async fn site(pages: &[&str], redirects: &[(&str, &str, u16)]) -> Site {
    let dir = tempfile::tempdir().unwrap();
    let db = SiteDb::open_at(dir.path().join("site.db")).await.unwrap();
    for identifier in pages {
        db.insert_page(&page(identifier)).await.unwrap();
    }
    for (old, new, code) in redirects {
        db.insert_redirect(&RedirectRecord {
            old_pattern: old.to_string(),
            new_target: new.to_string(),
            http_code: *code,
        })
        .await
        .unwrap();
    }
    Site { db, _dir: dir }
}

pub fn page(identifier: &str) -> PageRecord {
    PageRecord {
        identifier: identifier.to_string(),
        content: format!("content:{identifier}"),
        live: true,
        ..PageRecord::default()
    }
}
