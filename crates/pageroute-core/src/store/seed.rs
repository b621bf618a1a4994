//! Seed import: load pages and redirects from a TOML file.
//!
//! ```toml
//! [[pages]]
//! identifier = "/blog/*"
//! content = "blog"
//! live = true
//! parameters = ["page"]
//!
//! [[redirects]]
//! old_pattern = "/old/*"
//! new_target = "/blog/*"
//! http_code = 301
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::db::SiteDb;
use super::types::{PageRecord, RedirectRecord};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub pages: Vec<SeedPage>,
    #[serde(default)]
    pub redirects: Vec<RedirectRecord>,
}

/// Page entry in a seed file; `live` defaults to true here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedPage {
    pub identifier: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_live")]
    pub live: bool,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub ending: String,
    #[serde(default)]
    pub parameters: Vec<String>,
}

fn default_live() -> bool {
    true
}

impl From<SeedPage> for PageRecord {
    fn from(p: SeedPage) -> Self {
        PageRecord {
            identifier: p.identifier,
            content: p.content,
            live: p.live,
            language: p.language,
            ending: p.ending,
            parameters: p.parameters,
        }
    }
}

impl SeedFile {
    pub fn parse(data: &str) -> Result<Self> {
        Ok(toml::from_str(data)?)
    }
}

/// Imports `path` into `db`. Returns `(pages, redirects)` inserted.
pub async fn import_seed(db: &SiteDb, path: &Path) -> Result<(usize, usize)> {
    let data = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read seed {}", path.display()))?;
    let seed = SeedFile::parse(&data).with_context(|| format!("parse seed {}", path.display()))?;
    let (pages, redirects) = (seed.pages.len(), seed.redirects.len());
    for page in seed.pages {
        db.insert_page(&page.into()).await?;
    }
    for redirect in &seed.redirects {
        db.insert_redirect(redirect).await?;
    }
    tracing::info!(pages, redirects, "imported seed {}", path.display());
    Ok((pages, redirects))
}
