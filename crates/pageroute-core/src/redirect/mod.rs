//! Redirect fallback, run only when no page matched.
//!
//! # Phases
//! ```text
//! 1. exact             /old/page, /old/page.html, /old/page.html.de
//! 2. suffix-wildcard   /old/*, /*            (strip from the right)
//! 3. prefix-wildcard   */page, *-page        (strip from the left)
//! ```
//! The first phase with a hit wins. A wildcard at either end of the target
//! receives the text that was cut away.

mod phases;

pub use phases::{exact_fragments, prefix_steps, splice, suffix_steps, Step};

use anyhow::Result;

use crate::normalize::NormalizedPath;
use crate::store::{RedirectRecord, RedirectShape, RedirectStore};

/// Where to send the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub target: String,
    pub http_code: u16,
    /// Stored pattern that matched.
    pub pattern: String,
    pub shape: RedirectShape,
}

/// Per-request redirect resolver.
///
/// The exact phase runs on the first call only; later calls in the same
/// request go straight to the wildcard phases.
#[derive(Debug, Default)]
pub struct RedirectResolver {
    exact_done: bool,
}

impl RedirectResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exact_done(&self) -> bool {
        self.exact_done
    }

    pub async fn resolve<S: RedirectStore>(
        &mut self,
        store: &S,
        path: &NormalizedPath,
        language: Option<&str>,
    ) -> Result<Option<RedirectTarget>> {
        if !self.exact_done {
            self.exact_done = true;
            let fragments = exact_fragments(path, language);
            if let Some(hit) = store.find_redirect(RedirectShape::Exact, &fragments).await? {
                return Ok(Some(finish(hit, "", RedirectShape::Exact)));
            }
        }

        let full = format!("/{}", path.key);
        for (shape, steps) in [
            (RedirectShape::SuffixWildcard, suffix_steps(&full)),
            (RedirectShape::PrefixWildcard, prefix_steps(&full)),
        ] {
            if steps.is_empty() {
                continue;
            }
            let fragments: Vec<String> = steps.iter().map(|s| s.pattern.clone()).collect();
            if let Some(hit) = store.find_redirect(shape, &fragments).await? {
                let cut = steps
                    .iter()
                    .find(|s| s.pattern == hit.old_pattern)
                    .map_or("", |s| s.cut.as_str());
                return Ok(Some(finish(hit, cut, shape)));
            }
        }
        Ok(None)
    }
}

fn finish(hit: RedirectRecord, cut: &str, shape: RedirectShape) -> RedirectTarget {
    let target = splice(&hit.new_target, cut);
    tracing::info!(
        pattern = %hit.old_pattern,
        code = hit.http_code,
        "redirect ({}) to {}",
        shape.as_str(),
        target
    );
    RedirectTarget {
        target,
        http_code: hit.http_code,
        pattern: hit.old_pattern,
        shape,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_path;
    use crate::store::SiteDb;

    fn path(raw: &str) -> NormalizedPath {
        normalize_path(raw, None, &[".html".to_string()], &["de".to_string()])
    }

    async fn db_with(rows: &[(&str, &str, u16)]) -> SiteDb {
        let db = SiteDb::open_memory().await.unwrap();
        for (old, new, code) in rows {
            db.insert_redirect(&RedirectRecord {
                old_pattern: old.to_string(),
                new_target: new.to_string(),
                http_code: *code,
            })
            .await
            .unwrap();
        }
        db
    }

    #[tokio::test]
    async fn exact_beats_wildcards() {
        let db = db_with(&[
            ("/old/page", "/exact", 301),
            ("/old/*", "/suffix/*", 302),
            ("*/page", "*/prefix", 307),
        ])
        .await;
        let mut r = RedirectResolver::new();
        let hit = r.resolve(&db, &path("/old/page"), None).await.unwrap().unwrap();
        assert_eq!(hit.target, "/exact");
        assert_eq!(hit.shape, RedirectShape::Exact);
        assert!(r.exact_done());
    }

    #[tokio::test]
    async fn suffix_wildcard_splices_tail() {
        let db = db_with(&[("/shop-*", "/store/*", 301)]).await;
        let mut r = RedirectResolver::new();
        let hit = r
            .resolve(&db, &path("/shop-shoes-red"), None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(hit.target, "/store/shoes/red");
        assert_eq!(hit.shape, RedirectShape::SuffixWildcard);
    }

    #[tokio::test]
    async fn prefix_wildcard_splices_head() {
        let db = db_with(&[("*/old-page", "*/new-page", 302)]).await;
        let mut r = RedirectResolver::new();
        let hit = r
            .resolve(&db, &path("/de/old-page"), None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(hit.target, "/de/new-page");
        assert_eq!(hit.http_code, 302);
        assert_eq!(hit.shape, RedirectShape::PrefixWildcard);
    }

    #[tokio::test]
    async fn language_suffixed_exact_variant() {
        let db = db_with(&[("/about.html.de", "/de/about", 301)]).await;
        let mut r = RedirectResolver::new();
        let hit = r
            .resolve(&db, &path("/about.html"), Some("de"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(hit.target, "/de/about");
    }

    #[tokio::test]
    async fn requested_language_replaces_suffix_language() {
        let db = db_with(&[("/about.html.de", "/de/about", 301)]).await;
        let mut r = RedirectResolver::new();
        let path = normalize_path(
            "/about.html.en",
            None,
            &[".html".to_string()],
            &["en".to_string(), "de".to_string()],
        );
        let hit = r.resolve(&db, &path, Some("de")).await.unwrap().unwrap();
        assert_eq!(hit.target, "/de/about");
        assert_eq!(hit.shape, RedirectShape::Exact);
    }

    #[tokio::test]
    async fn exact_phase_runs_once_per_request() {
        let db = db_with(&[("/a", "/b", 301)]).await;
        let mut r = RedirectResolver::new();
        assert!(r.resolve(&db, &path("/a"), None).await.unwrap().is_some());
        assert!(r.resolve(&db, &path("/a"), None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn nothing_stored() {
        let db = db_with(&[]).await;
        let mut r = RedirectResolver::new();
        assert!(r
            .resolve(&db, &path("/definitely/not/stored"), None)
            .await
            .unwrap()
            .is_none());
    }
}
