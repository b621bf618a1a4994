//! Parameter binding for the winning candidate.
//!
//! Literals consumed by placeholder substitution and by wildcard cuts are put
//! back together in path order (not capture order) and joined with `/`.

use crate::matcher::Candidate;
use crate::normalize::NormalizedPath;
use crate::placeholder::Variant;
use crate::store::PageRecord;

/// The resolved page handed to the rendering and caching collaborators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPage {
    /// Stored identifier that matched, e.g. `/blog/*`.
    pub identifier: String,
    /// Bound literals joined with `/`, e.g. `2024/post-1`.
    pub parameter: String,
    /// Bound literals in path order.
    pub parameters: Vec<String>,
    /// Extension split off a `file.ext` request (extension-aware branch).
    pub extension: Option<String>,
    /// `(name, literal)` for each placeholder applied to the winner.
    pub placeholders: Vec<(String, String)>,
    pub language: String,
    /// Request query pairs whose key is whitelisted by the page.
    pub query: Vec<(String, String)>,
    /// Canonical request path with the page's ending policy applied.
    pub resolved_path: String,
    /// Generation index of the winning candidate (lower = more specific).
    pub rank: usize,
    pub record: PageRecord,
}

impl ResolvedPage {
    pub fn content(&self) -> &str {
        &self.record.content
    }
}

/// Builds the resolved page for `candidate` (generated from `variant`).
pub fn bind_parameters(
    candidate: &Candidate,
    variant: &Variant,
    rank: usize,
    record: &PageRecord,
    path: &NormalizedPath,
    language: &str,
) -> ResolvedPage {
    let mut pieces: Vec<(usize, &str)> = candidate
        .captures
        .iter()
        .map(|c| (c.position, c.value.as_str()))
        .collect();
    if let Some(p) = &variant.placeholder {
        pieces.push((p.position, p.value.as_str()));
    }
    pieces.sort_by_key(|(position, _)| *position);
    let parameters: Vec<String> = pieces.into_iter().map(|(_, v)| v.to_string()).collect();

    let placeholders = variant
        .placeholder
        .iter()
        .map(|p| (p.name.clone(), p.value.clone()))
        .collect();

    ResolvedPage {
        identifier: candidate.identifier.clone(),
        parameter: parameters.join("/"),
        parameters,
        extension: candidate.extension.clone(),
        placeholders,
        language: language.to_string(),
        query: whitelisted_query(&path.query, &record.parameters),
        resolved_path: resolved_path(&path.key, &record.ending),
        rank,
        record: record.clone(),
    }
}

fn whitelisted_query(query: &[(String, String)], allowed: &[String]) -> Vec<(String, String)> {
    query
        .iter()
        .filter(|(k, _)| allowed.iter().any(|a| a == k))
        .cloned()
        .collect()
}

/// `/key` plus the ending policy (`""`, `"/"`, `".html"`, ...). Root stays `/`.
fn resolved_path(key: &str, ending: &str) -> String {
    if key.is_empty() {
        return "/".to_string();
    }
    format!("/{key}{ending}")
}
