//! Request path normalization.
//!
//! Turns a raw request path (absolute URL or bare path, optional query string)
//! into the lookup key the matcher works on: no scheme/host, no leading or
//! trailing slash, known suffixes such as `.html` or `.html.de` removed.

mod query;
mod suffix;

pub use query::parse_query;
pub use suffix::strip_known_suffix;

/// Canonical lookup key plus what was removed to get there.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedPath {
    /// Bare key, e.g. `blog/post-1`. The root path is the empty key.
    pub key: String,
    /// Path after host/slash stripping but before suffix removal.
    pub original: String,
    /// Number of bytes the suffix strip removed from the end of `original`.
    pub suffix_len: usize,
    /// Language named by a composite suffix (`.html.de`), if any.
    pub suffix_language: Option<String>,
    /// Decoded query string pairs in request order.
    pub query: Vec<(String, String)>,
}

impl NormalizedPath {
    /// The stripped suffix, e.g. `.html.de`; empty when nothing was stripped.
    pub fn suffix(&self) -> &str {
        &self.original[self.original.len() - self.suffix_len..]
    }

    /// First query value for `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn segments(&self) -> Vec<&str> {
        if self.key.is_empty() {
            Vec::new()
        } else {
            self.key.split('/').collect()
        }
    }
}

/// Normalizes `raw` into a lookup key.
///
/// `query` overrides any `?...` part embedded in `raw`. Never fails: bytes the
/// parser does not understand are passed through as-is.
pub fn normalize_path(
    raw: &str,
    query: Option<&str>,
    suffixes: &[String],
    languages: &[String],
) -> NormalizedPath {
    let without_host = strip_scheme_and_host(raw);
    let without_fragment = without_host
        .split_once('#')
        .map_or(without_host, |(p, _)| p);
    let (path, embedded_query) = match without_fragment.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (without_fragment, None),
    };

    let original = path.trim_matches('/').to_string();
    let (stripped, suffix_language) = strip_known_suffix(&original, suffixes, languages);
    let key = stripped.trim_end_matches('/').to_string();
    let suffix_len = original.len() - key.len();

    NormalizedPath {
        key,
        original,
        suffix_len,
        suffix_language,
        query: query.or(embedded_query).map(parse_query).unwrap_or_default(),
    }
}

fn strip_scheme_and_host(raw: &str) -> &str {
    let Some(idx) = raw.find("://") else {
        return raw;
    };
    // Only treat it as a scheme if nothing before it looks like a path.
    if raw[..idx].contains(['/', '?']) {
        return raw;
    }
    let after = &raw[idx + 3..];
    match after.find(['/', '?', '#']) {
        Some(p) => &after[p..],
        None => "",
    }
}
