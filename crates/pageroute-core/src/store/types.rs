//! Types read from the site database.

use serde::{Deserialize, Serialize};

/// Default status for redirect rows stored without one.
pub const DEFAULT_REDIRECT_CODE: u16 = 301;

/// A stored page. Read-only to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRecord {
    /// Pattern, e.g. `/blog/*` or `/%language%/about`.
    pub identifier: String,
    pub content: String,
    /// Publication flag.
    pub live: bool,
    /// Language code; empty for language-neutral pages.
    pub language: String,
    /// URL suffix policy appended to the resolved path (`""`, `"/"`, `".html"`).
    pub ending: String,
    /// Accepted query-string keys.
    pub parameters: Vec<String>,
}

/// A stored redirect. `*` at either end of `old_pattern` is a wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRecord {
    pub old_pattern: String,
    pub new_target: String,
    #[serde(default = "default_code")]
    pub http_code: u16,
}

fn default_code() -> u16 {
    DEFAULT_REDIRECT_CODE
}

/// The three redirect query shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectShape {
    /// Literal path.
    Exact,
    /// `prefix*` patterns.
    SuffixWildcard,
    /// `*suffix` patterns.
    PrefixWildcard,
}

impl RedirectShape {
    pub fn as_str(self) -> &'static str {
        match self {
            RedirectShape::Exact => "exact",
            RedirectShape::SuffixWildcard => "suffix-wildcard",
            RedirectShape::PrefixWildcard => "prefix-wildcard",
        }
    }
}
