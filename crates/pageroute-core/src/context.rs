//! Immutable per-request resolution context.
//!
//! Built once per request from `RouterConfig` and passed into every engine
//! call; nothing in the engine caches configuration across requests.

use crate::config::RouterConfig;
use crate::matcher::MatchOptions;
use crate::normalize::NormalizedPath;
use crate::placeholder::{HandlerRegistry, PlaceholderDictionary};

#[derive(Debug, Clone)]
pub struct ResolveContext {
    pub dictionary: PlaceholderDictionary,
    pub handlers: HandlerRegistry,
    pub options: MatchOptions,
    pub suffixes: Vec<String>,
    pub languages: Vec<String>,
    pub default_language: String,
    pub language_query_key: String,
    pub include_unpublished: bool,
}

impl Default for ResolveContext {
    fn default() -> Self {
        Self::from_config(&RouterConfig::default())
    }
}

impl ResolveContext {
    pub fn from_config(cfg: &RouterConfig) -> Self {
        Self {
            dictionary: PlaceholderDictionary::from_table(&cfg.effective_placeholders()),
            handlers: HandlerRegistry::with_builtins(),
            options: MatchOptions {
                extension_matching: cfg.extension_matching,
                max_combination_segments: cfg.max_combination_segments,
                catch_all: cfg.catch_all,
            },
            suffixes: cfg.suffixes.clone(),
            languages: cfg.languages.clone(),
            default_language: cfg.default_language.clone(),
            language_query_key: cfg.language_query_key.clone(),
            include_unpublished: cfg.include_unpublished,
        }
    }

    pub fn with_dictionary(mut self, dictionary: PlaceholderDictionary) -> Self {
        self.dictionary = dictionary;
        self
    }

    pub fn with_handlers(mut self, handlers: HandlerRegistry) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Language explicitly named by the query string, if it is a known one.
    pub fn query_language<'a>(&self, path: &'a NormalizedPath) -> Option<&'a str> {
        path.query_value(&self.language_query_key)
            .filter(|l| self.languages.iter().any(|k| k == l))
    }

    /// Request language: composite suffix, then query string, then default.
    pub fn request_language(&self, path: &NormalizedPath) -> String {
        path.suffix_language
            .as_deref()
            .or_else(|| self.query_language(path))
            .unwrap_or(self.default_language.as_str())
            .to_string()
    }
}
