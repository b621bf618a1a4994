//! Placeholder handlers: what a matched placeholder does to the resolved page.
//!
//! Handlers are looked up by placeholder name in an explicit registry.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::LANGUAGE_PLACEHOLDER;
use crate::bind::ResolvedPage;

/// Strategy run once per placeholder applied to the winning candidate.
pub trait PlaceholderHandler: Send + Sync {
    fn apply(&self, value: &str, page: &mut ResolvedPage);
}

/// `%language%`: the consumed literal becomes the page language.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageHandler;

impl PlaceholderHandler for LanguageHandler {
    fn apply(&self, value: &str, page: &mut ResolvedPage) {
        page.language = value.to_string();
    }
}

/// Placeholder name -> handler.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: BTreeMap<String, Arc<dyn PlaceholderHandler>>,
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in `language` handler.
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        reg.register(LANGUAGE_PLACEHOLDER, LanguageHandler);
        reg
    }

    pub fn register(&mut self, name: &str, handler: impl PlaceholderHandler + 'static) {
        self.handlers.insert(name.to_string(), Arc::new(handler));
    }

    pub fn get(&self, name: &str) -> Option<&dyn PlaceholderHandler> {
        self.handlers.get(name).map(|h| h.as_ref())
    }

    /// Runs the handler for `name`. Returns false when none is registered.
    pub fn dispatch(&self, name: &str, value: &str, page: &mut ResolvedPage) -> bool {
        match self.get(name) {
            Some(handler) => {
                handler.apply(value, page);
                true
            }
            None => {
                tracing::debug!("no handler registered for placeholder {:?}", name);
                false
            }
        }
    }
}
