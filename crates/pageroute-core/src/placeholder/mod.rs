//! Named placeholders (`%language%`, ...) and variant expansion.
//!
//! A placeholder stands for one of a known set of literal values at a single
//! path segment. Expansion turns `de/about` into `%language%/about` and keeps
//! `de` as a leftover so it can be restored as a parameter after matching.

mod dictionary;
mod expand;
mod handler;

pub use dictionary::PlaceholderDictionary;
pub use expand::{expand_placeholders, AppliedPlaceholder, Variant};
pub use handler::{HandlerRegistry, LanguageHandler, PlaceholderHandler};

/// Placeholder whose literal names the page language.
pub const LANGUAGE_PLACEHOLDER: &str = "language";

/// Marker wrapping placeholder names in stored identifiers.
pub const PLACEHOLDER_MARK: char = '%';

/// Stored form of a placeholder name, e.g. `%language%`.
pub fn placeholder_token(name: &str) -> String {
    format!("{PLACEHOLDER_MARK}{name}{PLACEHOLDER_MARK}")
}
