//! Placeholder variant generation.

use super::dictionary::PlaceholderDictionary;
use super::{placeholder_token, LANGUAGE_PLACEHOLDER};

/// A literal segment replaced by a placeholder token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedPlaceholder {
    pub name: String,
    /// Segment index in the lookup key.
    pub position: usize,
    /// The literal the token replaced (the leftover).
    pub value: String,
}

/// One path variant to run through wildcard cutting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// Segments; the placeholder position (if any) still holds the literal.
    pub segments: Vec<String>,
    pub placeholder: Option<AppliedPlaceholder>,
}

impl Variant {
    pub fn plain(segments: Vec<String>) -> Self {
        Self {
            segments,
            placeholder: None,
        }
    }

    pub fn placeholder_position(&self) -> Option<usize> {
        self.placeholder.as_ref().map(|p| p.position)
    }

    /// Literal consumed by a `%language%` token, if this variant applies one.
    pub fn language(&self) -> Option<&str> {
        self.placeholder
            .as_ref()
            .filter(|p| p.name == LANGUAGE_PLACEHOLDER)
            .map(|p| p.value.as_str())
    }

    /// Segment text as it appears in a pattern (token at the placeholder position).
    pub fn pattern_segment(&self, index: usize) -> String {
        match &self.placeholder {
            Some(p) if p.position == index => placeholder_token(&p.name),
            _ => self.segments[index].clone(),
        }
    }
}

/// Expands `key` into placeholder variants.
///
/// Index 0 is always the unmodified key. Every (segment, name) pair where the
/// dictionary lists the segment under that name adds exactly one variant with
/// that single segment replaced, in segment order then name order. Two
/// placeholders are never applied to the same variant.
pub fn expand_placeholders(key: &str, dict: &PlaceholderDictionary) -> Vec<Variant> {
    let segments: Vec<String> = if key.is_empty() {
        Vec::new()
    } else {
        key.split('/').map(str::to_string).collect()
    };

    let mut out = vec![Variant::plain(segments.clone())];
    for (position, literal) in segments.iter().enumerate() {
        for name in dict.names_for(literal) {
            out.push(Variant {
                segments: segments.clone(),
                placeholder: Some(AppliedPlaceholder {
                    name: name.to_string(),
                    position,
                    value: literal.clone(),
                }),
            });
        }
    }
    out
}
