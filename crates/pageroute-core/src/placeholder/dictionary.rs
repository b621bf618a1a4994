//! Placeholder name -> admissible literal values.

use std::collections::{BTreeMap, BTreeSet};

/// Immutable mapping from placeholder name to the literals it recognizes.
///
/// Names iterate in sorted order so expansion is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderDictionary {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl PlaceholderDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dictionary from a config table. Empty names and values are dropped.
    pub fn from_table(table: &BTreeMap<String, Vec<String>>) -> Self {
        let mut dict = Self::new();
        for (name, values) in table {
            dict = dict.with(name, values.iter().map(String::as_str));
        }
        dict
    }

    pub fn with<'a>(mut self, name: &str, values: impl IntoIterator<Item = &'a str>) -> Self {
        if name.is_empty() {
            return self;
        }
        let set = self.entries.entry(name.to_string()).or_default();
        set.extend(values.into_iter().filter(|v| !v.is_empty()).map(str::to_string));
        self
    }

    /// Placeholder names that accept `literal`, in name order.
    pub fn names_for<'a>(&'a self, literal: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(_, values)| values.contains(literal))
            .map(|(name, _)| name.as_str())
    }

}
