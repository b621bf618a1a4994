//! Candidate ranking: one batched lookup, lowest generation index wins.

use std::collections::HashMap;
use std::collections::HashSet;

use crate::matcher::Candidate;
use crate::store::PageRecord;

/// Deduplicated identifiers in generation order (first occurrence kept).
pub fn unique_identifiers(candidates: &[Candidate]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(candidates.len());
    candidates
        .iter()
        .filter(|c| seen.insert(c.identifier.as_str()))
        .map(|c| c.identifier.clone())
        .collect()
}

/// Winning record and the candidate that produced it.
#[derive(Debug, Clone, Copy)]
pub struct Winner<'a> {
    pub candidate: &'a Candidate,
    /// Index of `candidate` in generation order.
    pub rank: usize,
    pub record: &'a PageRecord,
}

/// Picks the record whose identifier was generated first.
///
/// Rows with the same identifier prefer `language`, then a row with no
/// language, then store order. Unpublished rows are skipped unless
/// `include_unpublished` is set. Returns `None` when nothing usable matched.
pub fn pick_winner<'a>(
    candidates: &'a [Candidate],
    records: &'a [PageRecord],
    language: &str,
    include_unpublished: bool,
) -> Option<Winner<'a>> {
    pick_winner_with(candidates, records, |_| language, include_unpublished)
}

/// Like [`pick_winner`], with the preferred row language taken per candidate
/// (a `%language%` match prefers the literal it consumed).
pub fn pick_winner_with<'a, 'l>(
    candidates: &'a [Candidate],
    records: &'a [PageRecord],
    language_of: impl Fn(&Candidate) -> &'l str,
    include_unpublished: bool,
) -> Option<Winner<'a>> {
    let mut first_index: HashMap<&str, usize> = HashMap::with_capacity(candidates.len());
    for (i, c) in candidates.iter().enumerate() {
        first_index.entry(c.identifier.as_str()).or_insert(i);
    }

    let mut best: Option<((usize, u8, usize), Winner<'a>)> = None;
    for (row, record) in records.iter().enumerate() {
        if !record.live && !include_unpublished {
            continue;
        }
        let Some(&rank) = first_index.get(record.identifier.as_str()) else {
            tracing::warn!("store returned unrequested identifier {:?}", record.identifier);
            continue;
        };
        let candidate = &candidates[rank];
        let lang_score = if record.language == language_of(candidate) {
            0
        } else if record.language.is_empty() {
            1
        } else {
            2
        };
        let key = (rank, lang_score, row);
        if best.as_ref().map_or(true, |(k, _)| key < *k) {
            best = Some((
                key,
                Winner {
                    candidate,
                    rank,
                    record,
                },
            ));
        }
    }
    best.map(|(_, w)| w)
}
