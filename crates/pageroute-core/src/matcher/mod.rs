//! Wildcard candidate generation.
//!
//! Every placeholder variant is coarsened by the cut state machine into
//! wildcard patterns; the union is ordered from most to least specific and
//! handed to the ranker as one batch.
//!
//! # Order
//!
//! ```text
//! level 0   /a/b/c   /%language%/b/c   /a/*/c ...   (nothing absorbed)
//! level 1   /a/b/*   ...                            (one trailing segment)
//! ...
//! level n   /*
//! last      *                                        (catch-all)
//! ```
//!
//! Within a level, fewer internal wildcards come first, then variant order,
//! then the cut counter's order.

mod cut;
mod extension;

pub use cut::{Cut, CutState, Step};
pub use extension::split_extension;

use crate::error::RouteError;
use crate::placeholder::Variant;

/// Wildcard marker in stored identifiers.
pub const WILDCARD: &str = "*";

/// Knobs for candidate generation (from `RouterConfig`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    pub extension_matching: bool,
    pub max_combination_segments: usize,
    pub catch_all: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            extension_matching: true,
            max_combination_segments: 6,
            catch_all: true,
        }
    }
}

/// A literal segment consumed by a wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub position: usize,
    pub value: String,
}

/// One pattern to look up, with everything needed to bind parameters if it wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub identifier: String,
    /// Index into the variant list it was generated from.
    pub variant: usize,
    pub level: usize,
    pub tier: usize,
    pub captures: Vec<Capture>,
    /// Extension split off the captured last segment.
    pub extension: Option<String>,
}

/// Builds the full, ordered candidate list for `variants` (index 0 = plain key).
///
/// Fails only if a cut state machine overruns its step budget.
pub fn generate_candidates(
    variants: &[Variant],
    options: &MatchOptions,
) -> Result<Vec<Candidate>, RouteError> {
    let mut out = Vec::new();
    for (index, variant) in variants.iter().enumerate() {
        cut_variant(index, variant, options, &mut out)?;
    }
    // Stable: variant order and counter order survive inside a (level, tier).
    out.sort_by_key(|c| (c.level, c.tier));

    if options.catch_all {
        if let Some(plain) = variants.first() {
            let all = plain.segments.len();
            let (captures, extension) = capture_range(plain, 0..all, options);
            out.push(Candidate {
                identifier: WILDCARD.to_string(),
                variant: 0,
                level: all + 1,
                tier: 0,
                captures,
                extension,
            });
        }
    }
    Ok(out)
}

fn cut_variant(
    index: usize,
    variant: &Variant,
    options: &MatchOptions,
    out: &mut Vec<Candidate>,
) -> Result<(), RouteError> {
    let mut state = CutState::new(variant, options.max_combination_segments);
    let budget = state.step_budget();
    let mut steps = 0;
    loop {
        steps += 1;
        if steps > budget {
            return Err(RouteError::NoProgress {
                key: variant.segments.join("/"),
                steps,
            });
        }
        match state.step() {
            Step::Emit(cut) => push_cut(index, variant, cut, options, out),
            Step::Skip => {}
            Step::Done => return Ok(()),
        }
    }
}

fn push_cut(
    index: usize,
    variant: &Variant,
    cut: Cut,
    options: &MatchOptions,
    out: &mut Vec<Candidate>,
) {
    let n = variant.segments.len();
    let kept = n - cut.trailing;
    let mut parts = Vec::with_capacity(kept + 1);
    let mut captures = Vec::new();
    for i in 0..kept {
        if cut.covers(i) {
            parts.push(WILDCARD.to_string());
            captures.push(Capture {
                position: i,
                value: variant.segments[i].clone(),
            });
        } else {
            parts.push(variant.pattern_segment(i));
        }
    }

    if cut.trailing == 0 {
        out.push(Candidate {
            identifier: identifier(&parts),
            variant: index,
            level: 0,
            tier: cut.tier(),
            captures,
            extension: None,
        });
        return;
    }

    let (tail, extension) = capture_range(variant, kept..n, options);
    captures.extend(tail);
    if let Some(ext) = &extension {
        // `prefix/*.ext` is tried before the plain `prefix/*`.
        let mut typed = parts.clone();
        typed.push(format!("{WILDCARD}.{ext}"));
        out.push(Candidate {
            identifier: identifier(&typed),
            variant: index,
            level: cut.trailing,
            tier: cut.tier(),
            captures: captures.clone(),
            extension: extension.clone(),
        });
    }
    parts.push(WILDCARD.to_string());
    out.push(Candidate {
        identifier: identifier(&parts),
        variant: index,
        level: cut.trailing,
        tier: cut.tier(),
        captures,
        extension,
    });
}

/// Captures `range` of the variant; the last segment of the key is split into
/// stem and extension when extension matching is on.
fn capture_range(
    variant: &Variant,
    range: std::ops::Range<usize>,
    options: &MatchOptions,
) -> (Vec<Capture>, Option<String>) {
    let n = variant.segments.len();
    let mut extension = None;
    let captures = range
        .map(|i| {
            let value = &variant.segments[i];
            if options.extension_matching && i + 1 == n {
                if let Some((stem, ext)) = split_extension(value) {
                    extension = Some(ext.to_string());
                    return Capture {
                        position: i,
                        value: stem.to_string(),
                    };
                }
            }
            Capture {
                position: i,
                value: value.clone(),
            }
        })
        .collect();
    (captures, extension)
}

fn identifier(parts: &[String]) -> String {
    format!("/{}", parts.join("/"))
}
