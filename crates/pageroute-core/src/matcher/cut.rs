//! Counter-driven cut state machine for one variant.
//!
//! Levels run from 0 (nothing cut) to the deepest trailing cut the variant
//! allows. Each level first yields its primary cut (only the trailing `*`),
//! then walks a counter over at most `(kept - 1) * kept` internal
//! assignments. An assignment is a set of kept segments that each become a
//! single-segment `*`; sets may sit on both sides of a placeholder. Smaller
//! sets come first, and within one size the set reaching furthest right
//! comes first. Every `step` bumps either the counter or the level, so the
//! machine always terminates.

use crate::placeholder::Variant;

/// Widest variant that can still get internal assignments (one bit per segment).
const MAX_MASK_SEGMENTS: usize = 64;

/// What one emitted cut replaces with wildcards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cut {
    /// Trailing segments absorbed by a final `*`.
    pub trailing: usize,
    /// Bit `i` set: kept segment `i` becomes a single-segment `*`.
    pub wildcards: u64,
}

impl Cut {
    pub fn primary(trailing: usize) -> Self {
        Self {
            trailing,
            wildcards: 0,
        }
    }

    /// Cut with single-segment wildcards at `positions`.
    pub fn with_wildcards(trailing: usize, positions: &[usize]) -> Self {
        Self {
            trailing,
            wildcards: positions.iter().fold(0u64, |mask, &p| mask | 1 << p),
        }
    }

    /// Number of internal wildcards.
    pub fn tier(&self) -> usize {
        self.wildcards.count_ones() as usize
    }

    pub fn covers(&self, index: usize) -> bool {
        index < MAX_MASK_SEGMENTS && (self.wildcards >> index) & 1 == 1
    }
}

/// Result of a single state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Emit(Cut),
    /// Moved to the next level without emitting.
    Skip,
    Done,
}

#[derive(Debug, Clone)]
pub struct CutState {
    segment_count: usize,
    max_trailing: usize,
    placeholder: Option<usize>,
    combine: bool,
    trailing: usize,
    counter: usize,
    /// Internal assignments for the current level, in emission order.
    pending: Vec<u64>,
}

impl CutState {
    /// `combine_limit`: variants longer than this only get primary cuts.
    pub fn new(variant: &Variant, combine_limit: usize) -> Self {
        let segment_count = variant.segments.len();
        let placeholder = variant.placeholder_position();
        // A trailing cut never swallows the placeholder token.
        let max_trailing = match placeholder {
            Some(p) => segment_count - (p + 1),
            None => segment_count,
        };
        Self {
            segment_count,
            max_trailing,
            placeholder,
            combine: segment_count <= combine_limit.min(MAX_MASK_SEGMENTS),
            trailing: 0,
            counter: 0,
            pending: Vec::new(),
        }
    }

    /// Internal assignments tried at the current level, at most.
    pub fn combination_bound(&self) -> usize {
        if !self.combine {
            return 0;
        }
        let kept = self.segment_count - self.trailing;
        kept.saturating_sub(1) * kept
    }

    /// Upper bound on `step` calls before `Done`.
    pub fn step_budget(&self) -> usize {
        let n = self.segment_count;
        (self.max_trailing + 1) * (n.saturating_sub(1) * n + 2) + 1
    }

    pub fn step(&mut self) -> Step {
        if self.trailing > self.max_trailing {
            return Step::Done;
        }
        if self.counter == 0 {
            self.counter = 1;
            self.pending = self.level_assignments();
            return Step::Emit(Cut::primary(self.trailing));
        }

        match self.pending.get(self.counter - 1) {
            Some(&wildcards) => {
                self.counter += 1;
                Step::Emit(Cut {
                    trailing: self.trailing,
                    wildcards,
                })
            }
            None => {
                self.trailing += 1;
                self.counter = 0;
                self.pending.clear();
                Step::Skip
            }
        }
    }

    fn level_assignments(&self) -> Vec<u64> {
        let bound = self.combination_bound();
        if bound == 0 {
            return Vec::new();
        }
        let kept = self.segment_count - self.trailing;
        // With no trailing `*` the last kept segment stays literal, otherwise
        // a set containing it would repeat a deeper level's pattern.
        let limit = if self.trailing == 0 { kept - 1 } else { kept };
        let eligible: Vec<usize> = (0..limit)
            .rev()
            .filter(|&i| Some(i) != self.placeholder)
            .collect();
        subsets_by_size(&eligible, bound)
    }
}

/// Up to `bound` non-empty subsets of `positions` (given rightmost first) as
/// bitmasks, ordered by size, then lexicographically over `positions`.
fn subsets_by_size(positions: &[usize], bound: usize) -> Vec<u64> {
    let m = positions.len();
    let mut out = Vec::new();
    for size in 1..=m {
        let mut idx: Vec<usize> = (0..size).collect();
        loop {
            if out.len() >= bound {
                return out;
            }
            out.push(idx.iter().fold(0u64, |mask, &i| mask | 1 << positions[i]));
            let Some(i) = (0..size).rev().find(|&i| idx[i] < m - size + i) else {
                break;
            };
            idx[i] += 1;
            for j in i + 1..size {
                idx[j] = idx[j - 1] + 1;
            }
        }
    }
    out
}
