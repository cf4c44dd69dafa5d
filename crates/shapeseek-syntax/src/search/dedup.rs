//! Per-file match deduplication.

use std::collections::HashSet;

use shapeseek_core::Match;

/// Removes matches covering the same byte range and orders the rest.
///
/// The first match for each `(start, end)` offset pair is kept. Survivors
/// are sorted by start offset ascending, then end offset descending, so
/// enclosing matches precede the matches nested inside them. Applying the
/// function twice yields the same list.
#[must_use]
pub fn dedup_matches(matches: Vec<Match>) -> Vec<Match> {
    let mut seen = HashSet::new();
    let mut unique: Vec<Match> = matches
        .into_iter()
        .filter(|found| seen.insert((found.start.offset, found.end.offset)))
        .collect();
    unique.sort_by(|a, b| {
        a.start
            .offset
            .cmp(&b.start.offset)
            .then_with(|| b.end.offset.cmp(&a.end.offset))
    });
    unique
}
