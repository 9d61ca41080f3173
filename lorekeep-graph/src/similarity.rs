//! Content similarity between entries, for "see also" suggestions.

use crate::fuzzy::ratio;
use crate::search_index::IndexedEntry;

/// Suggestions must score strictly above this.
pub const SUGGESTION_THRESHOLD: f64 = 0.3;

/// Weight of the tag Jaccard term.
const TAG_WEIGHT: f64 = 2.0;

/// Similarity of two indexed entries.
///
/// Mean of whichever terms apply: tag Jaccard (skipped when neither entry
/// has tags), a same-category bonus (skipped when categories differ) and
/// whole-text similarity. Skipped terms shrink the denominator rather than
/// counting as zero. Symmetric in its arguments.
pub fn similarity(a: &IndexedEntry, b: &IndexedEntry) -> f64 {
    let mut scores = Vec::with_capacity(3);

    if !a.tags.is_empty() || !b.tags.is_empty() {
        let shared = a.tags.intersection(&b.tags).count() as f64;
        let union = a.tags.union(&b.tags).count() as f64;
        scores.push(shared / union * TAG_WEIGHT);
    }

    if a.category == b.category {
        scores.push(1.0);
    }

    scores.push(ratio(&a.searchable_text, &b.searchable_text) / 100.0);

    scores.iter().sum::<f64>() / scores.len() as f64
}
