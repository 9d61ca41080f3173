//! Fuzzy search index over entry text.
//!
//! Each entry is projected once into an `IndexedEntry` holding lower-cased
//! copies of the fields the scorer compares, plus a single searchable-text
//! blob. The index is rebuilt wholesale from a snapshot, never patched.

use crate::fuzzy::{partial_ratio, ratio};
use lorekeep_core::{Category, Entry, Snapshot};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Weight of the name term in the relevance score.
const NAME_WEIGHT: f64 = 2.0;

/// Weight of the description term.
const DESCRIPTION_WEIGHT: f64 = 1.5;

/// Weight of each tag term.
const TAG_WEIGHT: f64 = 1.2;

/// Weight of the full searchable-text term.
const TEXT_WEIGHT: f64 = 1.0;

/// An entry's searchable projection.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedEntry {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub tags: BTreeSet<String>,
    /// Lower-cased concatenation of every searchable field.
    pub searchable_text: String,
    name_lower: String,
    description_lower: String,
    tags_lower: Vec<String>,
}

impl IndexedEntry {
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            category: entry.category.clone(),
            description: entry.description.clone(),
            tags: entry.tags.clone(),
            searchable_text: searchable_text(entry),
            name_lower: entry.name.to_lowercase(),
            description_lower: entry.description.to_lowercase(),
            tags_lower: entry.tags.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    /// Weighted-average fuzzy relevance of a lower-cased query.
    ///
    /// One term each for name, description and full text, plus one per tag.
    /// Averaging keeps tag-heavy entries from winning on tag count alone.
    pub fn relevance(&self, query: &str) -> f64 {
        let mut scores = Vec::with_capacity(3 + self.tags_lower.len());

        scores.push(partial_ratio(query, &self.name_lower) * NAME_WEIGHT);
        scores.push(partial_ratio(query, &self.description_lower) * DESCRIPTION_WEIGHT);
        for tag in &self.tags_lower {
            scores.push(ratio(query, tag) * TAG_WEIGHT);
        }
        scores.push(partial_ratio(query, &self.searchable_text) * TEXT_WEIGHT);

        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// Builds the lower-cased searchable text of an entry.
///
/// Name, description, tags, subcategory and every scalar or list-of-scalar
/// custom field, in that order, skipping empty parts.
pub fn searchable_text(entry: &Entry) -> String {
    let mut parts: Vec<String> = vec![
        entry.name.clone(),
        entry.description.clone(),
        entry
            .tags
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" "),
        entry.subcategory.clone().unwrap_or_default(),
    ];

    for value in entry.custom_fields.values() {
        parts.extend(value.searchable_parts());
    }

    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// A ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub tags: BTreeSet<String>,
    pub score: f64,
}

impl SearchHit {
    fn new(entry: &IndexedEntry, score: f64) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            category: entry.category.clone(),
            description: entry.description.clone(),
            tags: entry.tags.clone(),
            score,
        }
    }
}

/// Optional narrowing applied before scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// Exact category match.
    pub category: Option<String>,
    /// Entry must carry at least one of these tags.
    pub tags: Vec<String>,
}

impl SearchFilter {
    fn accepts(&self, entry: &IndexedEntry) -> bool {
        if let Some(category) = &self.category {
            if !entry.category.is(category) {
                return false;
            }
        }
        self.tags.is_empty() || self.tags.iter().any(|tag| entry.tags.contains(tag))
    }
}

/// A fuzzy index over one snapshot.
#[derive(Debug, Default, Clone)]
pub struct FuzzyIndex {
    /// Entries in snapshot (id) order.
    entries: Vec<IndexedEntry>,
    /// Maps ids to positions in `entries`.
    positions: HashMap<String, usize>,
}

impl FuzzyIndex {
    /// Indexes every entry of a snapshot.
    pub fn build(snapshot: &Snapshot) -> Self {
        let entries: Vec<IndexedEntry> = snapshot.entries().map(IndexedEntry::from_entry).collect();
        let positions = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.id.clone(), position))
            .collect();
        Self { entries, positions }
    }

    pub fn get(&self, id: &str) -> Option<&IndexedEntry> {
        self.positions.get(id).map(|&position| &self.entries[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexedEntry> {
        self.entries.iter()
    }

    /// Scores every entry passing `filter` against `query`.
    ///
    /// Keeps scores of at least `min_score`, best first (ties keep index
    /// order), at most `limit` of them. A blank query matches nothing.
    pub fn search(
        &self,
        query: &str,
        filter: &SearchFilter,
        min_score: f64,
        limit: usize,
    ) -> Vec<SearchHit> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let query = query.to_lowercase();

        let mut hits: Vec<SearchHit> = self
            .entries
            .iter()
            .filter(|entry| filter.accepts(entry))
            .filter_map(|entry| {
                let score = entry.relevance(&query);
                (score >= min_score).then(|| SearchHit::new(entry, score))
            })
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(limit);
        hits
    }

    /// Returns the number of entries indexed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
