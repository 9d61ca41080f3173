//! Immutable views over the full entry set.

use crate::entry::{Category, Entry};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Every entry known at one point in time, keyed by id.
///
/// Snapshots are never mutated after construction. Consumers share them
/// through an `Arc`; picking up new data means building a new snapshot and
/// swapping the pointer.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    entries: BTreeMap<String, Entry>,
}

/// A snapshot shared between the index and the checker.
pub type SharedSnapshot = Arc<Snapshot>;

impl Snapshot {
    /// Builds a snapshot. Later entries win when ids collide.
    pub fn new(entries: impl IntoIterator<Item = Entry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| (entry.id.clone(), entry))
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Iterates entries in id order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Iterates entries of one category in id order.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries
            .values()
            .filter(move |entry| entry.category.is(category))
    }

    /// Counts entries per category.
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for entry in self.entries.values() {
            *counts.entry(entry.category.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Wraps the snapshot for sharing.
    pub fn into_shared(self) -> SharedSnapshot {
        Arc::new(self)
    }
}

impl FromIterator<Entry> for Snapshot {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_lookup_and_counts() {
        let snapshot: Snapshot = vec![
            Entry::new("b", "Bram", Category::characters()),
            Entry::new("a", "Astrallum", Category::locations()),
            Entry::new("c", "Cinder", Category::characters()),
        ]
        .into_iter()
        .collect();

        assert_eq!(snapshot.len(), 3);
        assert!(snapshot.contains("a"));
        assert!(!snapshot.contains("z"));

        let ids: Vec<&str> = snapshot.entries().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        let counts = snapshot.category_counts();
        assert_eq!(counts[&Category::characters()], 2);
        assert_eq!(counts[&Category::locations()], 1);

        assert_eq!(snapshot.in_category(Category::CHARACTERS).count(), 2);
    }
}
