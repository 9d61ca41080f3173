//! The search-side view of one snapshot.
//!
//! A `LoreIndex` owns the relationship graph and the fuzzy index built from
//! the same snapshot. Both are rebuilt together on `refresh`; a refresh
//! builds the new state completely before replacing the old one.

use crate::builder::GraphBuilder;
use crate::edge::GraphEdge;
use crate::graph::LoreGraph;
use crate::search_index::{FuzzyIndex, SearchFilter, SearchHit};
use crate::similarity::{similarity, SUGGESTION_THRESHOLD};
use lorekeep_core::{Entry, EntrySource, Result, SearchSettings, SharedSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info};

/// An entry reached by following relationships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedEntry {
    pub entry: Entry,
    /// Type of the edge that first reached the entry.
    pub relationship_type: String,
    pub strength: f64,
    pub description: String,
    pub depth: usize,
}

/// A content-similar entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub entry: Entry,
    pub similarity_score: f64,
}

/// Index statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexStatistics {
    pub total_entries: usize,
    pub counts_by_category: BTreeMap<String, usize>,
    /// Every relationship, dangling ones included.
    pub total_relationship_edges: usize,
    /// Entries with no relationships in or out.
    pub orphaned_entry_ids: Vec<String>,
}

/// Fuzzy search and relationship queries over one snapshot.
#[derive(Debug, Clone)]
pub struct LoreIndex {
    snapshot: SharedSnapshot,
    graph: LoreGraph,
    fuzzy: FuzzyIndex,
    settings: SearchSettings,
}

impl LoreIndex {
    /// Builds the graph and fuzzy index for a snapshot.
    pub fn new(snapshot: SharedSnapshot, settings: SearchSettings) -> Self {
        let graph = GraphBuilder::new().build(&snapshot);
        let fuzzy = FuzzyIndex::build(&snapshot);
        debug!(
            "Indexed {} entries, {} relationship edges",
            fuzzy.len(),
            graph.edge_count()
        );
        Self {
            snapshot,
            graph,
            fuzzy,
            settings,
        }
    }

    /// Loads a snapshot from `source` and indexes it.
    pub fn from_source(source: &dyn EntrySource, settings: SearchSettings) -> Result<Self> {
        let snapshot = source.load()?.into_shared();
        Ok(Self::new(snapshot, settings))
    }

    /// Reloads from `source` and rebuilds everything.
    ///
    /// Must be called after any change to the underlying entries. On error
    /// the previous state is kept.
    pub fn refresh(&mut self, source: &dyn EntrySource) -> Result<()> {
        let snapshot = source.load()?.into_shared();
        self.replace_snapshot(snapshot);
        Ok(())
    }

    /// Swaps in an already loaded snapshot.
    pub fn replace_snapshot(&mut self, snapshot: SharedSnapshot) {
        *self = Self::new(snapshot, self.settings.clone());
        info!("Index refreshed: {} entries", self.snapshot.len());
    }

    pub fn snapshot(&self) -> &SharedSnapshot {
        &self.snapshot
    }

    /// Fuzzy search with optional category and tag filters.
    ///
    /// `limit` falls back to the configured `max_results`.
    pub fn search(
        &self,
        query: &str,
        category: Option<&str>,
        tags: &[String],
        limit: Option<usize>,
    ) -> Vec<SearchHit> {
        let filter = SearchFilter {
            category: category.map(str::to_string),
            tags: tags.to_vec(),
        };
        let min_score = self.settings.fuzzy_threshold * 100.0;
        let limit = limit.unwrap_or(self.settings.max_results);

        let hits = self.fuzzy.search(query, &filter, min_score, limit);
        debug!("Search {:?}: {} hits", query, hits.len());
        hits
    }

    /// Entries reachable from `entry_id` over outgoing relationships.
    pub fn related_to(
        &self,
        entry_id: &str,
        relationship_type: Option<&str>,
        max_depth: usize,
    ) -> Vec<RelatedEntry> {
        self.graph
            .traverse(entry_id, relationship_type, max_depth)
            .into_iter()
            .filter_map(|hop| {
                let id = self.graph.id_of(hop.node)?;
                let entry = self.snapshot.get(id)?;
                Some(RelatedEntry {
                    entry: entry.clone(),
                    relationship_type: hop.edge.relationship_type.clone(),
                    strength: hop.edge.strength,
                    description: hop.edge.description.clone(),
                    depth: hop.depth,
                })
            })
            .collect()
    }

    /// Entries most similar to `entry_id`, best first.
    pub fn suggest(&self, entry_id: &str, limit: usize) -> Vec<Suggestion> {
        let Some(source) = self.fuzzy.get(entry_id) else {
            return Vec::new();
        };

        let mut suggestions: Vec<Suggestion> = self
            .fuzzy
            .iter()
            .filter(|other| other.id != source.id)
            .filter_map(|other| {
                let score = similarity(source, other);
                if score <= SUGGESTION_THRESHOLD {
                    return None;
                }
                let entry = self.snapshot.get(&other.id)?;
                Some(Suggestion {
                    entry: entry.clone(),
                    similarity_score: score,
                })
            })
            .collect();

        suggestions.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));
        suggestions.truncate(limit);
        suggestions
    }

    /// Entry counts, edge count and fully disconnected entries.
    pub fn statistics(&self) -> IndexStatistics {
        IndexStatistics {
            total_entries: self.snapshot.len(),
            counts_by_category: self
                .snapshot
                .category_counts()
                .into_iter()
                .map(|(category, count)| (category.to_string(), count))
                .collect(),
            total_relationship_edges: self.graph.edge_count(),
            orphaned_entry_ids: self
                .graph
                .isolated_ids()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// Resolved edges among `ids`, or all resolved edges.
    pub fn subgraph_edges(&self, ids: Option<&[String]>) -> Vec<GraphEdge> {
        let ids: Option<HashSet<String>> = ids.map(|ids| ids.iter().cloned().collect());
        self.graph.export_edges(ids.as_ref())
    }
}
