//! Graph builder for constructing the relationship graph from a snapshot.
//!
//! The builder takes a snapshot and turns every relationship into an edge.
//! Filters restrict it to a purpose-built subgraph, such as the location
//! containment hierarchy the consistency checker walks.

use crate::edge::{DanglingEdge, RelationshipEdge};
use crate::graph::LoreGraph;
use lorekeep_core::{Entry, Relationship, Snapshot};
use tracing::debug;

type EntryFilter<'a> = Box<dyn Fn(&Entry) -> bool + 'a>;
type RelationshipFilter<'a> = Box<dyn Fn(&Relationship) -> bool + 'a>;

/// Builds a LoreGraph from a snapshot.
///
/// The builder handles the two-pass process:
/// 1. Add a node for every selected entry, edges or not
/// 2. Turn selected relationships into edges, recording dangling ones
pub struct GraphBuilder<'a> {
    entry_filter: EntryFilter<'a>,
    relationship_filter: RelationshipFilter<'a>,
}

impl Default for GraphBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> GraphBuilder<'a> {
    /// Creates a builder that keeps every entry and relationship.
    pub fn new() -> Self {
        Self {
            entry_filter: Box::new(|_| true),
            relationship_filter: Box::new(|_| true),
        }
    }

    /// Only entries matching `filter` become nodes.
    ///
    /// Relationships into filtered-out entries that do exist are dropped;
    /// they are not dangling.
    pub fn entries(mut self, filter: impl Fn(&Entry) -> bool + 'a) -> Self {
        self.entry_filter = Box::new(filter);
        self
    }

    /// Only relationships matching `filter` become edges.
    pub fn relationships(mut self, filter: impl Fn(&Relationship) -> bool + 'a) -> Self {
        self.relationship_filter = Box::new(filter);
        self
    }

    /// Builds the graph. O(entries + relationships).
    pub fn build(&self, snapshot: &Snapshot) -> LoreGraph {
        let mut graph = LoreGraph::new();

        let selected: Vec<&Entry> = snapshot
            .entries()
            .filter(|entry| (self.entry_filter)(*entry))
            .collect();

        for entry in &selected {
            graph.add_node(entry.id.clone());
        }

        for entry in &selected {
            let Some(from) = graph.get_index(&entry.id) else {
                continue;
            };

            for rel in entry
                .relationships
                .iter()
                .filter(|rel| (self.relationship_filter)(*rel))
            {
                if let Some(to) = graph.get_index(&rel.target_id) {
                    graph.add_edge(from, to, RelationshipEdge::from(rel));
                } else if !snapshot.contains(&rel.target_id) {
                    graph.add_dangling(DanglingEdge {
                        source: entry.id.clone(),
                        target: rel.target_id.clone(),
                        edge: RelationshipEdge::from(rel),
                    });
                }
            }
        }

        debug!(
            "Built graph: {} nodes, {} edges ({} dangling)",
            graph.node_count(),
            graph.edge_count(),
            graph.dangling().len()
        );

        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lorekeep_core::{Category, PART_OF};

    fn snapshot() -> Snapshot {
        Snapshot::new(vec![
            Entry::new("city", "Veyra", Category::locations())
                .with_relationship(Relationship::new("region", PART_OF))
                .with_relationship(Relationship::new("hero", "related_to")),
            Entry::new("region", "Thornmark", Category::locations()),
            Entry::new("hero", "Ilsa", Category::characters())
                .with_relationship(Relationship::new("ghost", "ally_of")),
            Entry::new("hermit", "Oren", Category::characters()),
        ])
    }

    #[test]
    fn test_builder_adds_every_entry() {
        let graph = GraphBuilder::new().build(&snapshot());
        assert_eq!(graph.node_count(), 4);
        assert!(graph.contains("hermit"));
    }

    #[test]
    fn test_builder_keeps_dangling_edges() {
        let graph = GraphBuilder::new().build(&snapshot());

        assert_eq!(graph.resolved_edge_count(), 2);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.dangling().len(), 1);
        assert_eq!(graph.dangling()[0].source, "hero");
        assert_eq!(graph.dangling()[0].target, "ghost");
    }

    #[test]
    fn test_filtered_subgraph() {
        let graph = GraphBuilder::new()
            .entries(|e| e.category.is(Category::LOCATIONS))
            .relationships(|r| r.is_type(PART_OF))
            .build(&snapshot());

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.dangling().is_empty());
        assert_eq!(graph.edges_between("city", "region").len(), 1);
    }
}
