//! Core graph data structure.
//!
//! The LoreGraph wraps petgraph and adds an id index plus the list of
//! relationships whose target does not exist. It is a derived, read-only
//! view of one snapshot: build it, query it, throw it away on refresh.

use crate::cycles::{self, CycleSearch};
use crate::edge::{DanglingEdge, GraphEdge, RelationshipEdge};
use lorekeep_core::CycleLimits;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

/// Unique identifier for a node in the graph.
pub type NodeId = NodeIndex;

/// The entry relationship graph.
///
/// Nodes carry entry ids; look the entries themselves up in the snapshot
/// the graph was built from.
#[derive(Debug, Clone, Default)]
pub struct LoreGraph {
    /// The underlying petgraph graph.
    pub(crate) graph: DiGraph<String, RelationshipEdge>,

    /// Maps entry ids to graph node indexes.
    id_index: HashMap<String, NodeId>,

    /// Relationships whose target is not in the snapshot.
    dangling: Vec<DanglingEdge>,
}

impl LoreGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry node, returning the existing index if already present.
    pub fn add_node(&mut self, id: impl Into<String>) -> NodeId {
        let id = id.into();
        if let Some(index) = self.id_index.get(&id) {
            return *index;
        }
        let index = self.graph.add_node(id.clone());
        self.id_index.insert(id, index);
        index
    }

    /// Adds an edge between two nodes.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, edge: RelationshipEdge) {
        self.graph.add_edge(from, to, edge);
    }

    /// Records a relationship whose target is missing.
    pub fn add_dangling(&mut self, edge: DanglingEdge) {
        self.dangling.push(edge);
    }

    /// Gets the node index for an entry id.
    pub fn get_index(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    /// Gets the entry id stored at a node.
    pub fn id_of(&self, index: NodeId) -> Option<&str> {
        self.graph.node_weight(index).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_index.contains_key(id)
    }

    /// Outgoing edges of a node in the order they were added.
    pub fn outgoing(&self, index: NodeId) -> Vec<(NodeId, &RelationshipEdge)> {
        let mut edges: Vec<(EdgeIndex, NodeId, &RelationshipEdge)> = self
            .graph
            .edges_directed(index, Direction::Outgoing)
            .map(|edge_ref| (edge_ref.id(), edge_ref.target(), edge_ref.weight()))
            .collect();
        edges.sort_by_key(|(edge_id, _, _)| *edge_id);
        edges
            .into_iter()
            .map(|(_, target, edge)| (target, edge))
            .collect()
    }

    /// Edges from one entry to another, in the order they were added.
    pub fn edges_between(&self, from: &str, to: &str) -> Vec<&RelationshipEdge> {
        match (self.get_index(from), self.get_index(to)) {
            (Some(from), Some(to)) => self
                .outgoing(from)
                .into_iter()
                .filter(|(target, _)| *target == to)
                .map(|(_, edge)| edge)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Pairs of distinct entries with resolved edges in both directions.
    ///
    /// Each pair is listed once, earlier node first, in node insertion
    /// order. Linear in the number of edges.
    pub fn mutual_pairs(&self) -> Vec<(&str, &str)> {
        let linked: HashSet<(NodeId, NodeId)> = self
            .graph
            .edge_references()
            .map(|edge_ref| (edge_ref.source(), edge_ref.target()))
            .collect();

        let mut pairs: Vec<(NodeId, NodeId)> = linked
            .iter()
            .copied()
            .filter(|&(from, to)| from < to && linked.contains(&(to, from)))
            .collect();
        pairs.sort_unstable();

        pairs
            .into_iter()
            .filter_map(|(from, to)| Some((self.id_of(from)?, self.id_of(to)?)))
            .collect()
    }

    /// Entry ids with no edges in or out, in node insertion order.
    pub fn isolated_ids(&self) -> Vec<&str> {
        let with_dangling: HashSet<&str> =
            self.dangling.iter().map(|d| d.source.as_str()).collect();

        self.graph
            .node_indices()
            .filter(|&index| {
                self.graph
                    .edges_directed(index, Direction::Incoming)
                    .next()
                    .is_none()
                    && self
                        .graph
                        .edges_directed(index, Direction::Outgoing)
                        .next()
                        .is_none()
            })
            .filter_map(|index| self.id_of(index))
            .filter(|id| !with_dangling.contains(id))
            .collect()
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges, dangling ones included.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count() + self.dangling.len()
    }

    /// Returns the number of edges whose target exists.
    pub fn resolved_edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Relationships pointing at missing entries.
    pub fn dangling(&self) -> &[DanglingEdge] {
        &self.dangling
    }

    /// Returns resolved edges with source and target ids for export.
    ///
    /// With `ids`, only edges whose endpoints are both listed are kept.
    pub fn export_edges(&self, ids: Option<&HashSet<String>>) -> Vec<GraphEdge> {
        self.graph
            .edge_references()
            .filter_map(|edge_ref| {
                let source = self.id_of(edge_ref.source())?;
                let target = self.id_of(edge_ref.target())?;
                if let Some(ids) = ids {
                    if !ids.contains(source) || !ids.contains(target) {
                        return None;
                    }
                }
                let weight = edge_ref.weight();
                Some(GraphEdge {
                    source: source.to_string(),
                    target: target.to_string(),
                    relationship_type: weight.relationship_type.clone(),
                    strength: weight.strength,
                })
            })
            .collect()
    }

    /// Enumerates simple cycles over resolved edges, within `limits`.
    ///
    /// Each cycle lists entry ids in edge order, starting from the node
    /// that was added to the graph first.
    pub fn find_cycles(&self, limits: CycleLimits) -> CycleSearch {
        let nodes: Vec<NodeId> = self.graph.node_indices().collect();
        let adjacency: Vec<Vec<usize>> = nodes
            .iter()
            .map(|&index| {
                let mut successors: Vec<usize> = self
                    .graph
                    .neighbors_directed(index, Direction::Outgoing)
                    .map(|n| n.index())
                    .collect();
                successors.sort_unstable();
                successors.dedup();
                successors
            })
            .collect();

        cycles::simple_cycles(&adjacency, limits).map_nodes(|position| {
            self.id_of(nodes[position])
                .map(str::to_string)
                .unwrap_or_default()
        })
    }
}
