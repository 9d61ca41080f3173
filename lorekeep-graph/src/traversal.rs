//! Relationship traversal.
//!
//! Breadth-first walk over outgoing edges from a root entry. It answers the
//! question: "what does this entry lead to, and how far away is it?"

use crate::edge::RelationshipEdge;
use crate::graph::{LoreGraph, NodeId};
use std::collections::{HashSet, VecDeque};

/// One entry reached during a traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct Hop<'g> {
    /// The node reached.
    pub node: NodeId,
    /// The edge that first reached it.
    pub edge: &'g RelationshipEdge,
    /// Number of edges from the root.
    pub depth: usize,
}

impl LoreGraph {
    /// Walks outgoing edges from `root` up to `max_depth` hops.
    ///
    /// With `relationship_type`, only edges of that type are followed, at
    /// every hop. Each entry is reported once, at the depth it was first
    /// discovered; the root itself is never reported. An unknown root
    /// yields nothing.
    pub fn traverse(
        &self,
        root: &str,
        relationship_type: Option<&str>,
        max_depth: usize,
    ) -> Vec<Hop<'_>> {
        let Some(root) = self.get_index(root) else {
            return Vec::new();
        };

        let mut result = Vec::new();
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut queue: VecDeque<(NodeId, usize)> = VecDeque::new();

        visited.insert(root);
        queue.push_back((root, 0));

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= max_depth {
                continue;
            }

            for (neighbor, edge) in self.outgoing(current) {
                if let Some(wanted) = relationship_type {
                    if !edge.is_type(wanted) {
                        continue;
                    }
                }
                if !visited.insert(neighbor) {
                    continue;
                }

                result.push(Hop {
                    node: neighbor,
                    edge,
                    depth: depth + 1,
                });
                queue.push_back((neighbor, depth + 1));
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<'g>(graph: &'g LoreGraph, hops: &[Hop<'g>]) -> Vec<(&'g str, usize)> {
        hops.iter()
            .map(|hop| (graph.id_of(hop.node).unwrap(), hop.depth))
            .collect()
    }

    #[test]
    fn test_unknown_root() {
        let graph = LoreGraph::new();
        assert!(graph.traverse("nobody", None, 3).is_empty());
    }

    #[test]
    fn test_zero_depth() {
        let mut graph = LoreGraph::new();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        graph.add_edge(a, b, RelationshipEdge::new("ally_of"));
        assert!(graph.traverse("a", None, 0).is_empty());
    }

    #[test]
    fn test_linear_chain() {
        // A → B → C → D
        let mut graph = LoreGraph::new();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        let c = graph.add_node("c");
        let d = graph.add_node("d");
        graph.add_edge(a, b, RelationshipEdge::new("led_to"));
        graph.add_edge(b, c, RelationshipEdge::new("led_to"));
        graph.add_edge(c, d, RelationshipEdge::new("led_to"));

        let one = graph.traverse("a", None, 1);
        assert_eq!(ids(&graph, &one), vec![("b", 1)]);

        let two = graph.traverse("a", None, 2);
        assert_eq!(ids(&graph, &two), vec![("b", 1), ("c", 2)]);
    }

    #[test]
    fn test_diamond_first_depth_wins() {
        //     A
        //    / \
        //   B   C
        //    \ /
        //     D
        let mut graph = LoreGraph::new();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        let c = graph.add_node("c");
        let d = graph.add_node("d");
        graph.add_edge(a, b, RelationshipEdge::new("contains"));
        graph.add_edge(a, c, RelationshipEdge::new("contains"));
        graph.add_edge(b, d, RelationshipEdge::new("contains"));
        graph.add_edge(c, d, RelationshipEdge::new("contains"));
        graph.add_edge(a, d, RelationshipEdge::new("related_to"));

        let hops = graph.traverse("a", None, 3);
        assert_eq!(ids(&graph, &hops), vec![("b", 1), ("c", 1), ("d", 1)]);
        assert_eq!(hops[2].edge.relationship_type, "related_to");
    }

    #[test]
    fn test_type_filter_applies_at_every_hop() {
        // A -part_of-> B -ally_of-> C, B -part_of-> D
        let mut graph = LoreGraph::new();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        let c = graph.add_node("c");
        let d = graph.add_node("d");
        graph.add_edge(a, b, RelationshipEdge::new("part_of"));
        graph.add_edge(b, c, RelationshipEdge::new("ally_of"));
        graph.add_edge(b, d, RelationshipEdge::new("part_of"));

        let hops = graph.traverse("a", Some("part_of"), 5);
        assert_eq!(ids(&graph, &hops), vec![("b", 1), ("d", 2)]);
    }

    #[test]
    fn test_cycle_does_not_return_root() {
        // A → B → C → A
        let mut graph = LoreGraph::new();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        let c = graph.add_node("c");
        graph.add_edge(a, b, RelationshipEdge::new("led_to"));
        graph.add_edge(b, c, RelationshipEdge::new("led_to"));
        graph.add_edge(c, a, RelationshipEdge::new("led_to"));

        let hops = graph.traverse("a", None, 10);
        assert_eq!(ids(&graph, &hops), vec![("b", 1), ("c", 2)]);
    }

    #[test]
    fn test_incoming_edges_are_not_followed() {
        let mut graph = LoreGraph::new();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        graph.add_edge(b, a, RelationshipEdge::new("enemy_of"));
        assert!(graph.traverse("a", None, 3).is_empty());
    }
}
