//! Edge types for the relationship graph.
//!
//! Every relationship on an entry becomes exactly one edge. Edges whose
//! target exists live in the petgraph; edges pointing at missing entries are
//! kept on the side so orphan reporting can still see them.

use lorekeep_core::Relationship;
use serde::{Deserialize, Serialize};

/// Attributes carried by a relationship edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipEdge {
    /// The relationship type, e.g. `part_of` or `ally_of`.
    pub relationship_type: String,

    /// Nominal 0-10 weight. Not validated.
    pub strength: f64,

    /// Free-form note from the author.
    pub description: String,
}

impl RelationshipEdge {
    /// Creates an edge with default strength and no description.
    pub fn new(relationship_type: impl Into<String>) -> Self {
        Self {
            relationship_type: relationship_type.into(),
            strength: 5.0,
            description: String::new(),
        }
    }

    pub fn is_type(&self, relationship_type: &str) -> bool {
        self.relationship_type == relationship_type
    }
}

impl From<&Relationship> for RelationshipEdge {
    fn from(rel: &Relationship) -> Self {
        Self {
            relationship_type: rel.relationship_type.clone(),
            strength: rel.strength,
            description: rel.description.clone(),
        }
    }
}

/// An edge whose target id is not in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DanglingEdge {
    pub source: String,
    pub target: String,
    pub edge: RelationshipEdge,
}

/// A simplified edge for graph export/visualization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub relationship_type: String,
    pub strength: f64,
}
