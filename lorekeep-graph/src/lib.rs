//! Lorekeep Graph - Relationship graph and fuzzy search
//!
//! This crate turns a snapshot of lore entries into two derived views: a
//! directed relationship graph and a fuzzy text index. Together they back
//! search, relationship traversal, "related entry" suggestions and index
//! statistics.
//!
//! # Architecture
//!
//! The graph uses petgraph internally with additional bookkeeping for:
//! - Id-based lookups
//! - Relationships whose target does not exist (kept for orphan reporting)
//! - Bounded simple-cycle enumeration
//!
//! Both views are rebuilt wholesale on refresh; nothing is patched in place.
//!
//! # Example
//!
//! ```no_run
//! use lorekeep_core::{Category, Entry, SearchSettings, Snapshot};
//! use lorekeep_graph::LoreIndex;
//!
//! let snapshot = Snapshot::new(vec![Entry::new("ev-1", "The Collapse", Category::events())]);
//! let index = LoreIndex::new(snapshot.into_shared(), SearchSettings::default());
//!
//! let hits = index.search("collaps", None, &[], None);
//! ```

mod builder;
mod cycles;
mod edge;
pub mod fuzzy;
mod graph;
mod index;
mod search_index;
mod similarity;
mod traversal;

pub use builder::GraphBuilder;
pub use cycles::{simple_cycles, CycleSearch, TruncationReason};
pub use edge::{DanglingEdge, GraphEdge, RelationshipEdge};
pub use graph::{LoreGraph, NodeId};
pub use index::{IndexStatistics, LoreIndex, RelatedEntry, Suggestion};
pub use search_index::{searchable_text, FuzzyIndex, IndexedEntry, SearchFilter, SearchHit};
pub use similarity::{similarity, SUGGESTION_THRESHOLD};
pub use traversal::Hop;
