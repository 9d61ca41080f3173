//! Consistency findings and their classification.
//!
//! Every validator emits `Issue`s tagged with an `IssueKind`. Reports group
//! and rank issues by kind, never by parsing the rendered message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// An event date that could not be parsed.
    InvalidDate,
    /// Two events whose dates contradict their narrative order.
    DateOrder,
    /// A character born after they died.
    BirthAfterDeath,
    /// A cycle in the location containment hierarchy.
    HierarchyCycle,
    /// A location contained by something of a smaller size class.
    ImpossibleContainment,
    /// Reciprocal `enemy_of` / `ally_of` relationships that disagree.
    ConflictingRelationship,
    /// A relationship pointing at a missing entry.
    OrphanedReference,
    /// Two entries that are each `part_of` the other.
    CircularPartOf,
    /// Two entries with the same name in one category.
    DuplicateName,
}

impl IssueKind {
    /// The report bucket this kind is counted under.
    pub fn issue_type(self) -> IssueType {
        match self {
            IssueKind::InvalidDate | IssueKind::DateOrder | IssueKind::BirthAfterDeath => {
                IssueType::DateConsistency
            }
            IssueKind::HierarchyCycle | IssueKind::ImpossibleContainment => {
                IssueType::LocationHierarchy
            }
            IssueKind::ConflictingRelationship => IssueType::Relationships,
            IssueKind::DuplicateName => IssueType::Duplicates,
            IssueKind::OrphanedReference => IssueType::References,
            // Counted with circular references, not relationships, even
            // though the finding is about a relationship pair.
            IssueKind::CircularPartOf => IssueType::CircularReferences,
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            IssueKind::HierarchyCycle
            | IssueKind::ImpossibleContainment
            | IssueKind::ConflictingRelationship
            | IssueKind::CircularPartOf => Severity::Critical,
            IssueKind::DateOrder | IssueKind::DuplicateName | IssueKind::OrphanedReference => {
                Severity::Warning
            }
            IssueKind::InvalidDate | IssueKind::BirthAfterDeath => Severity::Suggestion,
        }
    }
}

/// Report buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IssueType {
    #[serde(rename = "Date Consistency")]
    DateConsistency,
    #[serde(rename = "Location Hierarchy")]
    LocationHierarchy,
    #[serde(rename = "Relationships")]
    Relationships,
    #[serde(rename = "Duplicates")]
    Duplicates,
    #[serde(rename = "References")]
    References,
    #[serde(rename = "Circular References")]
    CircularReferences,
    #[serde(rename = "Other")]
    Other,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::DateConsistency => "Date Consistency",
            IssueType::LocationHierarchy => "Location Hierarchy",
            IssueType::Relationships => "Relationships",
            IssueType::Duplicates => "Duplicates",
            IssueType::References => "References",
            IssueType::CircularReferences => "Circular References",
            IssueType::Other => "Other",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How urgently a finding needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Warning,
    Suggestion,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Suggestion => "suggestion",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single consistency finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    /// Ids of the entries involved, most relevant first.
    pub entry_ids: Vec<String>,
    /// Human-readable description.
    pub message: String,
}

impl Issue {
    pub fn new(kind: IssueKind, entry_ids: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            entry_ids,
            message: message.into(),
        }
    }

    pub fn issue_type(&self) -> IssueType {
        self.kind.issue_type()
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
