//! Location containment checks.
//!
//! Locations nest through `part_of` relationships (child `part_of` parent).
//! The containment hierarchy must be acyclic, and a location may not sit
//! inside something of a smaller size class.

use crate::checker::Findings;
use crate::issue::{Issue, IssueKind};
use lorekeep_core::{Category, CycleLimits, Entry, Snapshot, PART_OF};
use lorekeep_graph::GraphBuilder;

/// Location size classes, smallest first.
pub const SIZE_CLASSES: [&str; 10] = [
    "building",
    "district",
    "settlement",
    "city",
    "region",
    "province",
    "state",
    "continent",
    "world",
    "plane",
];

/// Position of a size class in `SIZE_CLASSES`, case-insensitive.
pub fn size_class_rank(class: &str) -> Option<usize> {
    let class = class.trim().to_lowercase();
    SIZE_CLASSES.iter().position(|known| *known == class)
}

/// Whether a `child_class` location cannot be part of a `parent_class` one.
///
/// Unrecognized classes are assumed to fit.
pub fn is_impossible_containment(child_class: &str, parent_class: &str) -> bool {
    match (size_class_rank(child_class), size_class_rank(parent_class)) {
        (Some(child), Some(parent)) => child > parent,
        _ => false,
    }
}

fn size_class(entry: &Entry) -> String {
    entry.field_text("type").unwrap_or_default().to_lowercase()
}

fn display_name(snapshot: &Snapshot, id: &str) -> String {
    snapshot
        .get(id)
        .map(|entry| entry.name.clone())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| id.to_string())
}

/// Checks the location hierarchy for cycles and impossible containment.
pub fn check_location_hierarchy(snapshot: &Snapshot, limits: CycleLimits) -> Findings {
    let mut findings = Findings::default();

    let hierarchy = GraphBuilder::new()
        .entries(|entry| entry.category.is(Category::LOCATIONS))
        .relationships(|rel| rel.is_type(PART_OF))
        .build(snapshot);

    let search = hierarchy.find_cycles(limits);
    for cycle in search.cycles() {
        let names: Vec<String> = cycle.iter().map(|id| display_name(snapshot, id)).collect();
        findings.issues.push(Issue::new(
            IssueKind::HierarchyCycle,
            cycle.clone(),
            format!(
                "Circular location hierarchy detected: {}",
                names.join(" -> ")
            ),
        ));
    }
    findings.truncated = search.truncation();

    for location in snapshot.in_category(Category::LOCATIONS) {
        let child_class = size_class(location);

        for rel in location.relationships_of(PART_OF) {
            let Some(parent) = snapshot.get(&rel.target_id) else {
                continue;
            };
            let parent_class = size_class(parent);

            if is_impossible_containment(&child_class, &parent_class) {
                findings.issues.push(Issue::new(
                    IssueKind::ImpossibleContainment,
                    vec![location.id.clone(), parent.id.clone()],
                    format!(
                        "Impossible location hierarchy: {} '{}' cannot be part of {} '{}'",
                        child_class, location.name, parent_class, parent.name
                    ),
                ));
            }
        }
    }

    findings
}
