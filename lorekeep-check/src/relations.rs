//! Relationship checks: contradictions, dangling targets and mutual
//! containment.

use crate::issue::{Issue, IssueKind};
use lorekeep_core::{Category, Relationship, Snapshot, ALLY_OF, ENEMY_OF, PART_OF};
use lorekeep_graph::{GraphBuilder, RelationshipEdge};

/// The relationship type that contradicts `relationship_type`, if any.
fn opposite(relationship_type: &str) -> Option<&'static str> {
    match relationship_type {
        ENEMY_OF => Some(ALLY_OF),
        ALLY_OF => Some(ENEMY_OF),
        _ => None,
    }
}

/// Finds characters whose `enemy_of`/`ally_of` relationships are answered
/// with the opposite type.
///
/// Each direction reports on its own, so a fully contradictory pair yields
/// two issues.
pub fn check_character_relationships(snapshot: &Snapshot) -> Vec<Issue> {
    let mut issues = Vec::new();

    for character in snapshot.in_category(Category::CHARACTERS) {
        for rel in &character.relationships {
            let Some(contrary) = opposite(&rel.relationship_type) else {
                continue;
            };
            let Some(target) = snapshot.get(&rel.target_id) else {
                continue;
            };

            let answered = target
                .relationships
                .iter()
                .filter(|back| back.target_id == character.id && back.is_type(contrary))
                .count();

            for _ in 0..answered {
                issues.push(Issue::new(
                    IssueKind::ConflictingRelationship,
                    vec![character.id.clone(), target.id.clone()],
                    format!(
                        "Conflicting relationship: '{}' and '{}' have contradictory relationships",
                        character.name, target.name
                    ),
                ));
            }
        }
    }

    issues
}

/// Reports every relationship whose target is not in the snapshot.
pub fn check_orphaned_references(snapshot: &Snapshot) -> Vec<Issue> {
    snapshot
        .entries()
        .flat_map(|entry| {
            entry
                .relationships
                .iter()
                .filter(|rel| !snapshot.contains(&rel.target_id))
                .map(move |rel: &Relationship| {
                    Issue::new(
                        IssueKind::OrphanedReference,
                        vec![entry.id.clone(), rel.target_id.clone()],
                        format!(
                            "Orphaned reference: entry '{}' references non-existent entry: {}",
                            entry.name, rel.target_id
                        ),
                    )
                })
        })
        .collect()
}

fn has_part_of(edges: &[&RelationshipEdge]) -> bool {
    edges.iter().any(|edge| edge.is_type(PART_OF))
}

/// Finds pairs of entries that are each `part_of` the other.
///
/// Only two-entry loops are checked here; longer containment cycles among
/// locations belong to the hierarchy check. Pairs are found directly from
/// the edge set, so the check has no search budget to run out of.
pub fn check_circular_relationships(snapshot: &Snapshot) -> Vec<Issue> {
    let graph = GraphBuilder::new().build(snapshot);
    let name_of = |id: &str| {
        snapshot
            .get(id)
            .map(|entry| entry.name.clone())
            .unwrap_or_else(|| id.to_string())
    };

    let issues = graph
        .mutual_pairs()
        .into_iter()
        .filter(|&(first, second)| {
            has_part_of(&graph.edges_between(first, second))
                && has_part_of(&graph.edges_between(second, first))
        })
        .map(|(first, second)| {
            Issue::new(
                IssueKind::CircularPartOf,
                vec![first.to_string(), second.to_string()],
                format!(
                    "Circular 'part_of' relationship between '{}' and '{}'",
                    name_of(first),
                    name_of(second)
                ),
            )
        })
        .collect();
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use lorekeep_core::Entry;

    fn character(id: &str, name: &str) -> Entry {
        Entry::new(id, name, Category::characters())
    }

    #[test]
    fn test_enemy_answered_by_ally_conflicts() {
        let snapshot = Snapshot::new(vec![
            character("a", "Ilsa").with_relationship(Relationship::new("b", ENEMY_OF)),
            character("b", "Oren").with_relationship(Relationship::new("a", ALLY_OF)),
        ]);

        let issues = check_character_relationships(&snapshot);
        // Both directions see the contradiction.
        assert_eq!(issues.len(), 2);
        assert!(issues
            .iter()
            .all(|i| i.kind == IssueKind::ConflictingRelationship));
        assert_eq!(
            issues[0].message,
            "Conflicting relationship: 'Ilsa' and 'Oren' have contradictory relationships"
        );
    }

    #[test]
    fn test_mutual_enemies_do_not_conflict() {
        let snapshot = Snapshot::new(vec![
            character("a", "Ilsa").with_relationship(Relationship::new("b", ENEMY_OF)),
            character("b", "Oren").with_relationship(Relationship::new("a", ENEMY_OF)),
        ]);
        assert!(check_character_relationships(&snapshot).is_empty());
    }

    #[test]
    fn test_missing_target_is_not_a_conflict() {
        let snapshot = Snapshot::new(vec![
            character("a", "Ilsa").with_relationship(Relationship::new("ghost", ENEMY_OF))
        ]);
        assert!(check_character_relationships(&snapshot).is_empty());
    }

    #[test]
    fn test_orphans_one_per_dangling_relationship() {
        let snapshot = Snapshot::new(vec![
            Entry::new("a", "Veyra", Category::locations())
                .with_relationship(Relationship::new("missing", PART_OF))
                .with_relationship(Relationship::new("gone", "ruled_by"))
                .with_relationship(Relationship::new("b", "near")),
            Entry::new("b", "Thorn", Category::locations()),
        ]);

        let issues = check_orphaned_references(&snapshot);
        assert_eq!(issues.len(), 2);
        assert_eq!(
            issues[0].message,
            "Orphaned reference: entry 'Veyra' references non-existent entry: missing"
        );
        assert_eq!(issues[1].entry_ids, vec!["a".to_string(), "gone".to_string()]);
    }

    #[test]
    fn test_circular_part_of_reported() {
        let snapshot = Snapshot::new(vec![
            Entry::new("a", "The Accord", Category::concepts())
                .with_relationship(Relationship::new("b", PART_OF)),
            Entry::new("b", "The Pact", Category::concepts())
                .with_relationship(Relationship::new("a", PART_OF)),
        ]);

        let issues = check_circular_relationships(&snapshot);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::CircularPartOf);
        assert_eq!(
            issues[0].message,
            "Circular 'part_of' relationship between 'The Accord' and 'The Pact'"
        );
    }

    #[test]
    fn test_circular_part_of_found_beside_dense_alliances() {
        // Twelve characters all allied with each other: far more simple
        // cycles than any enumeration budget allows.
        let ids: Vec<String> = (0..12).map(|i| format!("a{i:02}")).collect();
        let mut entries: Vec<Entry> = ids
            .iter()
            .map(|id| {
                ids.iter()
                    .filter(|other| *other != id)
                    .fold(character(id, id), |entry, other| {
                        entry.with_relationship(Relationship::new(other.as_str(), ALLY_OF))
                    })
            })
            .collect();
        entries.push(
            Entry::new("z1", "Inner Circle", Category::concepts())
                .with_relationship(Relationship::new("z2", PART_OF)),
        );
        entries.push(
            Entry::new("z2", "Outer Circle", Category::concepts())
                .with_relationship(Relationship::new("z1", PART_OF)),
        );

        let issues = check_circular_relationships(&Snapshot::new(entries));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].entry_ids, vec!["z1".to_string(), "z2".to_string()]);
    }

    #[test]
    fn test_other_two_cycles_ignored() {
        let snapshot = Snapshot::new(vec![
            character("a", "Ilsa").with_relationship(Relationship::new("b", "sibling_of")),
            character("b", "Oren").with_relationship(Relationship::new("a", PART_OF)),
        ]);

        assert!(check_circular_relationships(&snapshot).is_empty());
    }

    #[test]
    fn test_longer_part_of_cycles_ignored() {
        let snapshot = Snapshot::new(vec![
            Entry::new("a", "A", Category::concepts())
                .with_relationship(Relationship::new("b", PART_OF)),
            Entry::new("b", "B", Category::concepts())
                .with_relationship(Relationship::new("c", PART_OF)),
            Entry::new("c", "C", Category::concepts())
                .with_relationship(Relationship::new("a", PART_OF)),
        ]);

        assert!(check_circular_relationships(&snapshot).is_empty());
    }
}
