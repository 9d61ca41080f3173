//! Duplicate name detection within a category.

use crate::issue::{Issue, IssueKind};
use lorekeep_core::{Category, Snapshot};
use std::collections::HashMap;

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Reports entries that share a normalized name within one category.
///
/// The first entry in id order keeps the name; every later one is reported
/// against it. Blank names are never duplicates.
pub fn check_duplicate_names(snapshot: &Snapshot) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut first_seen: HashMap<(String, &Category), &str> = HashMap::new();

    for entry in snapshot.entries() {
        let name = normalize(&entry.name);
        if name.is_empty() {
            continue;
        }

        match first_seen.get(&(name.clone(), &entry.category)) {
            Some(original) => issues.push(Issue::new(
                IssueKind::DuplicateName,
                vec![original.to_string(), entry.id.clone()],
                format!(
                    "Duplicate name in {}: '{}' (IDs: {} and {})",
                    entry.category, entry.name, original, entry.id
                ),
            )),
            None => {
                first_seen.insert((name, &entry.category), entry.id.as_str());
            }
        }
    }

    issues
}
