//! Date parsing and chronology checks.
//!
//! Lore dates are free text ("Year 1800", "1800 EE", "Before the Collapse").
//! They are resolved to a single integer year on the Eclipse Era scale,
//! where the Collapse is year 0.

use crate::issue::{Issue, IssueKind};
use lorekeep_core::{Category, Entry, Snapshot};
use once_cell::sync::Lazy;
use regex::{Match, Regex};

static ERA_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:year\s+)?(-?\d+)(?:\s+ee)?").expect("era year pattern is valid")
});

static BARE_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("integer pattern is valid"));

/// Words in an event name that mark it as following the Collapse.
const AFTER_COLLAPSE: [&str; 3] = ["aftermath", "recovery", "rebuilding"];

/// Resolves lore date text to a year.
///
/// Tried in order: an era year ("Year N", "N EE", a minus sign allowed
/// when it is not glued to a word), then the Collapse anchor ("before" it
/// is -1, otherwise 0), then the first bare integer.
pub fn parse_date(text: &str) -> Option<i64> {
    if text.trim().is_empty() {
        return None;
    }

    if let Some(year) = ERA_YEAR
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| signed_year(text, m))
    {
        return Some(year);
    }

    let lower = text.to_lowercase();
    if lower.contains("collapse") {
        return Some(if lower.contains("before") { -1 } else { 0 });
    }

    BARE_INTEGER
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
}

fn signed_year(text: &str, m: Match<'_>) -> Option<i64> {
    let digits = m.as_str();
    let glued = text[..m.start()]
        .chars()
        .next_back()
        .is_some_and(char::is_alphanumeric);
    let digits = if glued {
        digits.trim_start_matches('-')
    } else {
        digits
    };
    digits.parse().ok()
}

/// Whether `first` must happen before `second` in the narrative.
///
/// Deliberately narrow: only "the Collapse" preceding its aftermath,
/// recovery or rebuilding is recognized.
pub fn events_should_be_sequential(first: &Entry, second: &Entry) -> bool {
    let first = first.name.to_lowercase();
    let second = second.name.to_lowercase();
    first.contains("collapse") && AFTER_COLLAPSE.iter().any(|word| second.contains(word))
}

/// Checks event dates and character lifespans.
pub fn check_date_consistency(snapshot: &Snapshot) -> Vec<Issue> {
    let mut issues = Vec::new();

    let mut dated: Vec<(&Entry, i64)> = Vec::new();
    for event in snapshot.in_category(Category::EVENTS) {
        let Some(text) = event.date_text() else {
            continue;
        };
        if text.trim().is_empty() {
            continue;
        }
        match parse_date(&text) {
            Some(year) => dated.push((event, year)),
            None => issues.push(Issue::new(
                IssueKind::InvalidDate,
                vec![event.id.clone()],
                format!("Invalid date format in event '{}': {}", event.name, text),
            )),
        }
    }

    dated.sort_by_key(|(_, year)| *year);

    for pair in dated.windows(2) {
        let (earlier, earlier_year) = pair[0];
        let (later, later_year) = pair[1];
        if later_year > earlier_year && events_should_be_sequential(later, earlier) {
            issues.push(Issue::new(
                IssueKind::DateOrder,
                vec![later.id.clone(), earlier.id.clone()],
                format!(
                    "Date inconsistency: '{}' should occur before '{}'",
                    later.name, earlier.name
                ),
            ));
        }
    }

    for character in snapshot.in_category(Category::CHARACTERS) {
        let birth = character.field_text("birth_date").and_then(|t| parse_date(&t));
        let death = character.field_text("death_date").and_then(|t| parse_date(&t));
        if let (Some(birth), Some(death)) = (birth, death) {
            if birth > death {
                issues.push(Issue::new(
                    IssueKind::BirthAfterDeath,
                    vec![character.id.clone()],
                    format!(
                        "Character '{}' has birth date after death date",
                        character.name
                    ),
                ));
            }
        }
    }

    issues
}
