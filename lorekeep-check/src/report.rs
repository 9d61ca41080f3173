//! Summaries of a consistency run.

use crate::issue::{Issue, IssueType, Severity};
use chrono::{DateTime, Utc};
use lorekeep_graph::TruncationReason;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Issue totals per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub warnings: usize,
    pub suggestions: usize,
}

impl SeverityCounts {
    fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::Warning => self.warnings += 1,
            Severity::Suggestion => self.suggestions += 1,
        }
    }
}

/// A validator whose cycle search gave up early.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegradedCheck {
    pub validator: String,
    pub reason: TruncationReason,
}

/// The categorized result of one consistency run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub timestamp: DateTime<Utc>,
    pub total_entries: usize,
    pub total_issues: usize,
    pub issues_by_type: BTreeMap<IssueType, usize>,
    pub issues: Vec<Issue>,
    pub severity_counts: SeverityCounts,
    /// Validators that returned partial results. Empty on a complete run.
    #[serde(default)]
    pub degraded: Vec<DegradedCheck>,
}

impl ConsistencyReport {
    pub fn new(total_entries: usize, issues: Vec<Issue>, degraded: Vec<DegradedCheck>) -> Self {
        let mut issues_by_type = BTreeMap::new();
        let mut severity_counts = SeverityCounts::default();

        for issue in &issues {
            *issues_by_type.entry(issue.issue_type()).or_insert(0) += 1;
            severity_counts.record(issue.severity());
        }

        Self {
            timestamp: Utc::now(),
            total_entries,
            total_issues: issues.len(),
            issues_by_type,
            issues,
            severity_counts,
            degraded,
        }
    }

    /// Whether every enabled validator ran to completion.
    pub fn is_complete(&self) -> bool {
        self.degraded.is_empty()
    }

    /// Issues of one severity, in pipeline order.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(move |issue| issue.severity() == severity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueKind;

    fn issue(kind: IssueKind) -> Issue {
        Issue::new(kind, vec!["a".into()], format!("{:?}", kind))
    }

    #[test]
    fn test_counts_by_type_and_severity() {
        let report = ConsistencyReport::new(
            10,
            vec![
                issue(IssueKind::DateOrder),
                issue(IssueKind::BirthAfterDeath),
                issue(IssueKind::HierarchyCycle),
                issue(IssueKind::OrphanedReference),
                issue(IssueKind::OrphanedReference),
                issue(IssueKind::CircularPartOf),
            ],
            Vec::new(),
        );

        assert_eq!(report.total_entries, 10);
        assert_eq!(report.total_issues, 6);
        assert_eq!(report.issues_by_type[&IssueType::DateConsistency], 2);
        assert_eq!(report.issues_by_type[&IssueType::LocationHierarchy], 1);
        assert_eq!(report.issues_by_type[&IssueType::References], 2);
        assert_eq!(report.issues_by_type[&IssueType::CircularReferences], 1);
        assert!(!report.issues_by_type.contains_key(&IssueType::Duplicates));

        assert_eq!(
            report.severity_counts,
            SeverityCounts {
                critical: 2,
                warnings: 3,
                suggestions: 1,
            }
        );
        assert_eq!(report.with_severity(Severity::Critical).count(), 2);
        assert!(report.is_complete());
    }

    #[test]
    fn test_degraded_report_is_not_complete() {
        let report = ConsistencyReport::new(
            0,
            Vec::new(),
            vec![DegradedCheck {
                validator: "location_hierarchy".into(),
                reason: TruncationReason::StepLimit,
            }],
        );

        assert_eq!(report.total_issues, 0);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_report_json_shape() {
        let report = ConsistencyReport::new(1, vec![issue(IssueKind::DuplicateName)], Vec::new());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["total_issues"], 1);
        assert_eq!(json["issues_by_type"]["Duplicates"], 1);
        assert_eq!(json["severity_counts"]["warnings"], 1);
        assert_eq!(json["issues"][0]["kind"], "duplicate_name");
        assert!(json["degraded"].as_array().unwrap().is_empty());
    }
}
