//! The validator pipeline.

use crate::dates::check_date_consistency;
use crate::duplicates::check_duplicate_names;
use crate::hierarchy::check_location_hierarchy;
use crate::issue::Issue;
use crate::relations::{
    check_character_relationships, check_circular_relationships, check_orphaned_references,
};
use crate::report::{ConsistencyReport, DegradedCheck};
use lorekeep_core::{CycleLimits, EntrySource, Result, SharedSnapshot, ValidationRules};
use lorekeep_graph::TruncationReason;
use tracing::{debug, info, warn};

/// Output of a validator that enumerates cycles.
#[derive(Debug, Clone, Default)]
pub struct Findings {
    pub issues: Vec<Issue>,
    /// Set when the cycle search stopped early; `issues` is then partial.
    pub truncated: Option<TruncationReason>,
}

/// Everything one pipeline run produced.
#[derive(Debug, Clone, Default)]
pub(crate) struct CheckRun {
    pub issues: Vec<Issue>,
    pub degraded: Vec<DegradedCheck>,
}

impl CheckRun {
    fn extend(&mut self, validator: &str, issues: Vec<Issue>) {
        debug!("{}: {} issues", validator, issues.len());
        self.issues.extend(issues);
    }

    fn extend_findings(&mut self, validator: &str, findings: Findings) {
        if let Some(reason) = findings.truncated {
            warn!(
                "{}: cycle search truncated ({}), results are incomplete",
                validator, reason
            );
            self.degraded.push(DegradedCheck {
                validator: validator.to_string(),
                reason,
            });
        }
        self.extend(validator, findings.issues);
    }
}

/// Runs the consistency validators over one snapshot.
#[derive(Debug, Clone)]
pub struct ConsistencyChecker {
    snapshot: SharedSnapshot,
    rules: ValidationRules,
    limits: CycleLimits,
}

impl ConsistencyChecker {
    pub fn new(snapshot: SharedSnapshot, rules: ValidationRules, limits: CycleLimits) -> Self {
        Self {
            snapshot,
            rules,
            limits,
        }
    }

    /// Loads a snapshot from `source` and prepares a checker for it.
    pub fn from_source(
        source: &dyn EntrySource,
        rules: ValidationRules,
        limits: CycleLimits,
    ) -> Result<Self> {
        let snapshot = source.load()?.into_shared();
        Ok(Self::new(snapshot, rules, limits))
    }

    /// Reloads from `source`. On error the previous snapshot is kept.
    pub fn refresh(&mut self, source: &dyn EntrySource) -> Result<()> {
        let snapshot = source.load()?.into_shared();
        self.replace_snapshot(snapshot);
        Ok(())
    }

    pub fn replace_snapshot(&mut self, snapshot: SharedSnapshot) {
        self.snapshot = snapshot;
        info!("Checker refreshed: {} entries", self.snapshot.len());
    }

    pub fn snapshot(&self) -> &SharedSnapshot {
        &self.snapshot
    }

    /// Runs every enabled validator and returns the concatenated issues.
    pub fn check_all(&self) -> Vec<Issue> {
        self.run().issues
    }

    /// Runs the validators and summarizes the result.
    pub fn generate_report(&self) -> ConsistencyReport {
        let run = self.run();
        ConsistencyReport::new(self.snapshot.len(), run.issues, run.degraded)
    }

    pub(crate) fn run(&self) -> CheckRun {
        let snapshot = &self.snapshot;
        let rules = &self.rules;
        let mut run = CheckRun::default();

        if rules.check_date_consistency {
            run.extend("date_consistency", check_date_consistency(snapshot));
        }
        if rules.check_location_hierarchy {
            run.extend_findings(
                "location_hierarchy",
                check_location_hierarchy(snapshot, self.limits),
            );
        }
        if rules.check_character_relationships {
            run.extend(
                "character_relationships",
                check_character_relationships(snapshot),
            );
        }
        if rules.check_orphaned_references {
            run.extend("orphaned_references", check_orphaned_references(snapshot));
        }
        if rules.check_circular_relationships {
            run.extend(
                "circular_relationships",
                check_circular_relationships(snapshot),
            );
        }
        if rules.check_duplicate_names {
            run.extend("duplicate_names", check_duplicate_names(snapshot));
        }

        info!(
            "Consistency check finished: {} issues across {} entries",
            run.issues.len(),
            snapshot.len()
        );
        run
    }
}
