//! Lorekeep Check - Consistency checking for lore entries
//!
//! Runs a fixed pipeline of validators over a snapshot and reports what
//! it finds. Findings are data, never errors: an inconsistent world still
//! produces a report.
//!
//! Validators, in pipeline order:
//! 1. Date consistency (event ordering, lifespans, unparseable dates)
//! 2. Location hierarchy (containment cycles, impossible containment)
//! 3. Character relationships (contradictory `enemy_of` / `ally_of`)
//! 4. Orphaned references
//! 5. Circular `part_of` pairs
//! 6. Duplicate names
//!
//! # Example
//!
//! ```no_run
//! use lorekeep_check::ConsistencyChecker;
//! use lorekeep_core::{JsonDirectorySource, LoreConfig};
//!
//! let config = LoreConfig::load("lore_system/config.json")?;
//! let source = JsonDirectorySource::from_config(&config);
//! let checker = ConsistencyChecker::from_source(
//!     &source,
//!     config.validation_rules.clone(),
//!     config.cycle_limits,
//! )?;
//!
//! let report = checker.generate_report();
//! println!("{} issues", report.total_issues);
//! # Ok::<(), lorekeep_core::LoreError>(())
//! ```

mod checker;
pub mod dates;
mod duplicates;
mod hierarchy;
mod issue;
mod relations;
mod report;

pub use checker::{ConsistencyChecker, Findings};
pub use dates::{check_date_consistency, events_should_be_sequential, parse_date};
pub use duplicates::check_duplicate_names;
pub use hierarchy::{
    check_location_hierarchy, is_impossible_containment, size_class_rank, SIZE_CLASSES,
};
pub use issue::{Issue, IssueKind, IssueType, Severity};
pub use relations::{
    check_character_relationships, check_circular_relationships, check_orphaned_references,
};
pub use report::{ConsistencyReport, DegradedCheck, SeverityCounts};
