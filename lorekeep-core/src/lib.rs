//! Lorekeep Core - Entries, configuration and entry sources
//!
//! This crate defines the lore data model shared by the rest of the
//! workspace: entries, their typed relationships, immutable snapshots of
//! the full entry set, and the configuration that tunes search and
//! consistency checking.
//!
//! # Example
//!
//! ```no_run
//! use lorekeep_core::{EntrySource, JsonDirectorySource, LoreConfig};
//!
//! let config = LoreConfig::load("lore_system/config.json")?;
//! let snapshot = JsonDirectorySource::from_config(&config).load()?;
//! println!("{} entries", snapshot.len());
//! # Ok::<(), lorekeep_core::LoreError>(())
//! ```

mod config;
mod entry;
mod error;
mod snapshot;
mod source;

pub use config::{CycleLimits, LoreConfig, SearchSettings, ValidationRules};
pub use entry::{
    Category, Entry, EntryMetadata, FieldValue, Relationship, ALLY_OF, ENEMY_OF, PART_OF,
};
pub use error::{LoreError, Result};
pub use snapshot::{SharedSnapshot, Snapshot};
pub use source::{EntrySource, InMemorySource, JsonDirectorySource};
