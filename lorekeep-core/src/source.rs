//! Where snapshots come from.
//!
//! Storage is somebody else's problem; Lorekeep only needs a way to pull
//! the complete entry set whenever the caller asks for a refresh.

use crate::config::LoreConfig;
use crate::entry::Entry;
use crate::error::{LoreError, Result};
use crate::snapshot::Snapshot;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Supplies the full entry set on demand.
pub trait EntrySource {
    fn load(&self) -> Result<Snapshot>;
}

/// Entries held in memory, mostly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    entries: Vec<Entry>,
}

impl InMemorySource {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }
}

impl EntrySource for InMemorySource {
    fn load(&self) -> Result<Snapshot> {
        Ok(Snapshot::new(self.entries.iter().cloned()))
    }
}

/// Shape of a per-category file.
#[derive(Debug, Deserialize)]
struct CategoryFile {
    #[serde(default)]
    entries: BTreeMap<String, Entry>,
}

/// Reads `<database_path>/<category>.json` for every configured category.
#[derive(Debug, Clone)]
pub struct JsonDirectorySource {
    root: PathBuf,
    categories: Vec<String>,
}

impl JsonDirectorySource {
    pub fn new(root: impl Into<PathBuf>, categories: Vec<String>) -> Self {
        Self {
            root: root.into(),
            categories,
        }
    }

    pub fn from_config(config: &LoreConfig) -> Self {
        Self::new(config.database_path.clone(), config.categories.clone())
    }

    fn category_path(&self, category: &str) -> PathBuf {
        self.root.join(format!("{category}.json"))
    }

    /// Loads the entries of one category. A missing file means no entries.
    pub fn load_category(&self, category: &str) -> Result<Vec<Entry>> {
        if !self.categories.iter().any(|c| c == category) {
            return Err(LoreError::UnknownCategory(category.to_string()));
        }

        let path = self.category_path(category);
        if !path.exists() {
            debug!("No data file for category {}: {}", category, path.display());
            return Ok(Vec::new());
        }

        let text = fs::read_to_string(&path).map_err(|e| LoreError::io(&path, e))?;
        let file: CategoryFile =
            serde_json::from_str(&text).map_err(|e| LoreError::json(&path, e))?;

        let mut entries = Vec::with_capacity(file.entries.len());
        for (key, entry) in file.entries {
            if key != entry.id {
                warn!(
                    "Entry keyed as {} in {} carries id {}; using the entry id",
                    key,
                    path.display(),
                    entry.id
                );
            }
            entries.push(entry);
        }

        debug!("Loaded {} entries from {}", entries.len(), path.display());
        Ok(entries)
    }
}

impl EntrySource for JsonDirectorySource {
    fn load(&self) -> Result<Snapshot> {
        let mut all = Vec::new();
        for category in &self.categories {
            all.extend(self.load_category(category)?);
        }
        Ok(Snapshot::new(all))
    }
}
