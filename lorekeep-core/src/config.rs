//! Configuration shared by the index, the checker and the CLI.
//!
//! The on-disk form is a single JSON document. Every section has defaults,
//! so an empty object is a valid configuration.

use crate::error::{LoreError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoreConfig {
    /// Directory holding one `<category>.json` file per category.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    #[serde(default = "default_relationship_types")]
    pub relationship_types: Vec<String>,

    #[serde(default)]
    pub validation_rules: ValidationRules,

    #[serde(default)]
    pub search_settings: SearchSettings,

    #[serde(default)]
    pub cycle_limits: CycleLimits,
}

impl Default for LoreConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            categories: default_categories(),
            relationship_types: default_relationship_types(),
            validation_rules: ValidationRules::default(),
            search_settings: SearchSettings::default(),
            cycle_limits: CycleLimits::default(),
        }
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("lore_system/database")
}

fn default_categories() -> Vec<String> {
    ["characters", "locations", "events", "concepts"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_relationship_types() -> Vec<String> {
    [
        "part_of",
        "contains",
        "ally_of",
        "enemy_of",
        "related_to",
        "caused_by",
        "led_to",
        "located_in",
        "member_of",
        "created_by",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn enabled() -> bool {
    true
}

/// Per-validator switches. Everything is on unless turned off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRules {
    #[serde(default = "enabled")]
    pub check_date_consistency: bool,
    #[serde(default = "enabled")]
    pub check_location_hierarchy: bool,
    #[serde(default = "enabled")]
    pub check_character_relationships: bool,
    #[serde(default = "enabled")]
    pub check_orphaned_references: bool,
    #[serde(default = "enabled")]
    pub check_circular_relationships: bool,
    #[serde(default = "enabled")]
    pub check_duplicate_names: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            check_date_consistency: true,
            check_location_hierarchy: true,
            check_character_relationships: true,
            check_orphaned_references: true,
            check_circular_relationships: true,
            check_duplicate_names: true,
        }
    }
}

/// Fuzzy search tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Minimum relevance as a fraction of 100.
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,
    /// Result cap when the caller does not pass one.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_fuzzy_threshold() -> f64 {
    0.6
}

fn default_max_results() -> usize {
    50
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            fuzzy_threshold: default_fuzzy_threshold(),
            max_results: default_max_results(),
        }
    }
}

/// Bounds on simple-cycle enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleLimits {
    /// Stop after this many cycles have been found.
    #[serde(default = "default_max_cycles")]
    pub max_cycles: usize,
    /// Stop after this many DFS edge expansions.
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

fn default_max_cycles() -> usize {
    1_000
}

fn default_max_steps() -> usize {
    100_000
}

impl Default for CycleLimits {
    fn default() -> Self {
        Self {
            max_cycles: default_max_cycles(),
            max_steps: default_max_steps(),
        }
    }
}

impl LoreConfig {
    /// Reads and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| LoreError::io(path, e))?;
        let config: Self = serde_json::from_str(&text).map_err(|e| LoreError::json(path, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self).map_err(|e| LoreError::json(path, e))?;
        fs::write(path, text).map_err(|e| LoreError::io(path, e))
    }

    /// Rejects settings that would make search or checking meaningless.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.search_settings.fuzzy_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(LoreError::Config(format!(
                "fuzzy_threshold must be between 0 and 1, got {threshold}"
            )));
        }
        if self.search_settings.max_results == 0 {
            return Err(LoreError::Config("max_results must be at least 1".into()));
        }
        if self.categories.is_empty() {
            return Err(LoreError::Config("at least one category is required".into()));
        }
        Ok(())
    }

    /// Fails if `category` is not one of the configured categories.
    pub fn require_category(&self, category: &str) -> Result<()> {
        if self.categories.iter().any(|c| c == category) {
            Ok(())
        } else {
            Err(LoreError::UnknownCategory(category.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: LoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LoreConfig::default());
        assert!(config.validation_rules.check_duplicate_names);
        assert_eq!(config.search_settings.max_results, 50);
    }

    #[test]
    fn test_partial_rules_keep_other_defaults() {
        let config: LoreConfig = serde_json::from_str(
            r#"{"validation_rules": {"check_date_consistency": false},
                "search_settings": {"fuzzy_threshold": 0.4}}"#,
        )
        .unwrap();
        assert!(!config.validation_rules.check_date_consistency);
        assert!(config.validation_rules.check_location_hierarchy);
        assert_eq!(config.search_settings.fuzzy_threshold, 0.4);
        assert_eq!(config.search_settings.max_results, 50);
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let mut config = LoreConfig::default();
        config.search_settings.fuzzy_threshold = 1.5;
        assert!(matches!(config.validate(), Err(LoreError::Config(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = LoreConfig::default();
        config.search_settings.max_results = 7;
        config.save(&path).unwrap();

        let loaded = LoreConfig::load(&path).unwrap();
        assert_eq!(loaded.search_settings.max_results, 7);
    }

    #[test]
    fn test_require_category() {
        let config = LoreConfig::default();
        assert!(config.require_category("events").is_ok());
        assert!(matches!(
            config.require_category("weather"),
            Err(LoreError::UnknownCategory(_))
        ));
    }
}
