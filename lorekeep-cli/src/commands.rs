//! CLI command implementations.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use lorekeep_check::{ConsistencyChecker, ConsistencyReport, Severity};
use lorekeep_core::{Entry, JsonDirectorySource, LoreConfig};
use lorekeep_graph::LoreIndex;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Reads the configuration, falling back to defaults when the file is absent.
fn load_config(path: &Path) -> Result<LoreConfig> {
    if !path.exists() {
        debug!("No config at {}, using defaults", path.display());
        return Ok(LoreConfig::default());
    }
    Ok(LoreConfig::load(path)?)
}

/// Runs `load` against the configured database behind a spinner.
fn with_spinner<T>(
    config: &LoreConfig,
    load: impl FnOnce(&JsonDirectorySource) -> lorekeep_core::Result<T>,
) -> Result<T> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message("Loading entries...");

    let source = JsonDirectorySource::from_config(config);
    let loaded = load(&source);

    spinner.finish_and_clear();
    Ok(loaded?)
}

fn open_index(config_path: &Path) -> Result<(LoreConfig, LoreIndex)> {
    let config = load_config(config_path)?;
    let settings = config.search_settings.clone();
    let index = with_spinner(&config, |source| LoreIndex::from_source(source, settings))?;
    Ok((config, index))
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Initialize a lore database directory.
pub fn init(path: &Path) -> Result<()> {
    let config_path = path.join("config.json");

    if config_path.exists() {
        println!("{} Already initialized", "✓".green());
        return Ok(());
    }

    let config = LoreConfig {
        database_path: path.join("database"),
        ..LoreConfig::default()
    };

    fs::create_dir_all(&config.database_path)?;
    config.save(&config_path)?;

    println!("{} Initialized lore database in {}", "✓".green(), path.display());
    println!("  Run {} to check it", "lorekeep check".cyan());

    Ok(())
}

/// Run every enabled validator and print the report.
pub fn check(config_path: &Path, json_output: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let rules = config.validation_rules.clone();
    let checker = with_spinner(&config, |source| {
        ConsistencyChecker::from_source(source, rules, config.cycle_limits)
    })?;
    let report = checker.generate_report();

    if json_output {
        return print_json(&report);
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &ConsistencyReport) {
    println!("{}", "Consistency Report".cyan().bold());
    println!(
        "Checked {} entries at {}",
        report.total_entries.to_string().bold(),
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    if report.total_issues == 0 && report.is_complete() {
        println!("{} No issues found", "✓".green());
        return;
    }

    let counts = &report.severity_counts;
    println!(
        "Total: {} issues (critical: {}, warnings: {}, suggestions: {})",
        report.total_issues.to_string().bold(),
        counts.critical.to_string().red(),
        counts.warnings.to_string().yellow(),
        counts.suggestions.to_string().dimmed()
    );
    for (issue_type, count) in &report.issues_by_type {
        println!("  {}: {}", issue_type, count);
    }
    println!();

    for severity in [Severity::Critical, Severity::Warning, Severity::Suggestion] {
        let issues: Vec<_> = report.with_severity(severity).collect();
        if issues.is_empty() {
            continue;
        }

        let heading = match severity {
            Severity::Critical => "Critical:".red(),
            Severity::Warning => "Warnings:".yellow(),
            Severity::Suggestion => "Suggestions:".dimmed(),
        };
        println!("{}", heading);
        for issue in issues {
            println!("  • {}", issue);
        }
        println!();
    }

    if !report.is_complete() {
        println!("{} Some checks stopped early:", "⚠".yellow());
        for degraded in &report.degraded {
            println!("  {} ({})", degraded.validator, degraded.reason);
        }
        println!("  Raise {} to see every cycle", "cycle_limits".cyan());
    }
}

/// Fuzzy search across entries.
pub fn search(
    config_path: &Path,
    query: &str,
    category: Option<&str>,
    tags: &[String],
    limit: Option<usize>,
    json_output: bool,
) -> Result<()> {
    let (config, index) = open_index(config_path)?;
    if let Some(category) = category {
        config.require_category(category)?;
    }

    let hits = index.search(query, category, tags, limit);

    if json_output {
        return print_json(&hits);
    }

    if hits.is_empty() {
        println!("No matches found for \"{}\"", query);
        return Ok(());
    }

    println!("Found {} matches:\n", hits.len());

    for hit in hits {
        println!(
            "  {} {} {}",
            format!("{:>5.1}", hit.score).yellow(),
            hit.name.cyan(),
            format!("({}, {})", hit.category, hit.id).dimmed()
        );
        if !hit.description.is_empty() {
            println!("        {}", truncate(&hit.description, 80).dimmed());
        }
    }

    Ok(())
}

/// Follow relationships out from an entry.
pub fn related(
    config_path: &Path,
    id: &str,
    relationship_type: Option<&str>,
    max_depth: usize,
    json_output: bool,
) -> Result<()> {
    let (_, index) = open_index(config_path)?;
    let root = find_entry(&index, id)?;

    let related = index.related_to(id, relationship_type, max_depth);

    if json_output {
        return print_json(&related);
    }

    println!("Related to {} ({})", root.name.cyan(), root.id);
    println!();

    if related.is_empty() {
        println!("  No related entries within {} hops", max_depth);
        return Ok(());
    }

    for item in &related {
        let indent = "  ".repeat(item.depth);
        println!(
            "{}{} {} {}",
            indent,
            item.relationship_type.yellow(),
            item.entry.name.cyan(),
            format!("({}, strength {})", item.entry.id, item.strength).dimmed()
        );
    }

    Ok(())
}

/// Suggest entries similar to an entry.
pub fn suggest(config_path: &Path, id: &str, limit: usize, json_output: bool) -> Result<()> {
    let (_, index) = open_index(config_path)?;
    let root = find_entry(&index, id)?;

    let suggestions = index.suggest(id, limit);

    if json_output {
        return print_json(&suggestions);
    }

    if suggestions.is_empty() {
        println!("No entries similar to {}", root.name.cyan());
        return Ok(());
    }

    println!("Entries similar to {}:\n", root.name.cyan());
    for suggestion in suggestions {
        println!(
            "  {} {} {}",
            format!("{:.2}", suggestion.similarity_score).yellow(),
            suggestion.entry.name.cyan(),
            format!("({}, {})", suggestion.entry.category, suggestion.entry.id).dimmed()
        );
    }

    Ok(())
}

/// Show index statistics.
pub fn stats(config_path: &Path, json_output: bool) -> Result<()> {
    let (config, index) = open_index(config_path)?;
    let stats = index.statistics();

    if json_output {
        return print_json(&stats);
    }

    println!("{}", "Lore Database Status".cyan().bold());
    println!("{}", "═".repeat(40));
    println!("Database:      {}", config.database_path.display());
    println!("Entries:       {}", stats.total_entries.to_string().bold());
    for (category, count) in &stats.counts_by_category {
        println!("  {:<12} {}", category, count);
    }
    println!("Relationships: {}", stats.total_relationship_edges);
    println!(
        "Unconnected:   {}",
        stats.orphaned_entry_ids.len().to_string().yellow()
    );
    for id in stats.orphaned_entry_ids.iter().take(10) {
        println!("  • {}", id);
    }
    if stats.orphaned_entry_ids.len() > 10 {
        println!("  ... and {} more", stats.orphaned_entry_ids.len() - 10);
    }

    Ok(())
}

/// Print a single entry.
pub fn show(config_path: &Path, id: &str, json_output: bool) -> Result<()> {
    let (_, index) = open_index(config_path)?;
    let entry = find_entry(&index, id)?;

    if json_output {
        return print_json(entry);
    }

    println!("{} {}", entry.name.cyan().bold(), format!("({})", entry.id).dimmed());
    match &entry.subcategory {
        Some(sub) => println!("Category: {} / {}", entry.category, sub),
        None => println!("Category: {}", entry.category),
    }
    if !entry.tags.is_empty() {
        let tags: Vec<&str> = entry.tags.iter().map(String::as_str).collect();
        println!("Tags: {}", tags.join(", "));
    }
    if !entry.description.is_empty() {
        println!();
        println!("{}", entry.description);
    }

    if !entry.custom_fields.is_empty() {
        println!();
        println!("{}", "Fields:".yellow());
        for (key, value) in &entry.custom_fields {
            let text = value
                .scalar_text()
                .unwrap_or_else(|| value.searchable_parts().join(", "));
            println!("  {}: {}", key, text);
        }
    }

    if !entry.relationships.is_empty() {
        println!();
        println!("{}", "Relationships:".yellow());
        for rel in &entry.relationships {
            let target = index.snapshot().get(&rel.target_id);
            let label = match target {
                Some(target) => target.name.cyan(),
                None => format!("{} (missing)", rel.target_id).red(),
            };
            println!("  {} → {}", rel.relationship_type, label);
        }
    }

    println!();
    println!(
        "{}",
        format!(
            "v{} · {}",
            entry.metadata.version, entry.metadata.status
        )
        .dimmed()
    );

    Ok(())
}

#[derive(Serialize)]
struct ListedEntry<'a> {
    id: &'a str,
    name: &'a str,
    category: &'a str,
}

/// List entries, optionally restricted to one category.
pub fn list(
    config_path: &Path,
    category: Option<&str>,
    limit: Option<usize>,
    json_output: bool,
) -> Result<()> {
    let (config, index) = open_index(config_path)?;
    if let Some(category) = category {
        config.require_category(category)?;
    }

    let snapshot = index.snapshot();
    let entries: Vec<&Entry> = snapshot
        .entries()
        .filter(|entry| category.map_or(true, |c| entry.category.is(c)))
        .take(limit.unwrap_or(usize::MAX))
        .collect();

    if json_output {
        let listed: Vec<ListedEntry<'_>> = entries
            .iter()
            .map(|entry| ListedEntry {
                id: &entry.id,
                name: &entry.name,
                category: entry.category.as_str(),
            })
            .collect();
        return print_json(&listed);
    }

    if entries.is_empty() {
        println!("No entries");
        return Ok(());
    }

    for entry in entries {
        println!(
            "  {} {} {}",
            entry.category.to_string().yellow(),
            entry.name.cyan(),
            format!("({})", entry.id).dimmed()
        );
    }

    Ok(())
}

/// Export the relationship graph to JSON.
pub fn export(config_path: &Path, output: &Path, ids: &[String]) -> Result<()> {
    let (_, index) = open_index(config_path)?;
    let ids = if ids.is_empty() { None } else { Some(ids) };
    let edges = index.subgraph_edges(ids);

    let nodes: Vec<&str> = match ids {
        Some(ids) => ids
            .iter()
            .map(String::as_str)
            .filter(|id| index.snapshot().contains(id))
            .collect(),
        None => index.snapshot().entries().map(|e| e.id.as_str()).collect(),
    };

    let export = serde_json::json!({
        "version": "1.0",
        "stats": {
            "nodeCount": nodes.len(),
            "edgeCount": edges.len()
        },
        "nodes": nodes,
        "edges": edges
    });

    fs::write(output, serde_json::to_string_pretty(&export)?)?;
    println!("{} Exported to {}", "✓".green(), output.display());

    Ok(())
}

fn find_entry<'a>(index: &'a LoreIndex, id: &str) -> Result<&'a Entry> {
    index
        .snapshot()
        .get(id)
        .ok_or_else(|| format!("Entry '{}' not found", id).into())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer description", 10), "a longe...");
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, LoreConfig::default());
    }

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("lore");

        init(&root).unwrap();

        let config = LoreConfig::load(root.join("config.json")).unwrap();
        assert_eq!(config.database_path, root.join("database"));
        assert!(config.database_path.is_dir());
    }
}
