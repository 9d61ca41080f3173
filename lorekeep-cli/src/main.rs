//! Lorekeep CLI - Command-line interface for Lorekeep
//!
//! This is the main entry point for users interacting with a lore database.
//! It provides commands for consistency checks, fuzzy search and
//! relationship queries.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "lorekeep")]
#[command(author = "Lorekeep Contributors")]
#[command(version)]
#[command(about = "Consistency checking and search for worldbuilding lore", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file
    #[arg(long, global = true, default_value = "lore_system/config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration and create the database directory
    Init {
        /// Directory to initialize (defaults to lore_system)
        #[arg(default_value = "lore_system")]
        path: PathBuf,
    },

    /// Run the consistency checker
    Check {
        /// Output the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fuzzy search across entries
    Search {
        /// Search query
        query: String,

        /// Only search this category
        #[arg(short, long)]
        category: Option<String>,

        /// Only entries sharing at least one of these tags
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Maximum results (defaults to search_settings.max_results)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Follow relationships out from an entry
    Related {
        /// Entry id to start from
        id: String,

        /// Only follow relationships of this type
        #[arg(short, long = "type")]
        relationship_type: Option<String>,

        /// Maximum number of hops
        #[arg(short, long, default_value = "2")]
        depth: usize,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Suggest entries similar to an entry
    Suggest {
        /// Entry id to compare against
        id: String,

        /// Maximum suggestions
        #[arg(short, long, default_value = "5")]
        limit: usize,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Show index statistics
    Stats {
        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Print a single entry
    Show {
        /// Entry id
        id: String,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// List entries
    List {
        /// Only list this category
        #[arg(short, long)]
        category: Option<String>,

        /// Maximum entries to list
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Export the relationship graph to JSON
    Export {
        /// Output file
        #[arg(short, long, default_value = "lore-graph.json")]
        output: PathBuf,

        /// Restrict the export to edges among these entry ids
        ids: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let config = cli.config.as_path();
    let result = match cli.command {
        Commands::Init { path } => commands::init(&path),
        Commands::Check { json } => commands::check(config, json),
        Commands::Search {
            query,
            category,
            tags,
            limit,
            json,
        } => commands::search(config, &query, category.as_deref(), &tags, limit, json),
        Commands::Related {
            id,
            relationship_type,
            depth,
            json,
        } => commands::related(config, &id, relationship_type.as_deref(), depth, json),
        Commands::Suggest { id, limit, json } => commands::suggest(config, &id, limit, json),
        Commands::Stats { json } => commands::stats(config, json),
        Commands::Show { id, json } => commands::show(config, &id, json),
        Commands::List {
            category,
            limit,
            json,
        } => commands::list(config, category.as_deref(), limit, json),
        Commands::Export { output, ids } => commands::export(config, &output, &ids),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
