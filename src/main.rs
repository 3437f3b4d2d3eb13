//! Shelfwalker main entry point
//!
//! This is the command-line interface for the shelfwalker catalog scraper.

use anyhow::Context;
use clap::Parser;
use shelfwalker::catalog::PageLabel;
use shelfwalker::config::{load_config_with_hash, Config};
use shelfwalker::crawler::{run_scrape, ScrapeJob};
use shelfwalker::output::{load_statistics, print_statistics};
use shelfwalker::storage::JsonStore;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shelfwalker: an incremental catalog scraper
///
/// Scrapes a paginated catalog site one category at a time, assigns stable
/// sequential ids, and merges the results into a JSON catalog document.
/// Re-running against the same document updates it in place.
#[derive(Parser, Debug)]
#[command(name = "shelfwalker")]
#[command(version)]
#[command(about = "An incremental catalog scraper", long_about = None)]
struct Cli {
    /// Category (console/section) to scrape
    #[arg(value_name = "CATEGORY", required_unless_present = "stats")]
    category: Option<String>,

    /// Page to fetch: a 1-based number, or "all" for the whole category
    #[arg(short, long, default_value = "all")]
    page: PageLabel,

    /// Catalog document to merge into (defaults to the configured path)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Start numbering new records from this id (non-positive values are
    /// ignored)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    start_id: Option<i64>,

    /// Download each record's asset after scraping
    #[arg(short, long)]
    download: bool,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print statistics for an existing catalog document and exit
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration; no file means built-in defaults
    let config = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?;
            tracing::info!(
                "Configuration loaded from {} (hash: {})",
                path.display(),
                hash
            );
            config
        }
        None => Config::default(),
    };

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.catalog_path));

    if cli.stats {
        return handle_stats(&output);
    }

    let category = cli
        .category
        .clone()
        .context("a category argument is required")?;

    let job = ScrapeJob {
        category,
        page: cli.page,
        output,
        start_id: cli.start_id,
        download: cli.download,
    };

    let summary = run_scrape(config, job).await?;
    summary.print();

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shelfwalker=info,warn"),
            1 => EnvFilter::new("shelfwalker=debug,info"),
            2 => EnvFilter::new("shelfwalker=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --stats mode: shows statistics for an existing document
fn handle_stats(output: &std::path::Path) -> anyhow::Result<()> {
    println!("Catalog: {}\n", output.display());

    let store = JsonStore::new(output);
    let doc = store.load();
    let stats = load_statistics(&doc);
    print_statistics(&stats);

    Ok(())
}
