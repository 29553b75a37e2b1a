//! QA-Harvest main entry point
//!
//! This is the command-line interface for the QA-Harvest scraper.

use anyhow::Context;
use clap::Parser;
use qa_harvest::config::{load_config_with_hash, validate, Config};
use qa_harvest::crawler::{harvest, stats_from_file};
use qa_harvest::output::print_statistics;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// QA-Harvest: scrape question/answer pages into JSONL
///
/// Walks the paginated question index, saves the question URLs, then fetches
/// every question page and writes one JSON record per page.
#[derive(Parser, Debug)]
#[command(name = "qa-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Scrape QA data from legis-pedia", long_about = None)]
struct Cli {
    /// Path to save the scraped data
    #[arg(long = "output_dir", value_name = "DIR")]
    output_dir: Option<String>,

    /// Number of listing pages to scrape
    #[arg(long = "max_page", value_name = "N")]
    max_page: Option<u32>,

    /// Skip scraping the listing pages and reuse the saved URL list
    #[arg(long = "skip_main_page")]
    skip_main_page: bool,

    /// Optional TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the resolved configuration without fetching anything
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Summarise the existing record file and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        harvest(config).await.context("Harvest failed")?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("qa_harvest=info,warn"),
            1 => EnvFilter::new("qa_harvest=debug,info"),
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

/// Loads the config file (if any) and applies the command-line overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(dir) = &cli.output_dir {
        config.output.dir = dir.clone();
    }
    if let Some(max_page) = cli.max_page {
        config.crawl.max_page = max_page;
    }
    if cli.skip_main_page {
        config.crawl.skip_main_page = true;
    }

    validate(&config).context("Invalid configuration")?;

    Ok(config)
}

/// Handles the --dry-run mode
fn handle_dry_run(config: &Config) {
    println!("=== QA-Harvest Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Page parameter: {}", config.site.page_param);
    println!("  User agent: {}", config.site.user_agent);

    println!("\nFetch:");
    println!("  Max attempts: {}", config.fetch.max_attempts);
    println!("  Retry wait: {}s ({:?})", config.fetch.retry_wait_secs, config.fetch.backoff);
    println!("  Cooldown: {}s", config.fetch.cooldown_secs);

    println!("\nCrawl:");
    if config.crawl.skip_main_page {
        println!("  Listing pages: skipped");
    } else {
        println!("  Listing pages: 1..={}", config.crawl.max_page);
    }

    println!("\nOutput:");
    println!("  URL list: {}", config.output.url_list_path().display());
    println!("  Records: {}", config.output.records_path().display());

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let path = config.output.records_path();
    let stats = stats_from_file(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    println!("Records file: {}\n", path.display());
    print_statistics(&stats);

    Ok(())
}
