//! Event Scraper main entry point
//!
//! This is the command-line interface for the Event Scraper.

use anyhow::Context;
use clap::Parser;
use event_scraper::config::{load_config_with_hash, Config};
use event_scraper::crawler::run_pipeline;
use event_scraper::output::{export_csv, print_summary};
use event_scraper::storage::open_storage;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Event Scraper: a polite event listing harvester
///
/// Scrapes event listings from the configured sites while respecting
/// robots.txt, stores them in SQLite and exports the table as CSV.
#[derive(Parser, Debug)]
#[command(name = "event-scraper")]
#[command(version = "1.0.0")]
#[command(about = "Scrape event listings into SQLite and CSV", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without fetching anything
    #[arg(long, conflicts_with = "export_only")]
    dry_run: bool,

    /// Skip scraping and only export the existing database to CSV
    #[arg(long, conflicts_with = "dry_run")]
    export_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.export_only {
        handle_export_only(&config)?;
    } else {
        handle_scrape(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("event_scraper=info,warn"),
            1 => EnvFilter::new("event_scraper=debug,info"),
            2 => EnvFilter::new("event_scraper=trace,debug"),
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

/// Handles the --dry-run mode: shows what would be scraped
fn handle_dry_run(config: &Config) {
    println!("=== Event Scraper Dry Run ===\n");

    println!("Scraper:");
    println!("  User agent: {}", config.scraper.user_agent);
    println!("  Page delay: {}ms", config.scraper.page_delay_ms);
    println!("  Site delay: {}ms", config.scraper.site_delay_ms);
    match config.scraper.max_pages {
        0 => println!("  Max pages per site: unlimited"),
        n => println!("  Max pages per site: {}", n),
    }
    println!("  Unreachable robots.txt: {:?}", config.robots.on_unreachable);

    println!("\nSelectors:");
    println!("  Event: {}", config.selectors.event);
    println!(
        "  Fields: {} | {} | {} | {} | {}",
        config.selectors.name,
        config.selectors.date,
        config.selectors.venue,
        config.selectors.speakers,
        config.selectors.price
    );
    println!("  Next page: {}", config.selectors.next_page);

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);
    println!("  CSV: {}", config.output.csv_path);

    println!("\nSites ({}):", config.scraper.sites.len());
    for site in &config.scraper.sites {
        println!("  - {}", site);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --export-only mode: dumps the existing database
fn handle_export_only(config: &Config) -> anyhow::Result<()> {
    let storage = open_storage(Path::new(&config.output.database_path))?;
    let rows = export_csv(&storage, Path::new(&config.output.csv_path))?;
    println!("✓ Exported {} events to {}", rows, config.output.csv_path);
    Ok(())
}

/// Handles the main scrape operation
async fn handle_scrape(config: Config) -> anyhow::Result<()> {
    tracing::info!("Sites to scrape: {}", config.scraper.sites.len());

    let mut storage = open_storage(Path::new(&config.output.database_path))
        .with_context(|| format!("failed to open {}", config.output.database_path))?;

    match run_pipeline(config, &mut storage).await {
        Ok(summary) => {
            println!("Scraping completed!\n");
            print_summary(&summary);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            Err(e.into())
        }
    }
}
